//! Connection bootstrap over the MySQL driver.
//!
//! A [`DbHandle`] verifies liveness once on a probe connection, then
//! holds a lazily connecting pool with pre-ping enabled for the work
//! that follows. The VM flow bootstraps its target database on the
//! probe itself, so a run never needs more than the probe and one
//! pooled connection. The `memory` feature adds a backend that keeps
//! tables in process memory so the write and read paths can be
//! exercised without a server.

#[cfg(feature = "memory")]
use std::collections::{HashMap, HashSet};
#[cfg(feature = "memory")]
use std::sync::Arc;

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::{ConnectOptions, Connection, Row};
#[cfg(feature = "memory")]
use tokio::sync::RwLock;
use tracing::debug;

use visits_core::VisitRecord;

use crate::config::DbConfig;
use crate::schema::TableSpec;
use crate::sql::quote_identifier;
use crate::{Error, Result};

const LIVENESS_SQL: &str = "SELECT 1";

/// One connection is enough for the sequential flows; together with the
/// probe it keeps a run at two server connections total.
const POOL_SIZE: u32 = 1;

/// Handle to a target database.
#[derive(Clone)]
pub struct DbHandle {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    MySql { pool: MySqlPool },
    #[cfg(feature = "memory")]
    Memory(Arc<MemoryState>),
}

#[cfg(feature = "memory")]
#[derive(Default)]
struct MemoryState {
    databases: RwLock<HashSet<String>>,
    tables: RwLock<HashMap<String, Vec<VisitRecord>>>,
}

impl DbHandle {
    /// Connect to the configured database: run the liveness check on a
    /// probe connection, then keep a lazy pool for later statements.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let options = config.connect_options();
        let connection = probe(&options).await?;
        close_probe(connection).await?;
        Ok(Self::lazy_with(options))
    }

    /// Connect for the VM flow: probe the server with no database
    /// selected, idempotently create the configured database on that
    /// same connection, then keep a lazy pool scoped to the database.
    pub async fn connect_with_bootstrap(config: &DbConfig) -> Result<Self> {
        let mut connection = probe(&config.server_options()).await?;
        let statement = create_database_sql(&config.database);
        sqlx::query(&statement)
            .execute(&mut connection)
            .await
            .map_err(|source| Error::Sql { statement, source })?;
        debug!(database = %config.database, "ensured database exists");
        close_probe(connection).await?;
        Ok(Self::lazy_with(config.connect_options()))
    }

    /// Handle over the in-memory backend.
    #[cfg(feature = "memory")]
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryState::default())),
        }
    }

    fn lazy_with(options: MySqlConnectOptions) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(POOL_SIZE)
            .test_before_acquire(true)
            .connect_lazy_with(options);
        Self {
            backend: Backend::MySql { pool },
        }
    }

    /// Idempotently create database `name` on the connected server.
    pub async fn ensure_database(&self, name: &str) -> Result<()> {
        match &self.backend {
            Backend::MySql { pool } => {
                let statement = create_database_sql(name);
                sqlx::query(&statement)
                    .execute(pool)
                    .await
                    .map_err(|source| Error::Sql {
                        statement: statement.clone(),
                        source,
                    })?;
                debug!(database = name, "ensured database exists");
                Ok(())
            }
            #[cfg(feature = "memory")]
            Backend::Memory(state) => {
                state.databases.write().await.insert(name.to_string());
                Ok(())
            }
        }
    }

    /// Whether the server knows a database `name`.
    pub async fn database_exists(&self, name: &str) -> Result<bool> {
        match &self.backend {
            Backend::MySql { pool } => {
                let statement =
                    "SELECT COUNT(*) FROM information_schema.schemata WHERE schema_name = ?";
                let count: i64 = sqlx::query_scalar(statement)
                    .bind(name)
                    .fetch_one(pool)
                    .await
                    .map_err(|source| Error::Sql {
                        statement: statement.to_string(),
                        source,
                    })?;
                Ok(count > 0)
            }
            #[cfg(feature = "memory")]
            Backend::Memory(state) => Ok(state.databases.read().await.contains(name)),
        }
    }

    /// Drop, recreate and fill `spec`'s table with `rows` in a single
    /// transaction. Returns the number of rows written.
    pub(crate) async fn replace_table(&self, spec: &TableSpec, rows: &[VisitRecord]) -> Result<u64> {
        match &self.backend {
            Backend::MySql { pool } => {
                let mut tx = pool.begin().await.map_err(|source| Error::MySql {
                    context: "begin transaction".to_string(),
                    source,
                })?;

                let drop_sql = spec.drop_table_sql();
                sqlx::query(&drop_sql)
                    .execute(&mut *tx)
                    .await
                    .map_err(|source| Error::Sql {
                        statement: drop_sql.clone(),
                        source,
                    })?;

                let create_sql = spec.create_table_sql();
                sqlx::query(&create_sql)
                    .execute(&mut *tx)
                    .await
                    .map_err(|source| Error::Sql {
                        statement: create_sql.clone(),
                        source,
                    })?;

                let insert_sql = spec.insert_sql();
                let mut written = 0u64;
                for row in rows {
                    let result = sqlx::query(&insert_sql)
                        .bind(row.patient_id)
                        .bind(row.visit_date)
                        .bind(row.bp_sys)
                        .bind(row.bp_dia)
                        .execute(&mut *tx)
                        .await
                        .map_err(|source| Error::Sql {
                            statement: insert_sql.clone(),
                            source,
                        })?;
                    written += result.rows_affected();
                }

                tx.commit().await.map_err(|source| Error::MySql {
                    context: "commit transaction".to_string(),
                    source,
                })?;

                debug!(table = %spec.name, rows = written, "replaced table");
                Ok(written)
            }
            #[cfg(feature = "memory")]
            Backend::Memory(state) => {
                let mut tables = state.tables.write().await;
                tables.insert(spec.name.clone(), rows.to_vec());
                Ok(rows.len() as u64)
            }
        }
    }

    /// Count rows currently in `table`.
    pub(crate) async fn count_rows(&self, table: &str) -> Result<u64> {
        match &self.backend {
            Backend::MySql { pool } => {
                let statement =
                    format!("SELECT COUNT(*) AS n_rows FROM {}", quote_identifier(table));
                let count: i64 = sqlx::query_scalar(&statement)
                    .fetch_one(pool)
                    .await
                    .map_err(|source| Error::Sql {
                        statement: statement.clone(),
                        source,
                    })?;
                Ok(count.max(0) as u64)
            }
            #[cfg(feature = "memory")]
            Backend::Memory(state) => {
                let tables = state.tables.read().await;
                Ok(tables.get(table).map(|rows| rows.len() as u64).unwrap_or(0))
            }
        }
    }

    /// Fetch every row of `table`, ordered by patient id.
    pub(crate) async fn fetch_visits(&self, table: &str) -> Result<Vec<VisitRecord>> {
        match &self.backend {
            Backend::MySql { pool } => {
                let statement = format!(
                    "SELECT patient_id, visit_date, bp_sys, bp_dia FROM {} ORDER BY patient_id",
                    quote_identifier(table)
                );
                let rows = sqlx::query(&statement)
                    .fetch_all(pool)
                    .await
                    .map_err(|source| Error::Sql {
                        statement: statement.clone(),
                        source,
                    })?;

                let read_err = |column: &str, source: sqlx::Error| Error::Query {
                    table: table.to_string(),
                    details: format!("failed to read column '{column}': {source}"),
                };

                let mut visits = Vec::with_capacity(rows.len());
                for row in &rows {
                    visits.push(VisitRecord {
                        patient_id: row
                            .try_get("patient_id")
                            .map_err(|err| read_err("patient_id", err))?,
                        visit_date: row
                            .try_get("visit_date")
                            .map_err(|err| read_err("visit_date", err))?,
                        bp_sys: row.try_get("bp_sys").map_err(|err| read_err("bp_sys", err))?,
                        bp_dia: row.try_get("bp_dia").map_err(|err| read_err("bp_dia", err))?,
                    });
                }
                Ok(visits)
            }
            #[cfg(feature = "memory")]
            Backend::Memory(state) => {
                let tables = state.tables.read().await;
                let rows = tables.get(table).ok_or_else(|| Error::Query {
                    table: table.to_string(),
                    details: "Table not found".to_string(),
                })?;
                let mut visits = rows.clone();
                visits.sort_by_key(|visit| visit.patient_id);
                Ok(visits)
            }
        }
    }

    /// Close the underlying pool; idle connections are released.
    pub async fn close(&self) {
        match &self.backend {
            Backend::MySql { pool } => pool.close().await,
            #[cfg(feature = "memory")]
            Backend::Memory(_) => {}
        }
    }
}

fn create_database_sql(name: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS {}", quote_identifier(name))
}

/// Open a short-lived connection and run the liveness check on it.
async fn probe(options: &MySqlConnectOptions) -> Result<MySqlConnection> {
    debug!(
        host = options.get_host(),
        port = options.get_port(),
        "opening probe connection"
    );
    let mut connection = options.connect().await.map_err(|source| Error::MySql {
        context: "open connection".to_string(),
        source,
    })?;
    sqlx::query(LIVENESS_SQL)
        .execute(&mut connection)
        .await
        .map_err(|source| Error::Sql {
            statement: LIVENESS_SQL.to_string(),
            source,
        })?;
    Ok(connection)
}

async fn close_probe(connection: MySqlConnection) -> Result<()> {
    connection.close().await.map_err(|source| Error::MySql {
        context: "close probe connection".to_string(),
        source,
    })
}
