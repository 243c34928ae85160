//! # visits-db
//!
//! MySQL adapter for the visits seeding demos.
//!
//! This crate provides environment-driven configuration, connection
//! bootstrap and the replace-mode table writer shared by the managed
//! and VM flows.

pub mod config;
pub mod connection;
pub mod reader;
pub mod schema;
pub mod writer;

mod sql;

pub use config::{DEFAULT_MYSQL_PORT, DbConfig, Target};
pub use connection::DbHandle;
pub use reader::DbReader;
pub use schema::{ColumnDef, ColumnType, TableSpec, VISITS_TABLE, visits_table};
pub use writer::DbWriter;

use thiserror::Error;

/// Errors that can occur when working with the database.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {details}")]
    Config { details: String },

    #[error("MySQL error during {context}: {source}")]
    MySql {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("SQL error executing `{statement}`: {source}")]
    Sql {
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Query error on `{table}`: {details}")]
    Query { table: String, details: String },
}

pub type Result<T> = std::result::Result<T, Error>;
