//! Table layout for the visits dataset.

use serde::{Deserialize, Serialize};

use crate::sql::quote_identifier;

/// Name of the table both flows write.
pub const VISITS_TABLE: &str = "visits";

/// Supported MySQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    BigInt,
    Int,
    Date,
}

/// Column definition in a table spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Table layout used to generate DDL and insert statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Statement that clears the way for a replace-mode write.
    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", quote_identifier(&self.name))
    }

    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(column_definition_sql).collect();
        format!(
            "CREATE TABLE {} ({})",
            quote_identifier(&self.name),
            columns.join(", ")
        )
    }

    /// Parameterized insert covering every column in declaration order.
    pub fn insert_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|column| quote_identifier(&column.name))
            .collect();
        let placeholders = vec!["?"; self.columns.len()];
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(&self.name),
            columns.join(", "),
            placeholders.join(", ")
        )
    }
}

/// Layout of the `visits` table.
///
/// Declaration order is the bind order the writer relies on:
/// patient_id, visit_date, bp_sys, bp_dia.
pub fn visits_table() -> TableSpec {
    TableSpec::new(VISITS_TABLE)
        .with_column(ColumnDef::new("patient_id", ColumnType::BigInt))
        .with_column(ColumnDef::new("visit_date", ColumnType::Date))
        .with_column(ColumnDef::new("bp_sys", ColumnType::Int))
        .with_column(ColumnDef::new("bp_dia", ColumnType::Int))
}

fn column_definition_sql(column: &ColumnDef) -> String {
    let mut parts = vec![
        quote_identifier(&column.name),
        column_type_sql(column.column_type).to_string(),
    ];

    if !column.nullable {
        parts.push("NOT NULL".to_string());
    }

    parts.join(" ")
}

fn column_type_sql(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::BigInt => "BIGINT",
        ColumnType::Int => "INT",
        ColumnType::Date => "DATE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_table_declares_four_columns() {
        let spec = visits_table();
        assert_eq!(spec.name, VISITS_TABLE);
        assert_eq!(spec.columns.len(), 4);
        assert_eq!(
            spec.column("visit_date").unwrap().column_type,
            ColumnType::Date
        );
        assert!(spec.column("bp_mean").is_none());
    }

    #[test]
    fn create_table_sql_spells_out_mysql_types() {
        assert_eq!(
            visits_table().create_table_sql(),
            "CREATE TABLE `visits` (`patient_id` BIGINT NOT NULL, \
             `visit_date` DATE NOT NULL, `bp_sys` INT NOT NULL, `bp_dia` INT NOT NULL)"
        );
    }

    #[test]
    fn drop_table_sql_is_idempotent_form() {
        assert_eq!(
            visits_table().drop_table_sql(),
            "DROP TABLE IF EXISTS `visits`"
        );
    }

    #[test]
    fn insert_sql_binds_columns_in_declaration_order() {
        assert_eq!(
            visits_table().insert_sql(),
            "INSERT INTO `visits` (`patient_id`, `visit_date`, `bp_sys`, `bp_dia`) \
             VALUES (?, ?, ?, ?)"
        );
    }

    #[test]
    fn nullable_columns_omit_not_null() {
        let spec = TableSpec::new("notes")
            .with_column(ColumnDef::new("id", ColumnType::BigInt))
            .with_column(ColumnDef::new("noted_on", ColumnType::Date).nullable(true));
        assert_eq!(
            spec.create_table_sql(),
            "CREATE TABLE `notes` (`id` BIGINT NOT NULL, `noted_on` DATE)"
        );
    }
}
