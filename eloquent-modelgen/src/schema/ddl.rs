//! Offline schema source reading `CREATE TABLE` statements with sqlparser-rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, DataType, ObjectName, Statement};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use super::metadata::{ColumnDescriptor, TableDescriptor};
use super::SchemaSource;
use crate::error::Result;

/// Reads table descriptors from a SQL DDL file.
///
/// Only `CREATE TABLE` statements produce tables; views and every other
/// statement are ignored.
pub struct DdlSchemaSource {
    schema_file: PathBuf,
    strict_timestamp_case: bool,
}

impl DdlSchemaSource {
    pub fn new(schema_file: impl AsRef<Path>, strict_timestamp_case: bool) -> Self {
        Self {
            schema_file: schema_file.as_ref().to_path_buf(),
            strict_timestamp_case,
        }
    }
}

#[async_trait]
impl SchemaSource for DdlSchemaSource {
    async fn read_tables(&self) -> Result<Vec<TableDescriptor>> {
        let sql = std::fs::read_to_string(&self.schema_file)?;
        parse_schema(&sql, self.strict_timestamp_case)
    }
}

/// Parse a SQL schema string into table descriptors
pub fn parse_schema(sql: &str, strict_timestamp_case: bool) -> Result<Vec<TableDescriptor>> {
    let dialect = MySqlDialect {};
    let statements = Parser::parse_sql(&dialect, sql)?;

    let tables = statements
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::CreateTable(create) => Some(table_descriptor(create, strict_timestamp_case)),
            _ => None,
        })
        .collect();

    Ok(tables)
}

fn table_descriptor(create: &CreateTable, strict_timestamp_case: bool) -> TableDescriptor {
    let columns = create.columns.iter().map(column_descriptor).collect();
    TableDescriptor::new(
        extract_table_name(&create.name),
        columns,
        strict_timestamp_case,
    )
}

fn column_descriptor(col_def: &ColumnDef) -> ColumnDescriptor {
    let mut nullable = true;
    let mut comment = None;

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull | ColumnOption::PrimaryKey(_) => nullable = false,
            ColumnOption::Null => nullable = true,
            ColumnOption::Comment(c) => comment = Some(c.clone()),
            _ => {}
        }
    }

    ColumnDescriptor {
        name: col_def.name.value.clone(),
        data_type: base_type_name(&col_def.data_type),
        nullable,
        comment,
    }
}

/// `VARCHAR(255)` -> `varchar`, `INT UNSIGNED` -> `int`, matching `DATA_TYPE`
fn base_type_name(data_type: &DataType) -> String {
    let rendered = data_type.to_string().to_lowercase();
    rendered
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tables_in_order() {
        let sql = r#"
            CREATE TABLE users (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                created_at TIMESTAMP NULL,
                updated_at TIMESTAMP NULL
            );
            CREATE TABLE logs (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                message TEXT COMMENT 'log line'
            );
        "#;

        let tables = parse_schema(sql, false).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name, "users");
        assert!(tables[0].has_timestamp_columns);
        assert!(tables[0].has_id_column);
        assert_eq!(tables[1].name, "logs");
        assert!(!tables[1].has_timestamp_columns);

        let id = tables[0].get_column("id").unwrap();
        assert_eq!(id.data_type, "bigint");
        assert!(!id.nullable);

        let name = tables[0].get_column("name").unwrap();
        assert_eq!(name.data_type, "varchar");

        let message = tables[1].get_column("message").unwrap();
        assert!(message.nullable);
        assert_eq!(message.comment.as_deref(), Some("log line"));
    }

    #[test]
    fn test_views_are_ignored() {
        let sql = r#"
            CREATE TABLE users (id BIGINT PRIMARY KEY, name VARCHAR(50));
            CREATE VIEW user_names AS SELECT name FROM users;
        "#;

        let tables = parse_schema(sql, false).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "users");
    }

    #[test]
    fn test_backticked_names() {
        let sql = "CREATE TABLE `order` (`Id` INT UNSIGNED NOT NULL);";
        let tables = parse_schema(sql, false).unwrap();
        assert_eq!(tables[0].name, "order");
        assert!(tables[0].has_id_column);
        assert_eq!(tables[0].columns[0].data_type, "int");
    }

    #[test]
    fn test_invalid_sql() {
        assert!(parse_schema("CREATE TABLE (", false).is_err());
    }
}
