//! Schema readers: live information schema or offline DDL

mod ddl;
mod information_schema;
mod metadata;

pub use ddl::*;
pub use information_schema::*;
pub use metadata::*;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

/// Something that can enumerate the base tables of a database
#[async_trait]
pub trait SchemaSource {
    /// Read every base table, in the order the source reports them
    async fn read_tables(&self) -> Result<Vec<TableDescriptor>>;
}

/// Group flat column rows into tables, keeping first-appearance order.
pub fn group_columns(rows: Vec<ColumnRow>, strict_timestamp_case: bool) -> Vec<TableDescriptor> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<ColumnDescriptor>> = HashMap::new();

    for row in rows {
        let columns = grouped.entry(row.table_name.clone()).or_insert_with(|| {
            order.push(row.table_name.clone());
            Vec::new()
        });
        columns.push(ColumnDescriptor {
            name: row.column_name,
            data_type: row.data_type,
            nullable: row.nullable,
            comment: row.comment,
        });
    }

    order
        .into_iter()
        .map(|name| {
            let columns = grouped.remove(&name).unwrap_or_default();
            TableDescriptor::new(name, columns, strict_timestamp_case)
        })
        .collect()
}
