//! Metadata structures for database tables

use serde::{Deserialize, Serialize};

/// Column that drives the "created" half of Eloquent timestamps
pub const CREATED_AT: &str = "created_at";

/// Column that drives the "updated" half of Eloquent timestamps
pub const UPDATED_AT: &str = "updated_at";

/// Column required by the `only_with_id` filter
pub const ID: &str = "id";

/// One row of the information schema query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub nullable: bool,
    pub comment: Option<String>,
}

/// A base table and what the generator needs to know about it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table name
    pub name: String,

    /// Columns in ordinal order
    pub columns: Vec<ColumnDescriptor>,

    /// Both `created_at` and `updated_at` are present
    pub has_timestamp_columns: bool,

    /// An `id` column is present (matched case-insensitively)
    pub has_id_column: bool,
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Data type without length or precision (e.g. "varchar", "bigint")
    pub data_type: String,

    /// Whether the column is nullable
    pub nullable: bool,

    /// Column comment (if any)
    pub comment: Option<String>,
}

impl TableDescriptor {
    /// Build a descriptor, deriving the timestamp and id flags from the columns.
    ///
    /// `strict_timestamp_case` requires `created_at` / `updated_at` to match
    /// exactly; otherwise they match in any case. `id` always matches in any case.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        strict_timestamp_case: bool,
    ) -> Self {
        let has_column = |wanted: &str| {
            columns.iter().any(|c| {
                if strict_timestamp_case {
                    c.name == wanted
                } else {
                    c.name.eq_ignore_ascii_case(wanted)
                }
            })
        };
        let has_timestamp_columns = has_column(CREATED_AT) && has_column(UPDATED_AT);
        let has_id_column = columns.iter().any(|c| c.name.to_lowercase() == ID);

        Self {
            name: name.into(),
            columns,
            has_timestamp_columns,
            has_id_column,
        }
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable,
            comment: None,
        }
    }
}
