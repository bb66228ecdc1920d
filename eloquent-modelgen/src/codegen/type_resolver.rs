//! MySQL to PHP docblock type mapping

use std::collections::BTreeMap;

use crate::schema::ColumnDescriptor;

/// A PHP type used in `@property` annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhpType {
    Int,
    Float,
    Bool,
    String,
    /// Decoded JSON columns
    Array,
}

impl PhpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhpType::Int => "int",
            PhpType::Float => "float",
            PhpType::Bool => "bool",
            PhpType::String => "string",
            PhpType::Array => "array",
        }
    }
}

/// Resolve column data types to PHP types
pub struct TypeResolver<'a> {
    db_types: &'a BTreeMap<String, String>,
}

impl<'a> TypeResolver<'a> {
    /// `db_types` remaps database types first, e.g. `enum = "string"`
    pub fn new(db_types: &'a BTreeMap<String, String>) -> Self {
        Self { db_types }
    }

    /// Get the docblock type for a column, `|null` appended when nullable
    pub fn resolve(&self, column: &ColumnDescriptor) -> String {
        let php_type = self.resolve_base_type(&column.data_type);
        if column.nullable {
            format!("{}|null", php_type.as_str())
        } else {
            php_type.as_str().to_string()
        }
    }

    /// Resolve the base type (without the null union)
    pub fn resolve_base_type(&self, data_type: &str) -> PhpType {
        let data_type = data_type.to_lowercase();
        let data_type = self
            .db_types
            .iter()
            .find(|(from, _)| from.eq_ignore_ascii_case(&data_type))
            .map(|(_, to)| to.to_lowercase())
            .unwrap_or(data_type);

        match data_type.as_str() {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "year" => {
                PhpType::Int
            }
            "float" | "double" | "real" | "decimal" | "numeric" => PhpType::Float,
            "bool" | "boolean" | "bit" => PhpType::Bool,
            "json" | "array" => PhpType::Array,
            _ => PhpType::String,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(data_type: &str, nullable: bool) -> ColumnDescriptor {
        ColumnDescriptor::new("c", data_type, nullable)
    }

    #[test]
    fn test_base_types() {
        let db_types = BTreeMap::new();
        let resolver = TypeResolver::new(&db_types);
        assert_eq!(resolver.resolve_base_type("bigint"), PhpType::Int);
        assert_eq!(resolver.resolve_base_type("INT"), PhpType::Int);
        assert_eq!(resolver.resolve_base_type("decimal"), PhpType::Float);
        assert_eq!(resolver.resolve_base_type("varchar"), PhpType::String);
        assert_eq!(resolver.resolve_base_type("timestamp"), PhpType::String);
        assert_eq!(resolver.resolve_base_type("json"), PhpType::Array);
    }

    #[test]
    fn test_nullable() {
        let db_types = BTreeMap::new();
        let resolver = TypeResolver::new(&db_types);
        assert_eq!(resolver.resolve(&column("int", false)), "int");
        assert_eq!(resolver.resolve(&column("text", true)), "string|null");
    }

    #[test]
    fn test_db_types_remap() {
        let mut db_types = BTreeMap::new();
        db_types.insert("enum".to_string(), "string".to_string());
        db_types.insert("tinyint".to_string(), "boolean".to_string());
        let resolver = TypeResolver::new(&db_types);
        assert_eq!(resolver.resolve_base_type("enum"), PhpType::String);
        assert_eq!(resolver.resolve_base_type("TINYINT"), PhpType::Bool);
    }
}
