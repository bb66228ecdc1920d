//! Naming utilities for code generation

use crate::error::{GeneratorError, Result};

/// Convert a table name to a model class name.
///
/// The name is split on every non-alphanumeric character and the first
/// letter of each piece is upper-cased; the rest of each piece is kept.
/// e.g., "user_profiles" -> "UserProfiles", "user-profiles" -> "UserProfiles"
pub fn to_class_name(table_name: &str) -> String {
    table_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .map(upper_first)
        .collect()
}

/// Derive a class name and reject names PHP cannot declare
pub fn class_name_for_table(table_name: &str) -> Result<String> {
    let class_name = to_class_name(table_name);

    let starts_with_digit = class_name
        .chars()
        .next()
        .map_or(true, |c| c.is_ascii_digit());
    if starts_with_digit {
        return Err(GeneratorError::InvalidTableName(format!(
            "{} (derived class name {:?} is not a PHP identifier)",
            table_name, class_name
        )));
    }
    if is_php_reserved_word(&class_name) {
        return Err(GeneratorError::InvalidTableName(format!(
            "{} (derived class name {} is reserved in PHP)",
            table_name, class_name
        )));
    }

    Ok(class_name)
}

/// Model file name for a class, e.g. "Users" -> "Users.php"
pub fn to_file_name(class_name: &str, extension: &str) -> String {
    format!("{}.{}", class_name, extension)
}

fn upper_first(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Check if a name cannot be used as a PHP class name (case-insensitive)
pub fn is_php_reserved_word(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "abstract"
            | "and"
            | "array"
            | "as"
            | "bool"
            | "break"
            | "callable"
            | "case"
            | "catch"
            | "class"
            | "clone"
            | "const"
            | "continue"
            | "declare"
            | "default"
            | "die"
            | "do"
            | "echo"
            | "else"
            | "elseif"
            | "empty"
            | "enddeclare"
            | "endfor"
            | "endforeach"
            | "endif"
            | "endswitch"
            | "endwhile"
            | "enum"
            | "eval"
            | "exit"
            | "extends"
            | "false"
            | "final"
            | "finally"
            | "float"
            | "fn"
            | "for"
            | "foreach"
            | "function"
            | "global"
            | "goto"
            | "if"
            | "implements"
            | "include"
            | "instanceof"
            | "insteadof"
            | "int"
            | "interface"
            | "isset"
            | "iterable"
            | "list"
            | "match"
            | "mixed"
            | "namespace"
            | "never"
            | "new"
            | "null"
            | "object"
            | "or"
            | "parent"
            | "print"
            | "private"
            | "protected"
            | "public"
            | "readonly"
            | "require"
            | "return"
            | "self"
            | "static"
            | "string"
            | "switch"
            | "throw"
            | "trait"
            | "true"
            | "try"
            | "unset"
            | "use"
            | "var"
            | "void"
            | "while"
            | "xor"
            | "yield"
    )
}
