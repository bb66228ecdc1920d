//! Model generator - renders an Eloquent model class from table metadata

use crate::config::GenerationConfig;
use crate::schema::TableDescriptor;

use super::type_resolver::TypeResolver;

/// Render the PHP source of a model class
pub fn render_model(table: &TableDescriptor, config: &GenerationConfig) -> String {
    let mut code = String::new();

    code.push_str("<?php\n\n");
    code.push_str(&format!("namespace {};\n\n", config.namespace));

    // Alias the parent when it would collide with the model's own name
    let parent = config.base_class_short_name();
    let parent_alias = if parent.eq_ignore_ascii_case(&config.class_name) {
        format!("Base{}", parent)
    } else {
        parent.to_string()
    };
    if parent_alias == parent {
        code.push_str(&format!("use {};\n\n", config.base_class_name));
    } else {
        code.push_str(&format!(
            "use {} as {};\n\n",
            config.base_class_name, parent_alias
        ));
    }

    code.push_str(&generate_docblock(table, config));

    let modifier = if config.as_abstract { "abstract " } else { "" };
    code.push_str(&format!(
        "{}class {} extends {}\n{{\n",
        modifier, config.class_name, parent_alias
    ));

    let mut properties = vec![generate_property(
        "protected",
        "table",
        "string",
        &php_string(&config.table_name),
    )];
    if config.no_timestamps {
        properties.push(generate_property("public", "timestamps", "bool", "false"));
    }
    if let Some(date_format) = &config.date_format {
        properties.push(generate_property(
            "protected",
            "dateFormat",
            "string",
            &php_string(date_format),
        ));
    }
    if let Some(connection) = &config.connection {
        properties.push(generate_property(
            "protected",
            "connection",
            "string",
            &php_string(connection),
        ));
    }
    code.push_str(&properties.join("\n"));

    code.push_str("}\n");
    code
}

/// Class docblock with one `@property` line per column
fn generate_docblock(table: &TableDescriptor, config: &GenerationConfig) -> String {
    let resolver = TypeResolver::new(&config.db_types);
    let mut doc = String::new();

    doc.push_str("/**\n");
    doc.push_str(&format!(
        " * Eloquent model for table `{}`\n",
        doc_safe(&table.name)
    ));
    if !table.columns.is_empty() {
        doc.push_str(" *\n");
    }
    for column in &table.columns {
        doc.push_str(&format!(
            " * @property {} ${}",
            resolver.resolve(column),
            column.name
        ));
        if let Some(comment) = &column.comment {
            doc.push_str(&format!(" {}", doc_safe(comment)));
        }
        doc.push('\n');
    }
    doc.push_str(" */\n");
    doc
}

fn generate_property(visibility: &str, name: &str, var_type: &str, value: &str) -> String {
    format!(
        "    /**\n     * @var {}\n     */\n    {} ${} = {};\n",
        var_type, visibility, name, value
    )
}

/// Single-quoted PHP string literal
fn php_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Keep text from closing the docblock or breaking its lines
fn doc_safe(text: &str) -> String {
    text.replace("*/", "* /").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::schema::ColumnDescriptor;

    fn users() -> TableDescriptor {
        TableDescriptor::new(
            "users",
            vec![
                ColumnDescriptor::new("id", "bigint", false),
                ColumnDescriptor::new("name", "varchar", false),
                ColumnDescriptor::new("created_at", "timestamp", true),
                ColumnDescriptor::new("updated_at", "timestamp", true),
            ],
            false,
        )
    }

    fn generation(table: &TableDescriptor, config: &GeneratorConfig) -> GenerationConfig {
        GenerationConfig::for_table(config, table).unwrap()
    }

    #[test]
    fn test_render_basic_model() {
        let table = users();
        let code = render_model(&table, &generation(&table, &GeneratorConfig::default()));

        assert!(code.starts_with("<?php\n\nnamespace App;\n"));
        assert!(code.contains("use Illuminate\\Database\\Eloquent\\Model;\n"));
        assert!(code.contains("\nclass Users extends Model\n{"));
        assert!(code.contains(" * @property int $id\n"));
        assert!(code.contains(" * @property string|null $created_at\n"));
        assert!(code.contains("protected $table = 'users';"));
        assert!(!code.contains("$timestamps"));
        assert!(!code.contains("abstract"));
    }

    #[test]
    fn test_render_abstract_without_timestamps() {
        let table = TableDescriptor::new(
            "logs",
            vec![ColumnDescriptor::new("message", "text", false)],
            false,
        );
        let mut config = GeneratorConfig::default();
        config.model_defaults.as_abstract = true;
        config.model_defaults.date_format = Some("U".to_string());
        config.model_defaults.connection = Some("audit".to_string());

        let code = render_model(&table, &generation(&table, &config));
        assert!(code.contains("\nabstract class Logs extends Model\n"));
        assert!(code.contains("public $timestamps = false;"));
        assert!(code.contains("protected $dateFormat = 'U';"));
        assert!(code.contains("protected $connection = 'audit';"));
    }

    #[test]
    fn test_abstract_only_touches_declaration() {
        let mut table = users();
        table.columns[1].comment = Some("class Users display name".to_string());
        let mut config = GeneratorConfig::default();
        config.model_defaults.as_abstract = true;

        let code = render_model(&table, &generation(&table, &config));
        assert_eq!(code.matches("abstract class Users").count(), 1);
        assert!(code.contains("$name class Users display name"));
    }

    #[test]
    fn test_parent_alias_on_name_clash() {
        let table = TableDescriptor::new("model", Vec::new(), false);
        let code = render_model(&table, &generation(&table, &GeneratorConfig::default()));
        assert!(code.contains("use Illuminate\\Database\\Eloquent\\Model as BaseModel;"));
        assert!(code.contains("class Model extends BaseModel"));
    }

    #[test]
    fn test_php_string_escaping() {
        assert_eq!(php_string("it's"), "'it\\'s'");
        assert_eq!(php_string("a\\b"), "'a\\\\b'");
    }
}
