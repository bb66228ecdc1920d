//! Configuration settings for eloquent-modelgen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{GeneratorError, Result};

/// Main configuration struct for model generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// MySQL connection URL whose information schema is read
    #[serde(default)]
    pub database_url: Option<String>,

    /// SQL DDL file read instead of a live database
    #[serde(default)]
    pub schema_file: Option<PathBuf>,

    /// Remapping of database column types before PHP type resolution
    /// (e.g. `enum = "string"`)
    #[serde(default)]
    pub db_types: BTreeMap<String, String>,

    /// Values every generated model starts from
    #[serde(default)]
    pub model_defaults: ModelDefaults,

    /// Skip tables that have no `id` column
    #[serde(default = "default_only_with_id")]
    pub only_with_id: bool,

    /// Match `created_at` / `updated_at` with exact case
    #[serde(default = "default_strict_timestamp_case")]
    pub strict_timestamp_case: bool,

    /// Dry run mode - decide outcomes without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

/// The `[model_defaults]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDefaults {
    /// PHP namespace of generated classes
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Fully qualified parent class
    #[serde(default = "default_base_class_name")]
    pub base_class_name: String,

    /// Directory receiving `<ClassName>.php` files
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Emit `$timestamps = false` for every model
    #[serde(default = "default_no_timestamps")]
    pub no_timestamps: bool,

    /// Value of the `$dateFormat` property
    #[serde(default)]
    pub date_format: Option<String>,

    /// Value of the `$connection` property
    #[serde(default)]
    pub connection: Option<String>,

    /// Declare generated classes `abstract`
    #[serde(default = "default_as_abstract")]
    pub as_abstract: bool,

    /// Back up and regenerate existing model files instead of skipping them
    #[serde(default = "default_backup")]
    pub backup: bool,

    /// Tables never generated (matched case-insensitively)
    #[serde(default)]
    pub tables_to_skip: Vec<String>,
}

// Default value functions for serde
fn default_namespace() -> String {
    defaults::NAMESPACE.to_string()
}
fn default_base_class_name() -> String {
    defaults::BASE_CLASS_NAME.to_string()
}
fn default_output_path() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_PATH)
}
fn default_no_timestamps() -> bool {
    defaults::NO_TIMESTAMPS
}
fn default_as_abstract() -> bool {
    defaults::AS_ABSTRACT
}
fn default_backup() -> bool {
    defaults::BACKUP
}
fn default_only_with_id() -> bool {
    defaults::ONLY_WITH_ID
}
fn default_strict_timestamp_case() -> bool {
    defaults::STRICT_TIMESTAMP_CASE
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            base_class_name: default_base_class_name(),
            output_path: default_output_path(),
            no_timestamps: default_no_timestamps(),
            date_format: None,
            connection: None,
            as_abstract: default_as_abstract(),
            backup: default_backup(),
            tables_to_skip: Vec::new(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            schema_file: None,
            db_types: BTreeMap::new(),
            model_defaults: ModelDefaults::default(),
            only_with_id: default_only_with_id(),
            strict_timestamp_case: default_strict_timestamp_case(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a default config reading the given database
    pub fn default_with_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: Some(database_url.into()),
            ..Default::default()
        }
    }

    /// Create a default config reading the given DDL file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file: Some(schema_file),
            ..Default::default()
        }
    }

    /// Load configuration using config-rs (file + environment variables)
    ///
    /// Nested keys use a double underscore, e.g.
    /// `MODELGEN_MODEL_DEFAULTS__NAMESPACE=App\Models`.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("model_defaults.tables_to_skip")
                .try_parsing(true),
        );

        let config: GeneratorConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Lowercased names of the tables never generated
    pub fn skip_set(&self) -> HashSet<String> {
        self.model_defaults
            .tables_to_skip
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.database_url, &self.schema_file) {
            (None, None) => {
                return Err(GeneratorError::ValidationError(
                    "either database_url or schema_file is required".into(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(GeneratorError::ValidationError(
                    "database_url and schema_file are mutually exclusive".into(),
                ));
            }
            (None, Some(schema_file)) if !schema_file.exists() => {
                return Err(GeneratorError::ValidationError(format!(
                    "Schema file not found: {}",
                    schema_file.display()
                )));
            }
            _ => {}
        }

        let defaults = &self.model_defaults;
        if !is_qualified_php_name(&defaults.namespace) {
            return Err(GeneratorError::ValidationError(format!(
                "invalid namespace: {:?}",
                defaults.namespace
            )));
        }
        if !is_qualified_php_name(&defaults.base_class_name) {
            return Err(GeneratorError::ValidationError(format!(
                "invalid base class name: {:?}",
                defaults.base_class_name
            )));
        }
        if defaults.output_path.as_os_str().is_empty() {
            return Err(GeneratorError::ValidationError(
                "output_path must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// `Foo\Bar\Baz`, with an optional leading backslash
fn is_qualified_php_name(name: &str) -> bool {
    let name = name.strip_prefix('\\').unwrap_or(name);
    !name.is_empty()
        && name.split('\\').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
