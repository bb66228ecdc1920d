//! eloquent-modelgen: Generate Laravel Eloquent model classes from a MySQL schema
//!
//! This crate provides both a CLI tool and a library. It reads the base tables
//! of a database (through `INFORMATION_SCHEMA`, or offline from a DDL file
//! parsed with `sqlparser-rs`) and writes one `<ClassName>.php` model per table.
//!
//! - Tables listed in `tables_to_skip` are never generated
//! - Existing model files are left untouched unless backups are enabled
//! - Tables without `created_at` / `updated_at` get `$timestamps = false`
//!
//! # CLI Usage
//!
//! ```bash
//! eloquent-modelgen --database-url mysql://root@localhost/app \
//!     --namespace 'App\Models' --output-path app/Models
//! ```
//!
//! # Library Usage
//!
//! ```rust,ignore
//! let outcomes = eloquent_modelgen::ModelGeneratorBuilder::from_database(url)
//!     .namespace("App\\Models")
//!     .output_path("app/Models")
//!     .as_abstract()
//!     .generate()
//!     .await?;
//!
//! for outcome in &outcomes {
//!     println!("{}", outcome);
//! }
//! ```
//!
//! # Configuration file
//!
//! ```toml
//! database_url = "mysql://root@localhost/app"
//! only_with_id = true
//!
//! [db_types]
//! enum = "string"
//!
//! [model_defaults]
//! namespace = "App\\Models"
//! output_path = "app/Models"
//! tables_to_skip = ["migrations", "password_resets"]
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod schema;

use std::path::Path;

use tracing::{debug, info};

pub use codegen::{ModelEmitter, ModelOutcome};
pub use config::{GenerationConfig, GeneratorConfig};
pub use error::{GeneratorError, Result};
pub use schema::{DdlSchemaSource, MySqlSchemaSource, SchemaSource, TableDescriptor};

/// Main entry point: read the configured schema and emit models
pub async fn generate(config: &GeneratorConfig) -> Result<Vec<ModelOutcome>> {
    let tables = read_tables(config).await?;
    generate_from_tables(tables, config)
}

/// Emit models for tables that were already read
pub fn generate_from_tables(
    tables: Vec<TableDescriptor>,
    config: &GeneratorConfig,
) -> Result<Vec<ModelOutcome>> {
    let total = tables.len();
    let tables = filter_tables(tables, config.only_with_id);
    debug!(
        "After filtering: {} of {} tables (only_with_id={})",
        tables.len(),
        total,
        config.only_with_id
    );

    info!("Generating models in {:?}", config.model_defaults.output_path);
    let outcomes = ModelEmitter::new(config).emit_all(&tables)?;

    let generated = outcomes.iter().filter(|o| o.is_generated()).count();
    info!(
        "Model generation complete: {} generated, {} skipped",
        generated,
        outcomes.len() - generated
    );
    Ok(outcomes)
}

/// Read table descriptors from whichever source the configuration names
pub async fn read_tables(config: &GeneratorConfig) -> Result<Vec<TableDescriptor>> {
    let tables = if let Some(url) = &config.database_url {
        info!("Reading information schema");
        let source = MySqlSchemaSource::new(url, config.strict_timestamp_case)?;
        let tables = source.read_tables().await;
        source.disconnect().await?;
        tables?
    } else if let Some(schema_file) = &config.schema_file {
        info!("Parsing schema: {:?}", schema_file);
        DdlSchemaSource::new(schema_file, config.strict_timestamp_case)
            .read_tables()
            .await?
    } else {
        return Err(GeneratorError::ValidationError(
            "either database_url or schema_file is required".into(),
        ));
    };

    info!("Found {} tables", tables.len());
    Ok(tables)
}

/// Drop tables without an `id` column when `only_with_id` is set
fn filter_tables(tables: Vec<TableDescriptor>, only_with_id: bool) -> Vec<TableDescriptor> {
    if !only_with_id {
        return tables;
    }
    tables.into_iter().filter(|t| t.has_id_column).collect()
}

/// Builder pattern for programmatic use
pub struct ModelGeneratorBuilder {
    config: GeneratorConfig,
}

impl ModelGeneratorBuilder {
    /// Read the schema from a live MySQL database
    pub fn from_database(url: impl Into<String>) -> Self {
        Self {
            config: GeneratorConfig::default_with_database(url),
        }
    }

    /// Read the schema from a SQL DDL file
    pub fn from_schema_file(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: GeneratorConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Directory receiving the model files
    pub fn output_path(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.model_defaults.output_path = dir.as_ref().to_path_buf();
        self
    }

    /// PHP namespace of the models
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.config.model_defaults.namespace = namespace.to_string();
        self
    }

    /// Fully qualified parent class
    pub fn base_class_name(mut self, base_class_name: &str) -> Self {
        self.config.model_defaults.base_class_name = base_class_name.to_string();
        self
    }

    /// Declare every model `abstract`
    pub fn as_abstract(mut self) -> Self {
        self.config.model_defaults.as_abstract = true;
        self
    }

    /// Disable timestamps on every model
    pub fn no_timestamps(mut self) -> Self {
        self.config.model_defaults.no_timestamps = true;
        self
    }

    /// Set the `$dateFormat` property
    pub fn date_format(mut self, date_format: &str) -> Self {
        self.config.model_defaults.date_format = Some(date_format.to_string());
        self
    }

    /// Set the `$connection` property
    pub fn connection(mut self, connection: &str) -> Self {
        self.config.model_defaults.connection = Some(connection.to_string());
        self
    }

    /// Back up and regenerate existing model files
    pub fn backup(mut self) -> Self {
        self.config.model_defaults.backup = true;
        self
    }

    /// Only generate tables that have an `id` column
    pub fn only_with_id(mut self) -> Self {
        self.config.only_with_id = true;
        self
    }

    /// Tables never generated
    pub fn tables_to_skip(mut self, tables: &[&str]) -> Self {
        self.config.model_defaults.tables_to_skip =
            tables.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Remap a database type before PHP type resolution
    pub fn db_type(mut self, from: &str, to: &str) -> Self {
        self.config
            .db_types
            .insert(from.to_lowercase(), to.to_string());
        self
    }

    /// Match `created_at` / `updated_at` with exact case
    pub fn strict_timestamp_case(mut self) -> Self {
        self.config.strict_timestamp_case = true;
        self
    }

    /// Enable dry run mode (decide outcomes without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validate and generate
    pub async fn generate(self) -> Result<Vec<ModelOutcome>> {
        self.config.validate()?;
        generate(&self.config).await
    }
}

impl From<GeneratorConfig> for ModelGeneratorBuilder {
    fn from(config: GeneratorConfig) -> Self {
        Self { config }
    }
}
