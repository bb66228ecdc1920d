//! CLI entry point for eloquent-modelgen

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eloquent_modelgen::config::GeneratorConfig;

#[derive(Parser)]
#[command(name = "eloquent-modelgen")]
#[command(about = "Generate Laravel Eloquent model classes from a MySQL information schema")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format); defaults to ./modelgen.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MySQL connection URL to read the information schema from (overrides config)
    #[arg(long, conflicts_with = "schema")]
    database_url: Option<String>,

    /// SQL DDL file to read instead of a live database (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    model: ModelArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options applied to every generated model
#[derive(Args)]
struct ModelArgs {
    /// Class will be generated as abstract
    #[arg(long = "as-abstract", visible_alias = "aa")]
    as_abstract: bool,

    /// Directory to store generated models
    #[arg(long = "output-path", visible_alias = "op")]
    output_path: Option<PathBuf>,

    /// Namespace of the models
    #[arg(long, visible_alias = "ns")]
    namespace: Option<String>,

    /// Model parent class
    #[arg(long = "base-class-name", visible_alias = "bc")]
    base_class_name: Option<String>,

    /// Set timestamps property to false
    #[arg(long = "no-timestamps", visible_alias = "ts")]
    no_timestamps: bool,

    /// dateFormat property
    #[arg(long = "date-format", visible_alias = "df")]
    date_format: Option<String>,

    /// connection property
    #[arg(long, visible_alias = "cn")]
    connection: Option<String>,

    /// Backup existing models and regenerate them
    #[arg(short, long)]
    backup: bool,

    /// Only generate models for tables that have an `id` column
    #[arg(long = "only-with-id")]
    only_with_id: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate models (default)
    Generate,
    /// Inspect schema (show the tables that were read, for debugging)
    Inspect,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = GeneratorConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Apply CLI overrides
    apply_overrides(&mut config, &cli);

    // Validate configuration
    config.validate()?;

    if let Some(Commands::Inspect) = &cli.command {
        return inspect_schema(&config).await;
    }

    if config.dry_run {
        println!("Dry run mode - would generate:");
    }

    let outcomes = eloquent_modelgen::generate(&config).await?;
    for outcome in &outcomes {
        println!("{}", outcome);
    }

    info!("Model generation completed successfully");
    Ok(())
}

/// CLI values win over the configuration file and environment
fn apply_overrides(config: &mut GeneratorConfig, cli: &Cli) {
    if let Some(url) = &cli.database_url {
        config.database_url = Some(url.clone());
        config.schema_file = None;
    }
    if let Some(schema) = &cli.schema {
        config.schema_file = Some(schema.clone());
        config.database_url = None;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    let model = &cli.model;
    let defaults = &mut config.model_defaults;
    if model.as_abstract {
        defaults.as_abstract = true;
    }
    if let Some(output_path) = &model.output_path {
        defaults.output_path = output_path.clone();
    }
    if let Some(namespace) = &model.namespace {
        defaults.namespace = namespace.clone();
    }
    if let Some(base_class_name) = &model.base_class_name {
        defaults.base_class_name = base_class_name.clone();
    }
    if model.no_timestamps {
        defaults.no_timestamps = true;
    }
    if let Some(date_format) = &model.date_format {
        defaults.date_format = Some(date_format.clone());
    }
    if let Some(connection) = &model.connection {
        defaults.connection = Some(connection.clone());
    }
    if model.backup {
        defaults.backup = true;
    }
    if model.only_with_id {
        config.only_with_id = true;
    }
}

async fn inspect_schema(config: &GeneratorConfig) -> Result<()> {
    let tables = eloquent_modelgen::read_tables(config).await?;
    let skip = config.skip_set();

    println!("Read {} tables:\n", tables.len());
    for table in &tables {
        let mut flags = Vec::new();
        if !table.has_timestamp_columns {
            flags.push("no timestamps");
        }
        if !table.has_id_column {
            flags.push("no id");
        }
        if skip.contains(&table.name.to_lowercase()) {
            flags.push("skipped");
        }

        if flags.is_empty() {
            println!("Table: {}", table.name);
        } else {
            println!("Table: {} ({})", table.name, flags.join(", "));
        }
        for col in &table.columns {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            println!("    - {} {} {}", col.name, col.data_type, nullable);
        }
        println!();
    }

    Ok(())
}
