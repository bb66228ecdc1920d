//! Default configuration values - single source of truth

/// Default PHP namespace for generated models
pub const NAMESPACE: &str = "App";

/// Default parent class of generated models
pub const BASE_CLASS_NAME: &str = "Illuminate\\Database\\Eloquent\\Model";

/// Default output directory for generated models
pub const OUTPUT_PATH: &str = "./app";

/// Whether generated models disable timestamps by default
pub const NO_TIMESTAMPS: bool = false;

/// Whether generated classes are abstract by default
pub const AS_ABSTRACT: bool = false;

/// Whether existing model files are backed up and regenerated by default
pub const BACKUP: bool = false;

/// Whether tables without an `id` column are skipped by default
pub const ONLY_WITH_ID: bool = false;

/// Whether `created_at` / `updated_at` detection is case-sensitive by default
pub const STRICT_TIMESTAMP_CASE: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Extension of generated model files
pub const FILE_EXTENSION: &str = "php";

/// Extension appended to a model file when it is backed up
pub const BACKUP_EXTENSION: &str = "bak";

/// Default configuration file looked up when none is given
pub const CONFIG_FILE: &str = "modelgen";

/// Prefix of environment variables overriding configuration
pub const ENV_PREFIX: &str = "MODELGEN";
