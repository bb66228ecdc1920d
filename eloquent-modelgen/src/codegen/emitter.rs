//! Model emitter - decides, per table, whether a model file is written

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::config::{GenerationConfig, GeneratorConfig};
use crate::error::{GeneratorError, Result};
use crate::schema::TableDescriptor;

use super::model_generator::render_model;
use super::naming::class_name_for_table;

/// Terminal state of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOutcome {
    /// The table is listed in `tables_to_skip`
    Excluded { table_name: String },

    /// A model file is already present and backups are off
    AlreadyExists { class_name: String, path: PathBuf },

    /// Dry run: the model would have been written
    Planned {
        class_name: String,
        path: PathBuf,
        is_abstract: bool,
    },

    /// The model file was written
    Generated {
        class_name: String,
        path: PathBuf,
        is_abstract: bool,
        /// Where the previous file was moved, when one existed
        backup: Option<PathBuf>,
    },
}

impl ModelOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, ModelOutcome::Generated { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            ModelOutcome::Excluded { .. } | ModelOutcome::AlreadyExists { .. }
        )
    }
}

impl fmt::Display for ModelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelOutcome::Excluded { table_name } => {
                write!(f, "Table {} skipped: listed in tables_to_skip", table_name)
            }
            ModelOutcome::AlreadyExists { class_name, path } => write!(
                f,
                "Model {} skipped: {} already exists",
                class_name,
                path.display()
            ),
            ModelOutcome::Planned {
                class_name,
                path,
                is_abstract,
            } => write!(
                f,
                "{} {} would be generated at {}",
                model_kind(*is_abstract),
                class_name,
                path.display()
            ),
            ModelOutcome::Generated {
                class_name,
                is_abstract,
                backup,
                ..
            } => {
                write!(f, "{} {} generated", model_kind(*is_abstract), class_name)?;
                if let Some(backup) = backup {
                    write!(f, " (previous file saved to {})", backup.display())?;
                }
                Ok(())
            }
        }
    }
}

fn model_kind(is_abstract: bool) -> &'static str {
    if is_abstract {
        "Abstract model"
    } else {
        "Model"
    }
}

/// Walks tables one by one and writes their model files
pub struct ModelEmitter<'a> {
    config: &'a GeneratorConfig,
    tables_to_skip: HashSet<String>,
}

impl<'a> ModelEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            tables_to_skip: config.skip_set(),
        }
    }

    /// Emit every table in order, stopping at the first error.
    ///
    /// Two tables mapping to the same class (PHP class names are
    /// case-insensitive) fail the run before the second one is written.
    /// Files written before an error stay on disk.
    pub fn emit_all(&self, tables: &[TableDescriptor]) -> Result<Vec<ModelOutcome>> {
        let mut claimed: HashMap<String, &str> = HashMap::new();
        let mut outcomes = Vec::with_capacity(tables.len());

        for table in tables {
            if !self.is_excluded(table) {
                let class_name = class_name_for_table(&table.name)?;
                if let Some(previous) = claimed.insert(class_name.to_lowercase(), &table.name) {
                    return Err(GeneratorError::InvalidTableName(format!(
                        "{} (class name {} is already used by table {})",
                        table.name, class_name, previous
                    )));
                }
            }
            outcomes.push(self.emit(table)?);
        }

        Ok(outcomes)
    }

    fn is_excluded(&self, table: &TableDescriptor) -> bool {
        self.tables_to_skip.contains(&table.name.to_lowercase())
    }

    /// Emit a single table
    pub fn emit(&self, table: &TableDescriptor) -> Result<ModelOutcome> {
        if self.is_excluded(table) {
            debug!("Skipping excluded table {}", table.name);
            return Ok(ModelOutcome::Excluded {
                table_name: table.name.clone(),
            });
        }

        let generation = GenerationConfig::for_table(self.config, table)?;
        let path = generation.model_path();
        let exists = path.exists();

        if exists && !generation.backup {
            debug!("Model file {} exists, leaving it untouched", path.display());
            return Ok(ModelOutcome::AlreadyExists {
                class_name: generation.class_name,
                path,
            });
        }

        if self.config.dry_run {
            return Ok(ModelOutcome::Planned {
                class_name: generation.class_name,
                path,
                is_abstract: generation.as_abstract,
            });
        }

        fs::create_dir_all(&generation.output_path)?;

        let backup = if exists {
            let backup_path = generation.next_backup_path();
            debug!(
                "Backing up {} -> {}",
                path.display(),
                backup_path.display()
            );
            fs::rename(&path, &backup_path)?;
            Some(backup_path)
        } else {
            None
        };

        debug!("Generating model {} -> {}", generation.class_name, path.display());
        fs::write(&path, render_model(table, &generation))?;

        Ok(ModelOutcome::Generated {
            class_name: generation.class_name,
            path,
            is_abstract: generation.as_abstract,
            backup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDescriptor;

    fn table(name: &str) -> TableDescriptor {
        TableDescriptor::new(
            name,
            vec![ColumnDescriptor::new("id", "int", false)],
            false,
        )
    }

    fn config_in(dir: &std::path::Path) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.model_defaults.output_path = dir.to_path_buf();
        config
    }

    #[test]
    fn test_excluded_table_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.model_defaults.tables_to_skip = vec!["Migrations".to_string()];

        let outcome = ModelEmitter::new(&config).emit(&table("migrations")).unwrap();
        assert_eq!(
            outcome,
            ModelOutcome::Excluded {
                table_name: "migrations".to_string()
            }
        );
        assert!(!dir.path().join("Migrations.php").exists());
    }

    #[test]
    fn test_excluded_before_name_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.model_defaults.tables_to_skip = vec!["list".to_string()];

        let outcome = ModelEmitter::new(&config).emit(&table("list")).unwrap();
        assert!(outcome.is_skipped());
    }

    #[test]
    fn test_existing_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let existing = dir.path().join("Users.php");
        fs::write(&existing, "<?php // hand written").unwrap();

        let outcome = ModelEmitter::new(&config).emit(&table("users")).unwrap();
        assert!(matches!(outcome, ModelOutcome::AlreadyExists { .. }));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "<?php // hand written");
        assert!(outcome.to_string().contains("already exists"));
    }

    #[test]
    fn test_backup_moves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.model_defaults.backup = true;
        let existing = dir.path().join("Users.php");
        fs::write(&existing, "<?php // old").unwrap();

        let outcome = ModelEmitter::new(&config).emit(&table("users")).unwrap();
        let backup = dir.path().join("Users.php.bak");
        assert_eq!(
            outcome,
            ModelOutcome::Generated {
                class_name: "Users".to_string(),
                path: existing.clone(),
                is_abstract: false,
                backup: Some(backup.clone()),
            }
        );
        assert_eq!(fs::read_to_string(&backup).unwrap(), "<?php // old");
        assert!(fs::read_to_string(&existing)
            .unwrap()
            .contains("class Users extends Model"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("models");
        let mut config = config_in(&output);
        config.dry_run = true;

        let outcome = ModelEmitter::new(&config).emit(&table("users")).unwrap();
        assert!(matches!(outcome, ModelOutcome::Planned { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("app").join("Models");
        let config = config_in(&output);

        let outcomes = ModelEmitter::new(&config)
            .emit_all(&[table("users"), table("logs")])
            .unwrap();
        assert!(outcomes.iter().all(ModelOutcome::is_generated));
        assert!(output.join("Users.php").exists());
        assert!(output.join("Logs.php").exists());
        assert_eq!(outcomes[1].to_string(), "Model Logs generated");
    }

    #[test]
    fn test_class_name_collision_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.model_defaults.backup = true;

        let result = ModelEmitter::new(&config)
            .emit_all(&[table("user_profiles"), table("user-profiles")]);
        match result {
            Err(GeneratorError::InvalidTableName(msg)) => {
                assert!(msg.contains("user-profiles"));
                assert!(msg.contains("user_profiles"));
            }
            other => panic!("expected InvalidTableName, got {:?}", other),
        }

        let written = fs::read_to_string(dir.path().join("UserProfiles.php")).unwrap();
        assert!(written.contains("protected $table = 'user_profiles';"));
        assert!(!dir.path().join("UserProfiles.php.bak").exists());
    }

    #[test]
    fn test_class_name_collision_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.dry_run = true;

        let result = ModelEmitter::new(&config).emit_all(&[table("Users"), table("users")]);
        assert!(matches!(result, Err(GeneratorError::InvalidTableName(_))));
    }

    #[test]
    fn test_excluded_table_does_not_claim_class_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.model_defaults.tables_to_skip = vec!["user-profiles".to_string()];

        let outcomes = ModelEmitter::new(&config)
            .emit_all(&[table("user-profiles"), table("user_profiles")])
            .unwrap();
        assert!(outcomes[0].is_skipped());
        assert!(outcomes[1].is_generated());
    }

    #[test]
    fn test_backup_keeps_earlier_backups() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.model_defaults.backup = true;
        let existing = dir.path().join("Users.php");
        fs::write(&existing, "<?php // first").unwrap();

        let emitter = ModelEmitter::new(&config);
        emitter.emit(&table("users")).unwrap();
        fs::write(&existing, "<?php // second").unwrap();
        let outcome = emitter.emit(&table("users")).unwrap();

        let second_backup = dir.path().join("Users.php.bak.1");
        assert!(matches!(
            outcome,
            ModelOutcome::Generated { backup: Some(ref path), .. } if *path == second_backup
        ));
        assert_eq!(
            fs::read_to_string(dir.path().join("Users.php.bak")).unwrap(),
            "<?php // first"
        );
        assert_eq!(fs::read_to_string(&second_backup).unwrap(), "<?php // second");
    }
}
