//! Per-table generation configuration

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::defaults;
use super::settings::GeneratorConfig;
use crate::codegen::{class_name_for_table, to_file_name};
use crate::error::Result;
use crate::schema::TableDescriptor;

/// Fully resolved settings for one model.
///
/// Built fresh for every table from the run's [`GeneratorConfig`]; the
/// table-specific values (`table_name`, `class_name`, `no_timestamps`)
/// always win over the global ones.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub table_name: String,
    pub class_name: String,
    pub namespace: String,
    pub base_class_name: String,
    pub output_path: PathBuf,
    pub no_timestamps: bool,
    pub date_format: Option<String>,
    pub connection: Option<String>,
    pub as_abstract: bool,
    pub backup: bool,
    pub db_types: BTreeMap<String, String>,
}

impl GenerationConfig {
    /// Specialize the run configuration for a table
    pub fn for_table(config: &GeneratorConfig, table: &TableDescriptor) -> Result<Self> {
        let defaults = &config.model_defaults;

        Ok(Self {
            table_name: table.name.clone(),
            class_name: class_name_for_table(&table.name)?,
            namespace: trim_namespace(&defaults.namespace),
            base_class_name: defaults.base_class_name.trim_start_matches('\\').to_string(),
            output_path: defaults.output_path.clone(),
            no_timestamps: !table.has_timestamp_columns || defaults.no_timestamps,
            date_format: non_empty(&defaults.date_format),
            connection: non_empty(&defaults.connection),
            as_abstract: defaults.as_abstract,
            backup: defaults.backup,
            db_types: config.db_types.clone(),
        })
    }

    /// `<output_path>/<ClassName>.php`
    pub fn model_path(&self) -> PathBuf {
        self.output_path
            .join(to_file_name(&self.class_name, defaults::FILE_EXTENSION))
    }

    /// `<output_path>/<ClassName>.php.bak`
    pub fn backup_path(&self) -> PathBuf {
        let file_name = to_file_name(&self.class_name, defaults::FILE_EXTENSION);
        self.output_path
            .join(format!("{}.{}", file_name, defaults::BACKUP_EXTENSION))
    }

    /// First backup path not yet on disk: `<ClassName>.php.bak`, then
    /// `<ClassName>.php.bak.1`, `<ClassName>.php.bak.2` and so on
    pub fn next_backup_path(&self) -> PathBuf {
        let first = self.backup_path();
        if !first.exists() {
            return first;
        }

        let mut n = 1u32;
        loop {
            let mut candidate = first.clone().into_os_string();
            candidate.push(format!(".{}", n));
            let candidate = PathBuf::from(candidate);
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Short name of the parent class, e.g. `Model`
    pub fn base_class_short_name(&self) -> &str {
        self.base_class_name
            .rsplit('\\')
            .next()
            .unwrap_or(&self.base_class_name)
    }
}

fn trim_namespace(namespace: &str) -> String {
    namespace.trim_matches('\\').to_string()
}

/// Blank values count as unset; anything else is kept verbatim
fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}
