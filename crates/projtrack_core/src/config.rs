//! Application configuration.
//!
//! # Responsibility
//! - Name the page elements the views mount into.
//! - Hold the form validation bounds and logging settings.
//!
//! # Invariants
//! - Every field has a default, so partial JSON files are accepted.
//! - Validation bounds are exclusive on both ends.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Ids of the templates and host element the page must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageIds {
    pub host: String,
    pub input_template: String,
    pub list_template: String,
    pub item_template: String,
}

impl Default for PageIds {
    fn default() -> Self {
        Self {
            host: "app".to_string(),
            input_template: "project-input".to_string(),
            list_template: "project-list".to_string(),
            item_template: "single-project".to_string(),
        }
    }
}

/// Exclusive bounds applied to the project form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLimits {
    /// Description length must be greater than this.
    pub description_min_length: usize,
    /// Description length must be less than this.
    pub description_max_length: usize,
    /// People count must be greater than this.
    pub people_min: u32,
    /// People count must be less than this.
    pub people_max: u32,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            description_min_length: 0,
            description_max_length: 501,
            people_min: 0,
            people_max: 31,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page: PageIds,
    pub limits: FormLimits,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, FormLimits, PageIds};
    use std::io::Write;

    #[test]
    fn defaults_match_page_contract() {
        let config = AppConfig::default();
        assert_eq!(config.page.host, "app");
        assert_eq!(config.page.input_template, "project-input");
        assert_eq!(config.page.list_template, "project-list");
        assert_eq!(config.page.item_template, "single-project");
        assert_eq!(config.limits.description_max_length, 501);
        assert_eq!(config.limits.people_max, 31);
        assert_eq!(config.logging.dir, None);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config =
            AppConfig::from_json_str(r#"{ "limits": { "people_max": 11 }, "page": { "host": "root" } }"#)
                .unwrap();
        assert_eq!(config.limits.people_max, 11);
        assert_eq!(config.limits.description_max_length, 501);
        assert_eq!(config.page.host, "root");
        assert_eq!(config.page.item_template, PageIds::default().item_template);
    }

    #[test]
    fn empty_object_is_default_config() {
        assert_eq!(AppConfig::from_json_str("{}").unwrap(), AppConfig::default());
        assert_eq!(FormLimits::default().people_min, 0);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = AppConfig::from_json_str("{ limits: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "logging": {{ "level": "warn" }} }}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");

        let missing = file.path().with_extension("missing");
        let err = AppConfig::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("failed to read config"));
    }
}
