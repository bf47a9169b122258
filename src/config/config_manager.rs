// ==========================================
// Rework Tracker - Config Manager
// ==========================================
// Responsibility: locate, read and validate PipelineConfig
// Lookup order: explicit path → REWORK_TRACKER_CONFIG →
//               <config_dir>/rework-tracker/config.json → defaults
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::pipeline_config::PipelineConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment override for the config file location
pub const CONFIG_PATH_ENV: &str = "REWORK_TRACKER_CONFIG";

const APP_DIR: &str = "rework-tracker";
const CONFIG_FILE: &str = "config.json";

pub struct ConfigManager {
    path: Option<PathBuf>,
    explicit: bool,
}

impl ConfigManager {
    /// Manager bound to an explicit config file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            explicit: true,
        }
    }

    /// Manager that resolves the default location
    pub fn from_default_location() -> Self {
        Self {
            path: default_config_path(),
            explicit: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load and validate.
    ///
    /// An explicit path must exist; a default-location file that is
    /// absent yields `PipelineConfig::default()`.
    pub fn load(&self) -> ConfigResult<PipelineConfig> {
        let config = match &self.path {
            Some(path) if path.exists() => read_config(path)?,
            Some(path) if self.explicit => {
                return Err(ConfigError::Unreadable {
                    path: path.display().to_string(),
                    message: "file does not exist".to_string(),
                });
            }
            _ => {
                debug!("no config file, using defaults");
                PipelineConfig::default()
            }
        };

        config.validate()?;
        Ok(config)
    }
}

/// `<config_dir>/rework-tracker/config.json`, or the env override
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn read_config(path: &Path) -> ConfigResult<PipelineConfig> {
    let shown = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: shown.clone(),
        message: e.to_string(),
    })?;

    let config: PipelineConfig =
        serde_json::from_str(&raw).map_err(|e| ConfigError::Malformed {
            path: shown.clone(),
            message: e.to_string(),
        })?;

    info!(path = %shown, "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_insights": 2, "trend_alert_pct": 15 }}"#).unwrap();

        let config = ConfigManager::new(file.path()).load().unwrap();

        assert_eq!(config.max_insights, 2);
        assert_eq!(config.trend_alert_pct, 15.0);
        assert_eq!(config.recuts_sheet, "Recut List");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = ConfigManager::new(file.path()).load();
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_insights": 0 }}"#).unwrap();

        let result = ConfigManager::new(file.path()).load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = ConfigManager::new("/definitely/not/here/config.json").load();
        assert!(matches!(result, Err(ConfigError::Unreadable { .. })));
    }
}
