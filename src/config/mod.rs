// ==========================================
// Rework Tracker - Config Layer
// ==========================================
// Responsibility: pipeline configuration (JSON file + defaults)
// ==========================================

pub mod config_manager;
pub mod error;
pub mod pipeline_config;

pub use config_manager::{default_config_path, ConfigManager, CONFIG_PATH_ENV};
pub use error::{ConfigError, ConfigResult};
pub use pipeline_config::{PipelineConfig, SUPPORTED_LOCALES};
