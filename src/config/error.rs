// ==========================================
// Rework Tracker - Config Error Types
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not readable: {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("config file is not valid JSON: {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("invalid config value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
