// ==========================================
// Rework Tracker - API Error Types
// ==========================================
// Responsibility: one error type for callers of the API layer;
// lower-layer errors are converted to messages that name the cause
// ==========================================

use crate::config::ConfigError;
use crate::engine::InvalidDateRange;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Request errors
    // ==========================================
    #[error(transparent)]
    InvalidDateRange(#[from] InvalidDateRange),

    // ==========================================
    // Configuration errors
    // ==========================================
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // Import errors
    // ==========================================
    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    // ==========================================
    // Generic
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_conversions_keep_cause() {
        let range_err = InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        let api: ApiError = range_err.into();
        assert!(api.to_string().contains("2025-02-01"));

        let api: ApiError = ImportError::SheetNotFound("Recut List".to_string()).into();
        assert!(matches!(api, ApiError::Import(_)));
        assert!(api.to_string().contains("Recut List"));
    }
}
