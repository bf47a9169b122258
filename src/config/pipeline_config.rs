// ==========================================
// Rework Tracker - Pipeline Configuration
// ==========================================
// Thresholds, caps and sheet names used by the pipeline.
// Every field has a default; a config file only overrides what it names.
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Locales with shipped insight templates
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    // ===== Workbook layout =====
    /// Order-level repairs sheet
    pub repairs_sheet: String,
    /// Piece-level recut sheet
    pub recuts_sheet: String,

    // ===== Cleaning =====
    /// Drop rows whose rework quantities are all zero
    pub drop_zero_quantity_rows: bool,

    // ===== Insights =====
    pub max_insights: usize,
    pub locale: String,

    // ===== Thresholds (percent / minutes) =====
    pub sewing_detection_target_pct: f64,
    pub qc_majority_pct: f64,
    pub avg_repair_time_alert_min: f64,
    pub dominant_source_pct: f64,
    pub poor_inline_detection_pct: f64,
    pub trend_alert_pct: f64,

    // ===== Table caps =====
    pub top_n_skus: usize,
    pub top_n_error_types: usize,
    pub top_n_investment: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            repairs_sheet: "2025 Sewing Repairs".to_string(),
            recuts_sheet: "Recut List".to_string(),
            drop_zero_quantity_rows: false,
            max_insights: 5,
            locale: "en".to_string(),
            sewing_detection_target_pct: 70.0,
            qc_majority_pct: 50.0,
            avg_repair_time_alert_min: 10.0,
            dominant_source_pct: 40.0,
            poor_inline_detection_pct: 50.0,
            trend_alert_pct: 20.0,
            top_n_skus: 10,
            top_n_error_types: 5,
            top_n_investment: 15,
        }
    }
}

impl PipelineConfig {
    /// Reject configurations no report can be computed with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.repairs_sheet.trim().is_empty() {
            return Err(invalid("repairs_sheet", "must not be blank"));
        }
        if self.recuts_sheet.trim().is_empty() {
            return Err(invalid("recuts_sheet", "must not be blank"));
        }
        if self.max_insights == 0 {
            return Err(invalid("max_insights", "must be at least 1"));
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(invalid(
                "locale",
                &format!("'{}' not in {:?}", self.locale, SUPPORTED_LOCALES),
            ));
        }

        let percentages = [
            ("sewing_detection_target_pct", self.sewing_detection_target_pct),
            ("qc_majority_pct", self.qc_majority_pct),
            ("dominant_source_pct", self.dominant_source_pct),
            ("poor_inline_detection_pct", self.poor_inline_detection_pct),
            ("trend_alert_pct", self.trend_alert_pct),
        ];
        for (key, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(key, &format!("{} outside [0, 100]", value)));
            }
        }

        if !self.avg_repair_time_alert_min.is_finite() || self.avg_repair_time_alert_min < 0.0 {
            return Err(invalid("avg_repair_time_alert_min", "must be a non-negative number"));
        }

        let caps = [
            ("top_n_skus", self.top_n_skus),
            ("top_n_error_types", self.top_n_error_types),
            ("top_n_investment", self.top_n_investment),
        ];
        for (key, value) in caps {
            if value == 0 {
                return Err(invalid(key, "must be at least 1"));
            }
        }

        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
