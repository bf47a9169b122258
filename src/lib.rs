// ==========================================
// Rework Tracker - Core Library
// ==========================================
// Pipeline: repairs sheet + recut list → canonical records
//           → per-role metrics, tables, series, insights
// Single-threaded batch: every stage is a pure transformation
// ==========================================

// insight templates
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// Modules
// ==========================================

// domain layer - entities and types
pub mod domain;

// importer layer - external tables
pub mod importer;

// config layer
pub mod config;

// engine layer - aggregation primitives
pub mod engine;

// decision layer - role views
pub mod decision;

// API layer
pub mod api;

// logging
pub mod logging;

// i18n
pub mod i18n;

#[cfg(test)]
mod test_support;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    DiscoveryLocation, DqReport, ErrorSource, Granularity, RecutRecord, RepairRecord,
    ReworkDataset, Role, SourceTable,
};

pub use importer::{parent_sku, ErrorSourceClassifier, RecordBuilder, ReworkImporter};

pub use config::{ConfigManager, PipelineConfig};

pub use engine::{DateRange, GroupedTable, ReworkView, TimeSeries, Trend};

pub use decision::{Insight, InsightLevel, Metric, ReportService, RoleReport};

pub use api::{ApiError, ApiResult, DashboardApi, ReportQuery};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Rework Tracker";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
