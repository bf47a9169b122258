// ==========================================
// Rework Tracker - Decision Layer
// ==========================================
// Responsibility: per-role metrics, tables, series and insights
// ==========================================
// Layering:
// - engine/ supplies filtering, grouping and series primitives
// - use_cases/ decide what each role sees
// - services/ assemble a RoleReport for one (role, window) request
// ==========================================

// decision objects
pub mod models;

// shared roll-ups
pub mod common;

// insight rules + generator
pub mod insight_generator;

// role views
pub mod use_cases;

// report assembly
pub mod services;

pub use insight_generator::{InsightContext, InsightGenerator, InsightRule};
pub use models::{Insight, InsightLevel, Metric, MetricSet, MetricValue, RoleReport};
pub use services::{build_role_report, ReportService};
pub use use_cases::{
    CuttingManagerView, CuttingMetrics, OpsDirectorMetrics, OpsDirectorView,
    ProductionManagerView, ProductionMetrics, QcManagerView, QcMetrics, RoleView,
    SewingManagerView, SewingMetrics,
};
