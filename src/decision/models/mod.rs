// ==========================================
// Rework Tracker - Decision Objects
// ==========================================

pub mod insight;
pub mod metric;
pub mod role_report;

pub use insight::{Insight, InsightLevel};
pub use metric::{with_trends, Metric, MetricSet, MetricValue};
pub use role_report::RoleReport;
