// ==========================================
// Rework Tracker - Role Use Cases
// ==========================================
// One use case per audience. Each answers "what does this role
// need to see" with a typed metric set, grouped tables, time series
// and an ordered list of insight rules.
// ==========================================

pub mod cutting_manager;
pub mod ops_director;
pub mod production_manager;
pub mod qc_manager;
pub mod sewing_manager;

use crate::config::PipelineConfig;
use crate::decision::insight_generator::InsightRule;
use crate::decision::models::MetricSet;
use crate::domain::Role;
use crate::engine::{GroupedTable, ReworkView, TimeSeries};

pub use cutting_manager::{CuttingManagerView, CuttingMetrics};
pub use ops_director::{OpsDirectorMetrics, OpsDirectorView};
pub use production_manager::{ProductionManagerView, ProductionMetrics};
pub use qc_manager::{QcManagerView, QcMetrics};
pub use sewing_manager::{SewingManagerView, SewingMetrics};

/// A role-specific view over the canonical records.
///
/// Every method is a pure function of its inputs; the same view and
/// config always produce the same metrics, tables and series.
pub trait RoleView {
    type Metrics: MetricSet;

    fn role(&self) -> Role;

    fn compute_metrics(&self, view: &ReworkView<'_>, config: &PipelineConfig) -> Self::Metrics;

    fn build_tables(&self, view: &ReworkView<'_>, config: &PipelineConfig) -> Vec<GroupedTable>;

    fn build_series(&self, view: &ReworkView<'_>) -> Vec<TimeSeries>;

    /// Rules in priority order
    fn insight_rules(&self) -> Vec<InsightRule<Self::Metrics>>;
}
