// ==========================================
// Rework Tracker - Decision Layer Common
// ==========================================

pub mod aggregations;

pub use aggregations::{
    error_source_breakdown, repairs_by_parent_sku, rework_events, source_totals,
    DetectionCounts, RepairTotals, SourceTotals,
};
