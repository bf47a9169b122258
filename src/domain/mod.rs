// ==========================================
// Rework Tracker - Domain Layer
// ==========================================
// Responsibility: entities, types and data-quality vocabulary
// No parsing, no aggregation logic here
// ==========================================

pub mod dq;
pub mod rework;
pub mod types;

pub use dq::{DqIssue, DqLevel, DqReport, DqSummary, DqViolation};
pub use rework::{RawRecutRow, RawRepairRow, RecutRecord, RepairRecord, ReworkDataset};
pub use types::{DiscoveryLocation, ErrorSource, Granularity, Role, SourceTable};
