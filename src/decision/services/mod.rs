// ==========================================
// Rework Tracker - Decision Services
// ==========================================

pub mod report_service;

pub use report_service::{build_role_report, ReportService};
