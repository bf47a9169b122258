// ==========================================
// Rework Tracker - API Layer
// ==========================================
// Responsibility: entry points for the CLI and any rendering layer
// ==========================================

pub mod dashboard_api;
pub mod error;

pub use dashboard_api::{DashboardApi, ReportQuery};
pub use error::{ApiError, ApiResult};
