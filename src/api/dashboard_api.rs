// ==========================================
// Rework Tracker - Dashboard API
// ==========================================
// Responsibility: output contract toward the rendering layer
// Architecture: API → importer (load) / decision services (reports)
// ==========================================

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::ApiResult;
use crate::config::{ConfigManager, PipelineConfig};
use crate::decision::{ReportService, RoleReport};
use crate::domain::{ReworkDataset, Role};
use crate::engine::DateRange;
use crate::importer::ReworkImporter;

// ==========================================
// ReportQuery
// ==========================================

/// Date window of a report request.
///
/// Missing bounds default to the dataset's own first/last date.
/// `compare_prior` asks for trends against the equal-length window
/// that ends the day before `start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub compare_prior: bool,
}

impl ReportQuery {
    pub fn all_data() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            compare_prior: false,
        }
    }

    pub fn with_prior(mut self) -> Self {
        self.compare_prior = true;
        self
    }

    /// (current window, prior window) for a dataset.
    ///
    /// A single given bound is never inverted by the filled one: the
    /// open side is clamped to it, or copied from it when the dataset
    /// has no records.
    fn resolve(&self, span: Option<DateRange>) -> ApiResult<(Option<DateRange>, Option<DateRange>)> {
        let period = match (self.start, self.end, span) {
            (None, None, _) if !self.compare_prior => None,
            (Some(start), Some(end), _) => Some(DateRange::new(start, end)?),
            (None, None, span) => span,
            (Some(start), None, span) => {
                let end = span.map_or(start, |s| s.end.max(start));
                Some(DateRange::new(start, end)?)
            }
            (None, Some(end), span) => {
                let start = span.map_or(end, |s| s.start.min(end));
                Some(DateRange::new(start, end)?)
            }
        };

        let prior = if self.compare_prior {
            period.map(|p| p.preceding())
        } else {
            None
        };

        Ok((period, prior))
    }
}

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi {
    importer: ReworkImporter,
    reports: ReportService,
}

impl DashboardApi {
    /// Create an API over a validated configuration
    pub fn new(config: PipelineConfig) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            importer: ReworkImporter::new(&config),
            reports: ReportService::new(config),
        })
    }

    /// Load configuration from `path`, or from the default location when None
    pub fn from_config_file(path: Option<&Path>) -> ApiResult<Self> {
        let manager = match path {
            Some(p) => ConfigManager::new(p),
            None => ConfigManager::from_default_location(),
        };
        Self::new(manager.load()?)
    }

    pub fn config(&self) -> &PipelineConfig {
        self.reports.config()
    }

    // ==========================================
    // Loading
    // ==========================================

    /// Read both sheets of a workbook into a canonical dataset
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_workbook<P: AsRef<Path>>(&self, path: P) -> ApiResult<ReworkDataset> {
        let dataset = self.importer.import_workbook(path)?;
        log_loaded(&dataset);
        Ok(dataset)
    }

    /// Read one CSV per table into a canonical dataset
    pub fn load_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        repairs: P,
        recuts: Q,
    ) -> ApiResult<ReworkDataset> {
        let dataset = self.importer.import_csv(repairs, recuts)?;
        log_loaded(&dataset);
        Ok(dataset)
    }

    // ==========================================
    // Reports
    // ==========================================

    pub fn build_report(
        &self,
        dataset: &ReworkDataset,
        role: Role,
        query: &ReportQuery,
    ) -> ApiResult<RoleReport> {
        let (period, prior) = query.resolve(self.data_span(dataset))?;
        Ok(self.reports.build(dataset, role, period, prior))
    }

    /// One report per role, in Role::ALL order
    pub fn build_all_reports(
        &self,
        dataset: &ReworkDataset,
        query: &ReportQuery,
    ) -> ApiResult<Vec<RoleReport>> {
        let (period, prior) = query.resolve(self.data_span(dataset))?;
        Ok(Role::ALL
            .iter()
            .map(|role| self.reports.build(dataset, *role, period, prior))
            .collect())
    }

    /// First and last record date across both tables
    pub fn data_span(&self, dataset: &ReworkDataset) -> Option<DateRange> {
        dataset
            .date_span()
            .map(|(start, end)| DateRange { start, end })
    }
}

fn log_loaded(dataset: &ReworkDataset) {
    let dq = &dataset.dq_report;
    info!(
        batch_id = %dq.batch_id,
        repairs = dataset.repairs.len(),
        recuts = dataset.recuts.len(),
        dropped = dq.repairs.dropped + dq.recuts.dropped,
        violations = dq.violations.len(),
        "dataset loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::test_support::{date, recut, repair};

    fn dataset() -> ReworkDataset {
        ReworkDataset {
            repairs: vec![
                repair("2025-01-06", "TRK100-BK", "A1A", 2, 20, 0),
                repair("2025-01-20", "TRK100-CB", "S1", 3, 30, 1),
            ],
            recuts: vec![recut("2025-01-10", "TRK100-BK", "B", "NYLON", 4)],
            dq_report: Default::default(),
        }
    }

    fn api() -> DashboardApi {
        DashboardApi::new(PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PipelineConfig {
            max_insights: 0,
            ..Default::default()
        };
        assert!(matches!(DashboardApi::new(config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_data_span() {
        let span = api().data_span(&dataset()).unwrap();
        assert_eq!(span.start, date("2025-01-06"));
        assert_eq!(span.end, date("2025-01-20"));
    }

    #[test]
    fn test_query_resolution() {
        let span = DateRange::new(date("2025-01-06"), date("2025-01-20")).ok();

        assert_eq!(ReportQuery::all_data().resolve(span).unwrap(), (None, None));

        let open_start = ReportQuery {
            end: Some(date("2025-01-12")),
            ..Default::default()
        };
        let (period, _) = open_start.resolve(span).unwrap();
        assert_eq!(period.unwrap().start, date("2025-01-06"));

        let (period, prior) = ReportQuery::all_data().with_prior().resolve(span).unwrap();
        assert_eq!(period.unwrap().days(), 15);
        assert_eq!(prior.unwrap().end, date("2025-01-05"));

        let inverted = ReportQuery::between(date("2025-02-01"), date("2025-01-01"));
        assert!(matches!(inverted.resolve(span), Err(ApiError::InvalidDateRange(_))));

        let (period, _) = open_start.resolve(None).unwrap();
        assert_eq!(period.unwrap().start, date("2025-01-12"));
        assert_eq!(period.unwrap().end, date("2025-01-12"));

        let start_after_data = ReportQuery {
            start: Some(date("2025-03-01")),
            ..Default::default()
        };
        let (period, _) = start_after_data.resolve(span).unwrap();
        assert_eq!(period.unwrap().start, date("2025-03-01"));
        assert_eq!(period.unwrap().end, date("2025-03-01"));

        let end_before_data = ReportQuery {
            end: Some(date("2024-12-01")),
            ..Default::default()
        };
        let (period, _) = end_before_data.resolve(span).unwrap();
        assert_eq!(period.unwrap().start, date("2024-12-01"));
    }

    #[test]
    fn test_build_report_filters_window() {
        let ds = dataset();
        let query = ReportQuery::between(date("2025-01-06"), date("2025-01-12"));
        let report = api().build_report(&ds, Role::SewingManager, &query).unwrap();

        assert_eq!(report.metric_value("total_repairs").and_then(|v| v.as_i64()), Some(2));
        assert_eq!(report.period, query.resolve(None).unwrap().0);
    }

    #[test]
    fn test_build_all_reports_in_role_order() {
        let reports = api()
            .build_all_reports(&dataset(), &ReportQuery::all_data())
            .unwrap();
        let roles: Vec<Role> = reports.iter().map(|r| r.role).collect();
        assert_eq!(roles, Role::ALL.to_vec());
    }

    #[test]
    fn test_reports_serialize_to_json() {
        let report = api()
            .build_report(&dataset(), Role::OperationsDirector, &ReportQuery::all_data())
            .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"role\":\"operations_director\""));
        assert!(json.contains("sku_investment_priority"));
    }
}
