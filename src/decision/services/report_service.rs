// ==========================================
// Rework Tracker - Role Report Service
// ==========================================
// Responsibility: (dataset, role, window, optional prior window) → RoleReport
// Stateless: each call filters, aggregates and generates insights afresh
// ==========================================

use crate::config::PipelineConfig;
use crate::decision::insight_generator::{InsightContext, InsightGenerator};
use crate::decision::models::{with_trends, MetricSet, RoleReport};
use crate::decision::use_cases::{
    CuttingManagerView, OpsDirectorView, ProductionManagerView, QcManagerView, RoleView,
    SewingManagerView,
};
use crate::domain::{ReworkDataset, Role};
use crate::engine::{DateRange, ReworkView};
use tracing::{debug, instrument};

/// Build one report for a given role view.
///
/// `period = None` means the whole dataset. When `compare_to` is given,
/// every numeric metric carries a trend against that window and the
/// insight rules can see the prior metric set.
pub fn build_role_report<V: RoleView>(
    role_view: &V,
    dataset: &ReworkDataset,
    period: Option<DateRange>,
    compare_to: Option<DateRange>,
    config: &PipelineConfig,
) -> RoleReport {
    let current_view = ReworkView::filter(dataset, period);
    let current = role_view.compute_metrics(&current_view, config);

    let prior = compare_to.map(|range| {
        let prior_view = ReworkView::filter(dataset, Some(range));
        role_view.compute_metrics(&prior_view, config)
    });

    let ctx = InsightContext {
        current: &current,
        prior: prior.as_ref(),
        config,
    };
    let insights =
        InsightGenerator::new(config.max_insights).generate(&role_view.insight_rules(), &ctx);

    debug!(
        role = %role_view.role(),
        repairs = current_view.repairs.len(),
        recuts = current_view.recuts.len(),
        insights = insights.len(),
        "role report built"
    );

    RoleReport {
        role: role_view.role(),
        period,
        compared_to: compare_to,
        metrics: with_trends(
            current.named_values(),
            prior.as_ref().map(|p| p.named_values()),
        ),
        tables: role_view.build_tables(&current_view, config),
        series: role_view.build_series(&current_view),
        insights,
    }
}

// ==========================================
// ReportService - dispatch by Role
// ==========================================
pub struct ReportService {
    config: PipelineConfig,
}

impl ReportService {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[instrument(skip_all, fields(role = %role))]
    pub fn build(
        &self,
        dataset: &ReworkDataset,
        role: Role,
        period: Option<DateRange>,
        compare_to: Option<DateRange>,
    ) -> RoleReport {
        let config = &self.config;
        match role {
            Role::CuttingManager => {
                build_role_report(&CuttingManagerView, dataset, period, compare_to, config)
            }
            Role::SewingManager => {
                build_role_report(&SewingManagerView, dataset, period, compare_to, config)
            }
            Role::ProductionManager => {
                build_role_report(&ProductionManagerView, dataset, period, compare_to, config)
            }
            Role::QcManager => {
                build_role_report(&QcManagerView, dataset, period, compare_to, config)
            }
            Role::OperationsDirector => {
                build_role_report(&OpsDirectorView, dataset, period, compare_to, config)
            }
        }
    }
}
