// ==========================================
// Rework Tracker - Production Manager View
// ==========================================
// Answers: where do issues originate across the whole line,
// and which product families generate the most rework
// ==========================================

use crate::config::PipelineConfig;
use crate::decision::common::{
    error_source_breakdown, repairs_by_parent_sku, rework_events, source_totals, RepairTotals,
};
use crate::decision::insight_generator::{
    fmt_count, fmt_decimal, InsightContext, InsightRule, RuleOutcome,
};
use crate::decision::models::{InsightLevel, MetricSet, MetricValue};
use crate::decision::use_cases::RoleView;
use crate::domain::{ErrorSource, Granularity, Role};
use crate::engine::{build_series, group_by, percent, round1, GroupedTable, ReworkView, TimeSeries};
use serde::{Deserialize, Serialize};

/// Distinct recut codes listed per SKU in the recut problem table
const TOP_ERROR_TYPES_LISTED: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionMetrics {
    pub total_repairs: i64,
    pub total_repair_time_min: i64,
    pub total_repair_time_hrs: f64,
    pub total_recut_pieces: i64,
    /// Recut quantity recorded on the repairs sheet
    pub total_recut_qty_repairs: i64,
    pub total_fails: i64,
    pub repair_incidents: i64,
    pub recut_incidents: i64,
    pub total_rework_events: i64,

    // share of incidents per source (both tables)
    pub pct_cutting_operator_errors: f64,
    pub pct_sewing_operator_errors: f64,
    pub pct_cutting_machine_errors: f64,
    pub pct_sewing_machine_errors: f64,
    pub pct_other_machine_errors: f64,
    pub pct_total_machine_errors: f64,
    pub pct_material_defects: f64,
    pub pct_other: f64,
}

impl ProductionMetrics {
    pub fn source_pct(&self, source: ErrorSource) -> f64 {
        match source {
            ErrorSource::CuttingOperatorError => self.pct_cutting_operator_errors,
            ErrorSource::SewingOperatorError => self.pct_sewing_operator_errors,
            ErrorSource::CuttingMachineError => self.pct_cutting_machine_errors,
            ErrorSource::SewingMachineError => self.pct_sewing_machine_errors,
            ErrorSource::OtherMachineError => self.pct_other_machine_errors,
            ErrorSource::MaterialDefect => self.pct_material_defects,
            ErrorSource::Other => self.pct_other,
        }
    }

    /// Largest attributable source; Other is never dominant.
    /// Ties go to the earlier source in taxonomy order.
    pub fn dominant_source(&self) -> Option<(ErrorSource, f64)> {
        ErrorSource::ALL
            .iter()
            .filter(|s| **s != ErrorSource::Other)
            .map(|s| (*s, self.source_pct(*s)))
            .fold(None, |best, (source, pct)| match best {
                Some((_, best_pct)) if best_pct >= pct => best,
                _ => Some((source, pct)),
            })
    }
}

impl MetricSet for ProductionMetrics {
    fn named_values(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            ("total_repairs", self.total_repairs.into()),
            ("total_repair_time_min", self.total_repair_time_min.into()),
            ("total_repair_time_hrs", self.total_repair_time_hrs.into()),
            ("total_recut_pieces", self.total_recut_pieces.into()),
            ("total_recut_qty_repairs", self.total_recut_qty_repairs.into()),
            ("total_fails", self.total_fails.into()),
            ("repair_incidents", self.repair_incidents.into()),
            ("recut_incidents", self.recut_incidents.into()),
            ("total_rework_events", self.total_rework_events.into()),
            ("pct_cutting_operator_errors", self.pct_cutting_operator_errors.into()),
            ("pct_sewing_operator_errors", self.pct_sewing_operator_errors.into()),
            ("pct_cutting_machine_errors", self.pct_cutting_machine_errors.into()),
            ("pct_sewing_machine_errors", self.pct_sewing_machine_errors.into()),
            ("pct_other_machine_errors", self.pct_other_machine_errors.into()),
            ("pct_total_machine_errors", self.pct_total_machine_errors.into()),
            ("pct_material_defects", self.pct_material_defects.into()),
            ("pct_other", self.pct_other.into()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductionManagerView;

impl RoleView for ProductionManagerView {
    type Metrics = ProductionMetrics;

    fn role(&self) -> Role {
        Role::ProductionManager
    }

    fn compute_metrics(&self, view: &ReworkView<'_>, _config: &PipelineConfig) -> ProductionMetrics {
        let totals = RepairTotals::of(view.repairs.iter().copied());
        let by_source = source_totals(view);
        let events = rework_events(view);

        let incidents = |source: ErrorSource| by_source.get(&source).map_or(0, |t| t.incidents);
        let share = |count: i64| round1(percent(count as f64, events as f64));
        let machine: i64 = ErrorSource::ALL
            .iter()
            .filter(|s| s.is_machine())
            .map(|s| incidents(*s))
            .sum();

        ProductionMetrics {
            total_repairs: totals.repair_qty,
            total_repair_time_min: totals.repair_time_min,
            total_repair_time_hrs: totals.repair_time_hrs(),
            total_recut_pieces: view.recuts.iter().map(|r| r.quantity).sum(),
            total_recut_qty_repairs: totals.recut_qty,
            total_fails: totals.fail_qty,
            repair_incidents: view.repairs.len() as i64,
            recut_incidents: view.recuts.len() as i64,
            total_rework_events: events,
            pct_cutting_operator_errors: share(incidents(ErrorSource::CuttingOperatorError)),
            pct_sewing_operator_errors: share(incidents(ErrorSource::SewingOperatorError)),
            pct_cutting_machine_errors: share(incidents(ErrorSource::CuttingMachineError)),
            pct_sewing_machine_errors: share(incidents(ErrorSource::SewingMachineError)),
            pct_other_machine_errors: share(incidents(ErrorSource::OtherMachineError)),
            pct_total_machine_errors: share(machine),
            pct_material_defects: share(incidents(ErrorSource::MaterialDefect)),
            pct_other: share(incidents(ErrorSource::Other)),
        }
    }

    fn build_tables(&self, view: &ReworkView<'_>, config: &PipelineConfig) -> Vec<GroupedTable> {
        let mut top_repairs = repairs_by_parent_sku(view)
            .sorted_by("Total_Rework")
            .truncated(config.top_n_skus);
        top_repairs.name = "top_problem_skus_repairs".to_string();

        let mut top_recuts = GroupedTable::new(
            "top_problem_skus_recuts",
            "Parent_SKU",
            &["Recut_Pieces", "Incidents", "Top_Error_Types"],
        );
        for (sku, records) in group_by(&view.recuts, |r| r.parent_sku.clone()) {
            let mut codes: Vec<&str> = Vec::new();
            for r in &records {
                if !r.code.is_empty() && !codes.contains(&r.code.as_str()) {
                    codes.push(r.code.as_str());
                }
            }
            codes.truncate(TOP_ERROR_TYPES_LISTED);

            top_recuts.push_row(
                sku,
                vec![
                    records.iter().map(|r| r.quantity).sum::<i64>().into(),
                    records.len().into(),
                    codes.join(", ").into(),
                ],
            );
        }

        vec![
            error_source_breakdown(view),
            top_repairs,
            top_recuts.sorted_by("Recut_Pieces").truncated(config.top_n_skus),
        ]
    }

    fn build_series(&self, view: &ReworkView<'_>) -> Vec<TimeSeries> {
        let range = view.effective_range();
        vec![
            build_series(
                "repair_qty",
                Granularity::Week,
                range,
                view.repairs.iter().map(|r| (r.date, r.repair_qty)),
            ),
            build_series(
                "recut_pieces",
                Granularity::Week,
                range,
                view.recuts.iter().map(|r| (r.entry_date, r.quantity)),
            ),
        ]
    }

    fn insight_rules(&self) -> Vec<InsightRule<ProductionMetrics>> {
        vec![
            InsightRule::new("production.rework_events", rework_events_summary),
            InsightRule::new("production.dominant_source", dominant_source),
            InsightRule::new("production.fails", fails),
            InsightRule::new("production.rework_trend", rework_trend),
        ]
    }
}

// ==========================================
// Insight rules
// ==========================================

fn rework_events_summary(ctx: &InsightContext<'_, ProductionMetrics>) -> RuleOutcome {
    let m = ctx.current;
    if m.total_rework_events == 0 {
        return Some((InsightLevel::Good, ctx.message("insight.production.no_rework", &[])));
    }

    Some((
        InsightLevel::Info,
        ctx.message(
            "insight.production.rework_events",
            &[
                ("events", fmt_count(m.total_rework_events)),
                ("repairs", fmt_count(m.total_repairs)),
                ("recuts", fmt_count(m.total_recut_pieces)),
                ("fails", fmt_count(m.total_fails)),
            ],
        ),
    ))
}

fn dominant_source(ctx: &InsightContext<'_, ProductionMetrics>) -> RuleOutcome {
    let (source, pct) = ctx.current.dominant_source()?;
    (pct > ctx.config.dominant_source_pct).then(|| {
        (
            InsightLevel::Warning,
            ctx.message(
                "insight.production.dominant_source",
                &[
                    ("pct", fmt_decimal(pct)),
                    ("source", source.short_label().to_string()),
                ],
            ),
        )
    })
}

fn fails(ctx: &InsightContext<'_, ProductionMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.total_fails > 0).then(|| {
        (
            InsightLevel::Bad,
            ctx.message(
                "insight.production.fails",
                &[("fails", fmt_count(m.total_fails))],
            ),
        )
    })
}

fn rework_trend(ctx: &InsightContext<'_, ProductionMetrics>) -> RuleOutcome {
    let pct = ctx.trend_alert(|m| m.total_rework_events as f64)?;
    Some((
        InsightLevel::Bad,
        ctx.message("insight.production.rework_trend", &[("pct", fmt_decimal(pct))]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReworkDataset;
    use crate::engine::CellValue;
    use crate::test_support::{recut, repair};

    fn dataset() -> ReworkDataset {
        ReworkDataset {
            repairs: vec![
                repair("2025-01-06", "TRK100-BK", "A1A", 2, 10, 1),
                repair("2025-01-06", "TRK100-CB", "A1A", 1, 10, 0),
                repair("2025-01-07", "BAG200-BK", "B2", 1, 10, 2),
            ],
            recuts: vec![
                recut("2025-01-07", "TRK100-BK", "B", "NYLON", 2),
                recut("2025-01-08", "TRK100-BK", "C", "NYLON", 1),
                recut("2025-01-08", "TRK100-CB", "B", "NYLON", 1),
                recut("2025-01-08", "TRK100-CB", "F", "NYLON", 1),
                recut("2025-01-09", "BAG200-BK", "ZZZ", "CANVAS", 4),
            ],
            dq_report: Default::default(),
        }
    }

    #[test]
    fn test_source_shares() {
        let ds = dataset();
        let view = ReworkView::filter(&ds, None);
        let m = ProductionManagerView.compute_metrics(&view, &PipelineConfig::default());

        assert_eq!(m.total_rework_events, 8);
        assert_eq!(m.total_fails, 3);
        assert_eq!(m.pct_cutting_operator_errors, 75.0);
        assert_eq!(m.pct_sewing_machine_errors, 12.5);
        assert_eq!(m.pct_total_machine_errors, 12.5);
        assert_eq!(m.pct_other, 12.5);
        assert_eq!(
            m.dominant_source(),
            Some((ErrorSource::CuttingOperatorError, 75.0))
        );
    }

    #[test]
    fn test_breakdown_incidents_sum_to_events() {
        let ds = dataset();
        let view = ReworkView::filter(&ds, None);
        let config = PipelineConfig::default();
        let m = ProductionManagerView.compute_metrics(&view, &config);
        let tables = ProductionManagerView.build_tables(&view, &config);

        let breakdown = &tables[0];
        assert_eq!(breakdown.column_sum("Incidents"), m.total_rework_events);
        assert_eq!(breakdown.column_sum("Recut_Pieces"), m.total_recut_pieces);
        assert_eq!(breakdown.keys()[0], "Cutting Operator Error");
    }

    #[test]
    fn test_recut_problem_table_lists_first_codes() {
        let ds = dataset();
        let view = ReworkView::filter(&ds, None);
        let tables = ProductionManagerView.build_tables(&view, &PipelineConfig::default());

        let recuts = &tables[2];
        assert_eq!(recuts.keys(), vec!["TRK100", "BAG200"]);
        assert_eq!(
            recuts.value("TRK100", "Top_Error_Types"),
            Some(&CellValue::Text("B, C, F".to_string()))
        );
    }

    #[test]
    fn test_top_problem_tables_are_capped() {
        let ds = dataset();
        let view = ReworkView::filter(&ds, None);
        let config = PipelineConfig {
            top_n_skus: 1,
            ..Default::default()
        };
        let tables = ProductionManagerView.build_tables(&view, &config);

        assert_eq!(tables[1].keys(), vec!["TRK100"]);
        assert_eq!(tables[2].keys(), vec!["TRK100"]);
    }

    #[test]
    fn test_dominant_source_threshold() {
        let config = PipelineConfig::default();
        let spread = ProductionMetrics {
            pct_cutting_operator_errors: 35.0,
            pct_sewing_operator_errors: 35.0,
            pct_other: 30.0,
            ..Default::default()
        };
        let ctx = InsightContext {
            current: &spread,
            prior: None,
            config: &config,
        };
        assert!(dominant_source(&ctx).is_none());

        let concentrated = ProductionMetrics {
            pct_sewing_operator_errors: 60.0,
            ..Default::default()
        };
        let ctx = InsightContext {
            current: &concentrated,
            prior: None,
            config: &config,
        };
        let (_, message) = dominant_source(&ctx).unwrap();
        assert!(message.contains("60.0"));
        assert!(message.contains("Sewing Operator"));
    }
}
