// ==========================================
// Rework Tracker - Sewing Manager View
// ==========================================
// Answers: how much repair labour the line absorbs, who is repairing,
// and whether defects are caught inline or only at QC
// ==========================================

use crate::config::PipelineConfig;
use crate::decision::common::{repairs_by_parent_sku, DetectionCounts, RepairTotals};
use crate::decision::insight_generator::{
    fmt_count, fmt_decimal, InsightContext, InsightRule, RuleOutcome,
};
use crate::decision::models::{InsightLevel, MetricSet, MetricValue};
use crate::decision::use_cases::RoleView;
use crate::domain::{ErrorSource, Granularity, Role};
use crate::engine::{
    build_series, distinct_count, group_by, hours_to_fte_days, name_key, GroupedTable,
    ReworkView, TimeSeries,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SewingMetrics {
    pub total_repairs: i64,
    pub total_repair_time_min: i64,
    pub total_repair_time_hrs: f64,
    pub avg_time_per_repair: f64,
    pub total_fails: i64,
    pub caught_at_sewing: i64,
    pub caught_at_qc: i64,
    pub unknown_discovery: i64,
    pub pct_caught_sewing: f64,
    pub pct_caught_qc: f64,
    /// Recut pieces caused by sewing operators
    pub total_recuts_sewing_errors: i64,
    /// Sewing-attributed repairs-sheet rows
    pub sewing_error_incidents: i64,
}

impl MetricSet for SewingMetrics {
    fn named_values(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            ("total_repairs", self.total_repairs.into()),
            ("total_repair_time_min", self.total_repair_time_min.into()),
            ("total_repair_time_hrs", self.total_repair_time_hrs.into()),
            ("avg_time_per_repair", self.avg_time_per_repair.into()),
            ("total_fails", self.total_fails.into()),
            ("caught_at_sewing", self.caught_at_sewing.into()),
            ("caught_at_qc", self.caught_at_qc.into()),
            ("unknown_discovery", self.unknown_discovery.into()),
            ("pct_caught_sewing", self.pct_caught_sewing.into()),
            ("pct_caught_qc", self.pct_caught_qc.into()),
            ("total_recuts_sewing_errors", self.total_recuts_sewing_errors.into()),
            ("sewing_error_incidents", self.sewing_error_incidents.into()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SewingManagerView;

impl RoleView for SewingManagerView {
    type Metrics = SewingMetrics;

    fn role(&self) -> Role {
        Role::SewingManager
    }

    fn compute_metrics(&self, view: &ReworkView<'_>, _config: &PipelineConfig) -> SewingMetrics {
        let totals = RepairTotals::of(view.repairs.iter().copied());
        let detection = DetectionCounts::of(view.repairs.iter().copied());

        let sewing = ErrorSource::SewingOperatorError;
        let sewing_recut_pieces: i64 = view
            .recuts
            .iter()
            .filter(|r| r.error_source == sewing)
            .map(|r| r.quantity)
            .sum();
        let sewing_repairs = view.repairs.iter().filter(|r| r.error_source == sewing).count();

        SewingMetrics {
            total_repairs: totals.repair_qty,
            total_repair_time_min: totals.repair_time_min,
            total_repair_time_hrs: totals.repair_time_hrs(),
            avg_time_per_repair: totals.avg_time_per_repair(),
            total_fails: totals.fail_qty,
            caught_at_sewing: detection.sewing,
            caught_at_qc: detection.qc,
            unknown_discovery: detection.unknown,
            pct_caught_sewing: detection.pct_sewing(),
            pct_caught_qc: detection.pct_qc(),
            total_recuts_sewing_errors: sewing_recut_pieces,
            sewing_error_incidents: sewing_repairs as i64,
        }
    }

    fn build_tables(&self, view: &ReworkView<'_>, _config: &PipelineConfig) -> Vec<GroupedTable> {
        let mut smo = GroupedTable::new(
            "smo_performance",
            "Operator",
            &[
                "Repair_Qty",
                "Incidents",
                "Total_Repair_Time_Min",
                "Avg_Time_Per_Repair",
                "Fail_Qty",
                "Parent_SKUs_Repaired",
            ],
        );

        for (operator, records) in group_by(&view.repairs, |r| name_key(&r.operator)) {
            let totals = RepairTotals::of(records.iter().copied());
            smo.push_row(
                operator,
                vec![
                    totals.repair_qty.into(),
                    totals.incidents.into(),
                    totals.repair_time_min.into(),
                    totals.avg_time_per_repair().into(),
                    totals.fail_qty.into(),
                    distinct_count(records.iter().map(|r| r.parent_sku.as_str())).into(),
                ],
            );
        }

        vec![smo.sorted_by("Repair_Qty"), repairs_by_parent_sku(view)]
    }

    fn build_series(&self, view: &ReworkView<'_>) -> Vec<TimeSeries> {
        vec![build_series(
            "repair_qty",
            Granularity::Week,
            view.effective_range(),
            view.repairs.iter().map(|r| (r.date, r.repair_qty)),
        )]
    }

    fn insight_rules(&self) -> Vec<InsightRule<SewingMetrics>> {
        vec![
            InsightRule::new("sewing.repair_load", repair_load),
            InsightRule::new("sewing.detection", detection),
            InsightRule::new("sewing.avg_repair_time", avg_repair_time),
            InsightRule::new("sewing.repairs_trend", repairs_trend),
        ]
    }
}

// ==========================================
// Insight rules
// ==========================================

fn repair_load(ctx: &InsightContext<'_, SewingMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.total_repairs > 0).then(|| {
        (
            InsightLevel::Info,
            ctx.message(
                "insight.sewing.repair_load",
                &[
                    ("repairs", fmt_count(m.total_repairs)),
                    ("hours", fmt_decimal(m.total_repair_time_hrs)),
                    ("fte", fmt_decimal(hours_to_fte_days(m.total_repair_time_hrs))),
                ],
            ),
        )
    })
}

fn detection(ctx: &InsightContext<'_, SewingMetrics>) -> RuleOutcome {
    let m = ctx.current;
    if m.caught_at_sewing + m.caught_at_qc == 0 {
        return None;
    }

    let target = fmt_decimal(ctx.config.sewing_detection_target_pct);
    if m.caught_at_qc > m.caught_at_sewing {
        Some((
            InsightLevel::Warning,
            ctx.message(
                "insight.sewing.qc_exceeds_sewing",
                &[
                    ("qc", fmt_count(m.caught_at_qc)),
                    ("sewing", fmt_count(m.caught_at_sewing)),
                ],
            ),
        ))
    } else if m.pct_caught_sewing >= ctx.config.sewing_detection_target_pct {
        Some((
            InsightLevel::Good,
            ctx.message(
                "insight.sewing.detection_on_target",
                &[("pct", fmt_decimal(m.pct_caught_sewing)), ("target", target)],
            ),
        ))
    } else {
        Some((
            InsightLevel::Info,
            ctx.message(
                "insight.sewing.detection_below_target",
                &[("pct", fmt_decimal(m.pct_caught_sewing)), ("target", target)],
            ),
        ))
    }
}

fn avg_repair_time(ctx: &InsightContext<'_, SewingMetrics>) -> RuleOutcome {
    let m = ctx.current;
    let alert = ctx.config.avg_repair_time_alert_min;
    (m.avg_time_per_repair > alert).then(|| {
        (
            InsightLevel::Warning,
            ctx.message(
                "insight.sewing.avg_repair_time",
                &[
                    ("avg", fmt_decimal(m.avg_time_per_repair)),
                    ("alert", fmt_decimal(alert)),
                ],
            ),
        )
    })
}

fn repairs_trend(ctx: &InsightContext<'_, SewingMetrics>) -> RuleOutcome {
    let pct = ctx.trend_alert(|m| m.total_repairs as f64)?;
    Some((
        InsightLevel::Bad,
        ctx.message("insight.sewing.repairs_trend", &[("pct", fmt_decimal(pct))]),
    ))
}
