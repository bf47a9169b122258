// ==========================================
// Rework Tracker - Operations Director View
// ==========================================
// Answers: what rework costs in labour, where it comes from,
// and which product families deserve investment first
// ==========================================

use crate::config::PipelineConfig;
use crate::decision::common::{error_source_breakdown, rework_events, RepairTotals};
use crate::decision::insight_generator::{
    fmt_count, fmt_decimal, InsightContext, InsightRule, RuleOutcome,
};
use crate::decision::models::{InsightLevel, MetricSet, MetricValue};
use crate::decision::use_cases::RoleView;
use crate::domain::{Granularity, Role};
use crate::engine::{
    build_series, group_by, hours_to_fte_days, minutes_to_hours, mode, name_key, CellValue,
    GroupedTable, ReworkView, TimeSeries,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpsDirectorMetrics {
    pub total_rework_events: i64,
    pub total_repair_time_hrs: f64,
    pub total_recut_pieces: i64,
    pub total_fails: i64,
    /// Head of the investment priority table ("N/A" when empty)
    pub top_problem_sku: String,
    pub top_problem_sku_rework: i64,
    /// Head of the error source breakdown ("N/A" when empty)
    pub primary_error_source: String,
    pub primary_error_source_pct: f64,
}

impl Default for OpsDirectorMetrics {
    fn default() -> Self {
        Self {
            total_rework_events: 0,
            total_repair_time_hrs: 0.0,
            total_recut_pieces: 0,
            total_fails: 0,
            top_problem_sku: NOT_AVAILABLE.to_string(),
            top_problem_sku_rework: 0,
            primary_error_source: NOT_AVAILABLE.to_string(),
            primary_error_source_pct: 0.0,
        }
    }
}

impl MetricSet for OpsDirectorMetrics {
    fn named_values(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            ("total_rework_events", self.total_rework_events.into()),
            ("total_repair_time_hrs", self.total_repair_time_hrs.into()),
            ("total_recut_pieces", self.total_recut_pieces.into()),
            ("total_fails", self.total_fails.into()),
            ("top_problem_sku", self.top_problem_sku.as_str().into()),
            ("top_problem_sku_rework", self.top_problem_sku_rework.into()),
            ("primary_error_source", self.primary_error_source.as_str().into()),
            ("primary_error_source_pct", self.primary_error_source_pct.into()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OpsDirectorView;

#[derive(Default)]
struct SkuInvestment<'a> {
    repair_qty: i64,
    recut_pieces: i64,
    fail_qty: i64,
    repair_time_min: i64,
    codes: Vec<&'a str>,
}

/// Union of both tables by parent SKU, ranked by total rework
fn sku_investment_priority(view: &ReworkView<'_>) -> GroupedTable {
    let mut by_sku: BTreeMap<&str, SkuInvestment<'_>> = BTreeMap::new();

    for r in &view.repairs {
        let entry = by_sku.entry(r.parent_sku.as_str()).or_default();
        entry.repair_qty += r.repair_qty;
        entry.fail_qty += r.fail_qty;
        entry.repair_time_min += r.repair_time_min;
        entry.codes.push(r.reason_code.as_str());
    }
    for r in &view.recuts {
        let entry = by_sku.entry(r.parent_sku.as_str()).or_default();
        entry.recut_pieces += r.quantity;
        entry.codes.push(r.code.as_str());
    }

    let mut table = GroupedTable::new(
        "sku_investment_priority",
        "Parent_SKU",
        &[
            "Repair_Qty",
            "Recut_Pieces",
            "Fail_Qty",
            "Total_Rework",
            "Total_Repair_Time_Hrs",
            "Primary_Error_Type",
        ],
    );

    for (sku, inv) in by_sku {
        let primary = mode(inv.codes.iter().copied()).unwrap_or(NOT_AVAILABLE);
        table.push_row(
            sku,
            vec![
                inv.repair_qty.into(),
                inv.recut_pieces.into(),
                inv.fail_qty.into(),
                (inv.repair_qty + inv.recut_pieces + inv.fail_qty).into(),
                minutes_to_hours(inv.repair_time_min).into(),
                primary.into(),
            ],
        );
    }

    table.sorted_by("Total_Rework")
}

fn top_error_types(view: &ReworkView<'_>) -> GroupedTable {
    let mut table = GroupedTable::new(
        "top_error_types",
        "Reason_Code",
        &["Incidents", "Repair_Qty", "Fail_Qty", "Error_Source"],
    );

    for (code, records) in group_by(&view.repairs, |r| name_key(&r.reason_code)) {
        let totals = RepairTotals::of(records.iter().copied());
        let sources: BTreeSet<&str> = records.iter().map(|r| r.error_source.label()).collect();
        table.push_row(
            code,
            vec![
                totals.incidents.into(),
                totals.repair_qty.into(),
                totals.fail_qty.into(),
                sources.into_iter().collect::<Vec<_>>().join(", ").into(),
            ],
        );
    }

    table.sorted_by("Incidents")
}

fn head_text(table: &GroupedTable) -> Option<&str> {
    table.rows.first().map(|row| row.key.as_str())
}

fn head_value(table: &GroupedTable, column: &str) -> Option<CellValue> {
    let key = head_text(table)?;
    table.value(key, column).cloned()
}

impl RoleView for OpsDirectorView {
    type Metrics = OpsDirectorMetrics;

    fn role(&self) -> Role {
        Role::OperationsDirector
    }

    fn compute_metrics(&self, view: &ReworkView<'_>, _config: &PipelineConfig) -> OpsDirectorMetrics {
        let totals = RepairTotals::of(view.repairs.iter().copied());
        let investment = sku_investment_priority(view);
        let breakdown = error_source_breakdown(view);

        OpsDirectorMetrics {
            total_rework_events: rework_events(view),
            total_repair_time_hrs: totals.repair_time_hrs(),
            total_recut_pieces: view.recuts.iter().map(|r| r.quantity).sum(),
            total_fails: totals.fail_qty,
            top_problem_sku: head_text(&investment).unwrap_or(NOT_AVAILABLE).to_string(),
            top_problem_sku_rework: head_value(&investment, "Total_Rework")
                .and_then(|v| v.as_i64())
                .unwrap_or(0),
            primary_error_source: head_text(&breakdown).unwrap_or(NOT_AVAILABLE).to_string(),
            primary_error_source_pct: head_value(&breakdown, "Pct_of_Total")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0),
        }
    }

    fn build_tables(&self, view: &ReworkView<'_>, config: &PipelineConfig) -> Vec<GroupedTable> {
        vec![
            top_error_types(view).truncated(config.top_n_error_types),
            sku_investment_priority(view).truncated(config.top_n_investment),
        ]
    }

    fn build_series(&self, view: &ReworkView<'_>) -> Vec<TimeSeries> {
        let range = view.effective_range();
        let events = view
            .repairs
            .iter()
            .map(|r| (r.date, 1))
            .chain(view.recuts.iter().map(|r| (r.entry_date, 1)));

        vec![
            build_series(
                "repair_qty",
                Granularity::Month,
                range,
                view.repairs.iter().map(|r| (r.date, r.repair_qty)),
            ),
            build_series("rework_events", Granularity::Month, range, events),
        ]
    }

    fn insight_rules(&self) -> Vec<InsightRule<OpsDirectorMetrics>> {
        vec![
            InsightRule::new("ops.labour", labour),
            InsightRule::new("ops.primary_source", primary_source),
            InsightRule::new("ops.top_investment", top_investment),
            InsightRule::new("ops.fails", fails),
            InsightRule::new("ops.repair_hours_trend", repair_hours_trend),
        ]
    }
}

// ==========================================
// Insight rules
// ==========================================

fn labour(ctx: &InsightContext<'_, OpsDirectorMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.total_rework_events > 0).then(|| {
        (
            InsightLevel::Info,
            ctx.message(
                "insight.ops.labour",
                &[
                    ("events", fmt_count(m.total_rework_events)),
                    ("hours", fmt_decimal(m.total_repair_time_hrs)),
                    ("fte", fmt_decimal(hours_to_fte_days(m.total_repair_time_hrs))),
                ],
            ),
        )
    })
}

fn primary_source(ctx: &InsightContext<'_, OpsDirectorMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.primary_error_source != NOT_AVAILABLE).then(|| {
        (
            InsightLevel::Info,
            ctx.message(
                "insight.ops.primary_source",
                &[
                    ("source", m.primary_error_source.clone()),
                    ("pct", fmt_decimal(m.primary_error_source_pct)),
                ],
            ),
        )
    })
}

fn top_investment(ctx: &InsightContext<'_, OpsDirectorMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.top_problem_sku != NOT_AVAILABLE && m.top_problem_sku_rework > 0).then(|| {
        (
            InsightLevel::Warning,
            ctx.message(
                "insight.ops.top_investment",
                &[
                    ("sku", m.top_problem_sku.clone()),
                    ("units", fmt_count(m.top_problem_sku_rework)),
                ],
            ),
        )
    })
}

fn fails(ctx: &InsightContext<'_, OpsDirectorMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.total_fails > 0).then(|| {
        (
            InsightLevel::Bad,
            ctx.message("insight.ops.fails", &[("fails", fmt_count(m.total_fails))]),
        )
    })
}

fn repair_hours_trend(ctx: &InsightContext<'_, OpsDirectorMetrics>) -> RuleOutcome {
    let pct = ctx.trend_alert(|m| m.total_repair_time_hrs)?;
    Some((
        InsightLevel::Bad,
        ctx.message("insight.ops.repair_hours_trend", &[("pct", fmt_decimal(pct))]),
    ))
}
