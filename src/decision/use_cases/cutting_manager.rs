// ==========================================
// Rework Tracker - Cutting Manager View
// ==========================================
// Answers: how much rework starts at the cutting table, and which
// kind of cutting mistake (wrong material, marking, kitting, short cut)
// ==========================================

use crate::config::PipelineConfig;
use crate::decision::insight_generator::{
    fmt_count, fmt_decimal, InsightContext, InsightRule, RuleOutcome,
};
use crate::decision::models::{InsightLevel, MetricSet, MetricValue};
use crate::decision::use_cases::RoleView;
use crate::domain::{ErrorSource, Granularity, RecutRecord, RepairRecord, Role};
use crate::engine::{
    build_series, distinct_joined, group_by, name_key, GroupedTable, ReworkView, TimeSeries,
};
use serde::{Deserialize, Serialize};

const CUTTING_CODE: &str = "A1A";
const MARKING_CODE: &str = "A1B";
const KITTING_CODE: &str = "A1C";

const WRONG_MATERIAL_LETTER: char = 'B';
const MARKING_LETTER: char = 'C';
const CUT_SHORT_LETTER: char = 'F';

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CuttingMetrics {
    /// Recut pieces attributed to cutting operators
    pub total_recut_pieces: i64,
    /// Cutting-attributed repairs-sheet rows (order-level incidents)
    pub total_cutting_incidents: i64,
    pub recut_qty_from_repairs: i64,
    pub fail_qty_from_cutting: i64,
    pub cutting_errors: i64,
    pub marking_errors: i64,
    pub kitting_errors: i64,
    pub cut_short_errors: i64,
}

impl MetricSet for CuttingMetrics {
    fn named_values(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            ("total_recut_pieces", self.total_recut_pieces.into()),
            ("total_cutting_incidents", self.total_cutting_incidents.into()),
            ("recut_qty_from_repairs", self.recut_qty_from_repairs.into()),
            ("fail_qty_from_cutting", self.fail_qty_from_cutting.into()),
            ("cutting_errors", self.cutting_errors.into()),
            ("marking_errors", self.marking_errors.into()),
            ("kitting_errors", self.kitting_errors.into()),
            ("cut_short_errors", self.cut_short_errors.into()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CuttingManagerView;

fn is_cutting(source: ErrorSource) -> bool {
    source == ErrorSource::CuttingOperatorError
}

fn cutting_repairs<'a>(view: &ReworkView<'a>) -> Vec<&'a RepairRecord> {
    view.repairs
        .iter()
        .copied()
        .filter(|r| is_cutting(r.error_source))
        .collect()
}

fn cutting_recuts<'a>(view: &ReworkView<'a>) -> Vec<&'a RecutRecord> {
    view.recuts
        .iter()
        .copied()
        .filter(|r| is_cutting(r.error_source))
        .collect()
}

fn repairs_with_code(repairs: &[&RepairRecord], code: &str) -> i64 {
    repairs.iter().filter(|r| r.reason_code == code).count() as i64
}

fn recuts_with_letter(recuts: &[&RecutRecord], letter: char) -> i64 {
    recuts
        .iter()
        .filter(|r| r.code_letter() == Some(letter))
        .count() as i64
}

fn qty_with_letter(recuts: &[&RecutRecord], letter: char) -> i64 {
    recuts
        .iter()
        .filter(|r| r.code_letter() == Some(letter))
        .map(|r| r.quantity)
        .sum()
}

impl RoleView for CuttingManagerView {
    type Metrics = CuttingMetrics;

    fn role(&self) -> Role {
        Role::CuttingManager
    }

    fn compute_metrics(&self, view: &ReworkView<'_>, _config: &PipelineConfig) -> CuttingMetrics {
        let repairs = cutting_repairs(view);
        let recuts = cutting_recuts(view);

        CuttingMetrics {
            total_recut_pieces: recuts.iter().map(|r| r.quantity).sum(),
            total_cutting_incidents: repairs.len() as i64,
            recut_qty_from_repairs: repairs.iter().map(|r| r.recut_qty).sum(),
            fail_qty_from_cutting: repairs.iter().map(|r| r.fail_qty).sum(),
            cutting_errors: repairs_with_code(&repairs, CUTTING_CODE)
                + recuts_with_letter(&recuts, WRONG_MATERIAL_LETTER),
            marking_errors: repairs_with_code(&repairs, MARKING_CODE)
                + recuts_with_letter(&recuts, MARKING_LETTER),
            kitting_errors: repairs_with_code(&repairs, KITTING_CODE),
            cut_short_errors: recuts_with_letter(&recuts, CUT_SHORT_LETTER),
        }
    }

    fn build_tables(&self, view: &ReworkView<'_>, _config: &PipelineConfig) -> Vec<GroupedTable> {
        let recuts = cutting_recuts(view);

        let mut by_material = GroupedTable::new(
            "recuts_by_material",
            "Material",
            &[
                "Total_Recut_Pieces",
                "Incidents",
                "Cutting_Errors",
                "Marking_Errors",
                "Cut_Too_Short",
            ],
        );
        for (material, group) in group_by(&recuts, |r| name_key(&r.material)) {
            by_material.push_row(
                material,
                vec![
                    group.iter().map(|r| r.quantity).sum::<i64>().into(),
                    group.len().into(),
                    qty_with_letter(&group, WRONG_MATERIAL_LETTER).into(),
                    qty_with_letter(&group, MARKING_LETTER).into(),
                    qty_with_letter(&group, CUT_SHORT_LETTER).into(),
                ],
            );
        }

        let mut by_sku = GroupedTable::new(
            "recuts_by_parent_sku",
            "Parent_SKU",
            &["Total_Recut_Pieces", "Incidents", "Materials_Affected"],
        );
        for (sku, group) in group_by(&recuts, |r| r.parent_sku.clone()) {
            by_sku.push_row(
                sku,
                vec![
                    group.iter().map(|r| r.quantity).sum::<i64>().into(),
                    group.len().into(),
                    distinct_joined(group.iter().map(|r| r.material.as_str())).into(),
                ],
            );
        }

        vec![
            by_material.sorted_by("Total_Recut_Pieces"),
            by_sku.sorted_by("Total_Recut_Pieces"),
        ]
    }

    fn build_series(&self, view: &ReworkView<'_>) -> Vec<TimeSeries> {
        let events = cutting_recuts(view)
            .into_iter()
            .map(|r| (r.entry_date, r.quantity));

        vec![build_series(
            "cutting_recut_pieces",
            Granularity::Week,
            view.effective_range(),
            events,
        )]
    }

    fn insight_rules(&self) -> Vec<InsightRule<CuttingMetrics>> {
        vec![
            InsightRule::new("cutting.recut_volume", recut_volume),
            InsightRule::new("cutting.marking_over_cutting", marking_over_cutting),
            InsightRule::new("cutting.kitting", kitting),
            InsightRule::new("cutting.cut_short", cut_short),
            InsightRule::new("cutting.recut_trend", recut_trend),
        ]
    }
}

// ==========================================
// Insight rules
// ==========================================

fn recut_volume(ctx: &InsightContext<'_, CuttingMetrics>) -> RuleOutcome {
    let m = ctx.current;
    if m.total_cutting_incidents == 0 && m.total_recut_pieces == 0 {
        return Some((InsightLevel::Good, ctx.message("insight.cutting.no_recuts", &[])));
    }

    Some((
        InsightLevel::Info,
        ctx.message(
            "insight.cutting.recut_volume",
            &[
                ("pieces", fmt_count(m.total_recut_pieces)),
                ("incidents", fmt_count(m.total_cutting_incidents)),
            ],
        ),
    ))
}

fn marking_over_cutting(ctx: &InsightContext<'_, CuttingMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.marking_errors > m.cutting_errors).then(|| {
        (
            InsightLevel::Warning,
            ctx.message(
                "insight.cutting.marking_over_cutting",
                &[
                    ("marking", fmt_count(m.marking_errors)),
                    ("cutting", fmt_count(m.cutting_errors)),
                ],
            ),
        )
    })
}

fn kitting(ctx: &InsightContext<'_, CuttingMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.kitting_errors > 0).then(|| {
        (
            InsightLevel::Warning,
            ctx.message(
                "insight.cutting.kitting",
                &[("count", fmt_count(m.kitting_errors))],
            ),
        )
    })
}

fn cut_short(ctx: &InsightContext<'_, CuttingMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.cut_short_errors > m.cutting_errors).then(|| {
        (
            InsightLevel::Warning,
            ctx.message(
                "insight.cutting.cut_short",
                &[
                    ("short", fmt_count(m.cut_short_errors)),
                    ("cutting", fmt_count(m.cutting_errors)),
                ],
            ),
        )
    })
}

fn recut_trend(ctx: &InsightContext<'_, CuttingMetrics>) -> RuleOutcome {
    let pct = ctx.trend_alert(|m| m.total_recut_pieces as f64)?;
    Some((
        InsightLevel::Bad,
        ctx.message("insight.cutting.recut_trend", &[("pct", fmt_decimal(pct))]),
    ))
}
