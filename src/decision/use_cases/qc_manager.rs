// ==========================================
// Rework Tracker - QC Manager View
// ==========================================
// Answers: are defects caught inline at Sewing or only at final QC,
// and which SKUs / error types slip through to QC
// ==========================================

use crate::config::PipelineConfig;
use crate::decision::common::DetectionCounts;
use crate::decision::insight_generator::{
    fmt_count, fmt_decimal, InsightContext, InsightRule, RuleOutcome,
};
use crate::decision::models::{InsightLevel, MetricSet, MetricValue};
use crate::decision::use_cases::RoleView;
use crate::domain::{DiscoveryLocation, Granularity, RepairRecord, Role};
use crate::engine::{
    build_series, group_by, name_key, CellValue, GroupedTable, ReworkView, TimeSeries,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QcMetrics {
    /// Repair lines (one issue each)
    pub total_issues: i64,
    pub caught_at_sewing: i64,
    pub caught_at_qc: i64,
    pub unknown_discovery: i64,
    pub pct_caught_sewing: f64,
    pub pct_caught_qc: f64,
    pub repairs_from_qc_caught: i64,
    pub fails_from_qc_caught: i64,
    pub poor_inline_sku_count: i64,
}

impl MetricSet for QcMetrics {
    fn named_values(&self) -> Vec<(&'static str, MetricValue)> {
        vec![
            ("total_issues", self.total_issues.into()),
            ("caught_at_sewing", self.caught_at_sewing.into()),
            ("caught_at_qc", self.caught_at_qc.into()),
            ("unknown_discovery", self.unknown_discovery.into()),
            ("pct_caught_sewing", self.pct_caught_sewing.into()),
            ("pct_caught_qc", self.pct_caught_qc.into()),
            ("repairs_from_qc_caught", self.repairs_from_qc_caught.into()),
            ("fails_from_qc_caught", self.fails_from_qc_caught.into()),
            ("poor_inline_sku_count", self.poor_inline_sku_count.into()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QcManagerView;

fn caught_at_qc(record: &RepairRecord) -> bool {
    record.discovered_at == Some(DiscoveryLocation::Qc)
}

fn detection_by_sku(view: &ReworkView<'_>) -> GroupedTable {
    let mut table = GroupedTable::new(
        "detection_by_sku",
        "Parent_SKU",
        &[
            "Total_Issues",
            "Caught_at_Sewing",
            "Caught_at_QC",
            "Pct_at_Sewing",
            "Pct_at_QC",
        ],
    );

    for (sku, records) in group_by(&view.repairs, |r| r.parent_sku.clone()) {
        let detection = DetectionCounts::of(records.iter().copied());
        table.push_row(
            sku,
            vec![
                detection.total().into(),
                detection.sewing.into(),
                detection.qc.into(),
                detection.pct_sewing().into(),
                detection.pct_qc().into(),
            ],
        );
    }

    table.sorted_by("Total_Issues")
}

/// SKUs whose QC share of known detections exceeds the threshold
fn poor_inline_detection(view: &ReworkView<'_>, threshold_pct: f64) -> GroupedTable {
    let by_sku = detection_by_sku(view);
    let pct_idx = by_sku.column_index("Pct_at_QC");
    let mut table = by_sku
        .retain(|row| {
            pct_idx
                .and_then(|idx| row.values.get(idx))
                .and_then(CellValue::as_f64)
                .is_some_and(|pct| pct > threshold_pct)
        })
        .sorted_by("Caught_at_QC");
    table.name = "poor_inline_detection".to_string();
    table
}

fn error_types_by_detection(view: &ReworkView<'_>) -> GroupedTable {
    let mut table = GroupedTable::new(
        "error_types_by_detection",
        "Reason_Code",
        &["Total", "Caught_at_Sewing", "Caught_at_QC", "Pct_at_QC"],
    );

    for (code, records) in group_by(&view.repairs, |r| name_key(&r.reason_code)) {
        let detection = DetectionCounts::of(records.iter().copied());
        table.push_row(
            code,
            vec![
                detection.total().into(),
                detection.sewing.into(),
                detection.qc.into(),
                detection.pct_qc().into(),
            ],
        );
    }

    table.sorted_by("Total")
}

impl RoleView for QcManagerView {
    type Metrics = QcMetrics;

    fn role(&self) -> Role {
        Role::QcManager
    }

    fn compute_metrics(&self, view: &ReworkView<'_>, config: &PipelineConfig) -> QcMetrics {
        let detection = DetectionCounts::of(view.repairs.iter().copied());
        let qc_caught: Vec<_> = view.repairs.iter().filter(|r| caught_at_qc(r)).collect();
        let poor = poor_inline_detection(view, config.poor_inline_detection_pct);

        QcMetrics {
            total_issues: detection.total(),
            caught_at_sewing: detection.sewing,
            caught_at_qc: detection.qc,
            unknown_discovery: detection.unknown,
            pct_caught_sewing: detection.pct_sewing(),
            pct_caught_qc: detection.pct_qc(),
            repairs_from_qc_caught: qc_caught.iter().map(|r| r.repair_qty).sum(),
            fails_from_qc_caught: qc_caught.iter().map(|r| r.fail_qty).sum(),
            poor_inline_sku_count: poor.rows.len() as i64,
        }
    }

    fn build_tables(&self, view: &ReworkView<'_>, config: &PipelineConfig) -> Vec<GroupedTable> {
        vec![
            detection_by_sku(view),
            poor_inline_detection(view, config.poor_inline_detection_pct),
            error_types_by_detection(view),
        ]
    }

    fn build_series(&self, view: &ReworkView<'_>) -> Vec<TimeSeries> {
        let range = view.effective_range();
        let at = |location: DiscoveryLocation| {
            view.repairs
                .iter()
                .filter(move |r| r.discovered_at == Some(location))
                .map(|r| (r.date, 1))
        };

        vec![
            build_series("caught_at_sewing", Granularity::Week, range, at(DiscoveryLocation::Sewing)),
            build_series("caught_at_qc", Granularity::Week, range, at(DiscoveryLocation::Qc)),
        ]
    }

    fn insight_rules(&self) -> Vec<InsightRule<QcMetrics>> {
        vec![
            InsightRule::new("qc.detection_verdict", detection_verdict),
            InsightRule::new("qc.early_detection_share", early_detection_share),
            InsightRule::new("qc.late_detection_cost", late_detection_cost),
            InsightRule::new("qc.poor_inline_skus", poor_inline_skus),
            InsightRule::new("qc.unknown_discovery", unknown_discovery),
            InsightRule::new("qc.qc_caught_trend", qc_caught_trend),
        ]
    }
}

// ==========================================
// Insight rules
// ==========================================

fn detection_verdict(ctx: &InsightContext<'_, QcMetrics>) -> RuleOutcome {
    let m = ctx.current;
    if m.caught_at_sewing + m.caught_at_qc == 0 {
        return None;
    }

    let target = ctx.config.sewing_detection_target_pct;
    if m.pct_caught_sewing >= target {
        Some((
            InsightLevel::Good,
            ctx.message(
                "insight.qc.strong_inline",
                &[("pct", fmt_decimal(m.pct_caught_sewing))],
            ),
        ))
    } else if m.pct_caught_qc > ctx.config.qc_majority_pct {
        Some((
            InsightLevel::Bad,
            ctx.message(
                "insight.qc.majority_at_qc",
                &[("pct", fmt_decimal(m.pct_caught_qc))],
            ),
        ))
    } else {
        Some((
            InsightLevel::Warning,
            ctx.message(
                "insight.qc.below_target",
                &[
                    ("pct", fmt_decimal(m.pct_caught_sewing)),
                    ("target", fmt_decimal(target)),
                ],
            ),
        ))
    }
}

fn early_detection_share(ctx: &InsightContext<'_, QcMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.caught_at_sewing + m.caught_at_qc > 0).then(|| {
        (
            InsightLevel::Info,
            ctx.message(
                "insight.qc.early_detection_share",
                &[("pct", fmt_decimal(m.pct_caught_sewing))],
            ),
        )
    })
}

fn late_detection_cost(ctx: &InsightContext<'_, QcMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.caught_at_qc > 0).then(|| {
        (
            InsightLevel::Info,
            ctx.message(
                "insight.qc.late_detection_cost",
                &[
                    ("issues", fmt_count(m.caught_at_qc)),
                    ("repairs", fmt_count(m.repairs_from_qc_caught)),
                    ("fails", fmt_count(m.fails_from_qc_caught)),
                ],
            ),
        )
    })
}

fn poor_inline_skus(ctx: &InsightContext<'_, QcMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.poor_inline_sku_count > 0).then(|| {
        (
            InsightLevel::Warning,
            ctx.message(
                "insight.qc.poor_inline_skus",
                &[
                    ("count", fmt_count(m.poor_inline_sku_count)),
                    ("threshold", fmt_decimal(ctx.config.poor_inline_detection_pct)),
                ],
            ),
        )
    })
}

fn unknown_discovery(ctx: &InsightContext<'_, QcMetrics>) -> RuleOutcome {
    let m = ctx.current;
    (m.unknown_discovery > 0).then(|| {
        (
            InsightLevel::Info,
            ctx.message(
                "insight.qc.unknown_discovery",
                &[("count", fmt_count(m.unknown_discovery))],
            ),
        )
    })
}

fn qc_caught_trend(ctx: &InsightContext<'_, QcMetrics>) -> RuleOutcome {
    let pct = ctx.trend_alert(|m| m.caught_at_qc as f64)?;
    Some((
        InsightLevel::Bad,
        ctx.message("insight.qc.qc_caught_trend", &[("pct", fmt_decimal(pct))]),
    ))
}
