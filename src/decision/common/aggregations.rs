// ==========================================
// Rework Tracker - Shared Aggregations
// ==========================================
// Responsibility: roll-ups used by more than one role view
// All functions are pure over a ReworkView
// ==========================================

use crate::domain::{DiscoveryLocation, ErrorSource, RepairRecord};
use crate::engine::{
    distinct_count, group_by, minutes_to_hours, percent, ratio, round1, GroupedTable,
    ReworkView,
};
use std::collections::BTreeMap;

// ==========================================
// RepairTotals
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairTotals {
    pub incidents: i64,
    pub repair_qty: i64,
    pub recut_qty: i64,
    pub fail_qty: i64,
    pub repair_time_min: i64,
}

impl RepairTotals {
    pub fn of<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RepairRecord>,
    {
        records.into_iter().fold(Self::default(), |mut acc, r| {
            acc.incidents += 1;
            acc.repair_qty += r.repair_qty;
            acc.recut_qty += r.recut_qty;
            acc.fail_qty += r.fail_qty;
            acc.repair_time_min += r.repair_time_min;
            acc
        })
    }

    pub fn total_rework(&self) -> i64 {
        self.repair_qty + self.recut_qty + self.fail_qty
    }

    pub fn repair_time_hrs(&self) -> f64 {
        minutes_to_hours(self.repair_time_min)
    }

    /// Minutes per repaired unit (0 when nothing was repaired)
    pub fn avg_time_per_repair(&self) -> f64 {
        round1(ratio(self.repair_time_min as f64, self.repair_qty as f64))
    }
}

// ==========================================
// Detection (where defects were found)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionCounts {
    pub sewing: i64,
    pub qc: i64,
    pub unknown: i64,
}

impl DetectionCounts {
    pub fn of<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RepairRecord>,
    {
        records.into_iter().fold(Self::default(), |mut acc, r| {
            match r.discovered_at {
                Some(DiscoveryLocation::Sewing) => acc.sewing += 1,
                Some(DiscoveryLocation::Qc) => acc.qc += 1,
                None => acc.unknown += 1,
            }
            acc
        })
    }

    /// Records with a recognized discovery location
    pub fn known(&self) -> i64 {
        self.sewing + self.qc
    }

    pub fn total(&self) -> i64 {
        self.known() + self.unknown
    }

    pub fn pct_sewing(&self) -> f64 {
        round1(percent(self.sewing as f64, self.known() as f64))
    }

    pub fn pct_qc(&self) -> f64 {
        if self.known() == 0 {
            return 0.0;
        }
        round1(100.0 - percent(self.sewing as f64, self.known() as f64))
    }
}

// ==========================================
// Error-source roll-up (both tables)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceTotals {
    pub incidents: i64,
    pub repair_qty: i64,
    pub recut_pieces: i64,
    pub fail_qty: i64,
    pub repair_time_min: i64,
}

/// One entry per ErrorSource (zeros included), in taxonomy order
pub fn source_totals(view: &ReworkView<'_>) -> BTreeMap<ErrorSource, SourceTotals> {
    let mut totals: BTreeMap<ErrorSource, SourceTotals> = ErrorSource::ALL
        .iter()
        .map(|s| (*s, SourceTotals::default()))
        .collect();

    for r in &view.repairs {
        let entry = totals.entry(r.error_source).or_default();
        entry.incidents += 1;
        entry.repair_qty += r.repair_qty;
        entry.fail_qty += r.fail_qty;
        entry.repair_time_min += r.repair_time_min;
    }
    for r in &view.recuts {
        let entry = totals.entry(r.error_source).or_default();
        entry.incidents += 1;
        entry.recut_pieces += r.quantity;
    }

    totals
}

/// Rows in both tables: every repair line and every recut line is one event
pub fn rework_events(view: &ReworkView<'_>) -> i64 {
    (view.repairs.len() + view.recuts.len()) as i64
}

pub fn error_source_breakdown(view: &ReworkView<'_>) -> GroupedTable {
    let totals = source_totals(view);
    let all_incidents: i64 = totals.values().map(|t| t.incidents).sum();

    let mut table = GroupedTable::new(
        "error_source_breakdown",
        "Error_Source",
        &[
            "Incidents",
            "Pct_of_Total",
            "Repair_Qty",
            "Recut_Pieces",
            "Fail_Qty",
            "Total_Repair_Time_Min",
        ],
    );

    for (source, t) in totals.iter().filter(|(_, t)| t.incidents > 0) {
        table.push_row(
            source.label(),
            vec![
                t.incidents.into(),
                round1(percent(t.incidents as f64, all_incidents as f64)).into(),
                t.repair_qty.into(),
                t.recut_pieces.into(),
                t.fail_qty.into(),
                t.repair_time_min.into(),
            ],
        );
    }

    table.sorted_by("Incidents")
}

// ==========================================
// Repairs by parent SKU
// ==========================================
pub fn repairs_by_parent_sku(view: &ReworkView<'_>) -> GroupedTable {
    let mut table = GroupedTable::new(
        "repairs_by_parent_sku",
        "Parent_SKU",
        &[
            "Repair_Qty",
            "Recut_Qty",
            "Fail_Qty",
            "Total_Rework",
            "Total_Repair_Time_Min",
            "Avg_Time_Per_Repair",
            "Operators_Involved",
        ],
    );

    for (sku, records) in group_by(&view.repairs, |r| r.parent_sku.clone()) {
        let totals = RepairTotals::of(records.iter().copied());
        table.push_row(
            sku,
            vec![
                totals.repair_qty.into(),
                totals.recut_qty.into(),
                totals.fail_qty.into(),
                totals.total_rework().into(),
                totals.repair_time_min.into(),
                totals.avg_time_per_repair().into(),
                distinct_count(records.iter().map(|r| r.operator.as_str())).into(),
            ],
        );
    }

    table.sorted_by("Repair_Qty")
}
