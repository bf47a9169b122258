// ==========================================
// Rework Tracker - Rework Records
// ==========================================
// Raw rows (field mapper output) and canonical records (record builder output)
// Canonical records are immutable values rebuilt from every raw snapshot
// ==========================================

use crate::domain::dq::DqReport;
use crate::domain::types::{DiscoveryLocation, ErrorSource};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ==========================================
// RawRepairRow - one row of the order-level repairs sheet
// ==========================================
// Every field is the trimmed cell text; None = blank or column missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRepairRow {
    pub date: Option<String>,
    pub repair_discovered: Option<String>,
    pub sku: Option<String>,
    pub order_number: Option<String>,
    pub total_qty: Option<String>,
    pub repair_qty: Option<String>,
    pub repair_time_min: Option<String>,
    pub repair_fraction: Option<String>,
    pub reason_for_repair: Option<String>,
    pub recut_qty: Option<String>,
    pub reason_for_recut: Option<String>,
    pub fail_qty: Option<String>,
    pub reason_for_fail: Option<String>,
    pub reason_code: Option<String>,
    pub manager: Option<String>,
    pub operator: Option<String>,
    pub cutting_operator: Option<String>,

    // source row number (1-based, data rows only)
    pub row_number: usize,
}

// ==========================================
// RawRecutRow - one row of the piece-level recut list
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecutRow {
    pub code: Option<String>,
    pub sku: Option<String>,
    pub material: Option<String>,
    pub cut_location: Option<String>,
    pub qty: Option<String>,
    pub operator: Option<String>,
    pub order_number: Option<String>,
    pub document_number: Option<String>,
    pub handler: Option<String>,
    pub time: Option<String>,
    pub date: Option<String>,
    pub due_date: Option<String>,
    pub on_list: Option<String>,
    pub done: Option<String>,
    pub scrapped: Option<String>,
    pub recut: Option<String>,
    pub failed: Option<String>,
    pub failed_qty: Option<String>,
    pub date_scrapped: Option<String>,

    pub row_number: usize,
}

// ==========================================
// RepairRecord - canonical order-level repair
// ==========================================
// repaired + recut + fail need not add up to total_qty;
// repair_fraction is carried as recorded, never re-derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairRecord {
    pub date: NaiveDate,
    pub discovered_at: Option<DiscoveryLocation>, // None = unrecognized cell
    pub product_id: String,
    pub order_number: String,
    pub total_qty: i64,
    pub repair_qty: i64,
    pub repair_time_min: i64, // >= 0
    pub repair_fraction: Option<f64>,
    pub reason_for_repair: String,
    pub recut_qty: i64,
    pub reason_for_recut: String,
    pub fail_qty: i64,
    pub reason_for_fail: String,
    pub reason_code: String, // raw code, trimmed
    pub manager: String,     // display-normalized
    pub operator: String,    // operator-code normalized (SMO/PA)
    pub cutting_operator: Option<String>,

    // derived
    pub error_source: ErrorSource,
    pub parent_sku: String,
}

impl RepairRecord {
    /// repair + recut + fail for this order line
    pub fn total_rework(&self) -> i64 {
        self.repair_qty + self.recut_qty + self.fail_qty
    }
}

// ==========================================
// RecutRecord - canonical piece-level recut
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecutRecord {
    pub code: String, // raw code, trimmed
    pub product_id: String,
    pub material: String,
    pub cut_location: String,
    pub quantity: i64, // >= 0
    pub operator: String,
    pub order_number: String,
    pub document_number: String, // joins RepairRecord.order_number
    pub handler: String,
    pub entry_date: NaiveDate,
    pub entry_time: Option<NaiveTime>,
    pub due_date: Option<NaiveDate>,
    pub on_list: bool,
    pub done: bool,
    pub scrapped: bool,
    pub recut: bool,
    pub failed: bool,
    pub failed_qty: i64,
    pub scrapped_date: Option<NaiveDate>,

    // derived
    pub error_source: ErrorSource,
    pub parent_sku: String,
}

impl RecutRecord {
    /// Leading letter of the code ("B: Wrong Material Cut" → 'B'), uppercased
    pub fn code_letter(&self) -> Option<char> {
        self.code.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

// ==========================================
// ReworkDataset - canonical snapshot of both tables
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReworkDataset {
    pub repairs: Vec<RepairRecord>,
    pub recuts: Vec<RecutRecord>,
    pub dq_report: DqReport,
}

impl ReworkDataset {
    /// Earliest and latest record date across both tables
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self
            .repairs
            .iter()
            .map(|r| r.date)
            .chain(self.recuts.iter().map(|r| r.entry_date));

        dates.fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }
}
