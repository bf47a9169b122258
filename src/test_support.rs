// ==========================================
// Rework Tracker - Unit Test Fixtures
// ==========================================
// Canonical records with derived fields filled in the same way
// the record builder fills them
// ==========================================

use crate::domain::{RecutRecord, RepairRecord};
use crate::importer::{classify_recut_code, classify_repair_code, parent_sku};
use chrono::NaiveDate;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn repair(
    day: &str,
    product_id: &str,
    code: &str,
    repair_qty: i64,
    repair_time_min: i64,
    fail_qty: i64,
) -> RepairRecord {
    RepairRecord {
        date: date(day),
        discovered_at: None,
        product_id: product_id.to_string(),
        order_number: String::new(),
        total_qty: repair_qty + fail_qty,
        repair_qty,
        repair_time_min,
        repair_fraction: None,
        reason_for_repair: String::new(),
        recut_qty: 0,
        reason_for_recut: String::new(),
        fail_qty,
        reason_for_fail: String::new(),
        reason_code: code.to_string(),
        manager: String::new(),
        operator: String::new(),
        cutting_operator: None,
        error_source: classify_repair_code(code),
        parent_sku: parent_sku(product_id),
    }
}

pub fn recut(day: &str, product_id: &str, code: &str, material: &str, quantity: i64) -> RecutRecord {
    RecutRecord {
        code: code.to_string(),
        product_id: product_id.to_string(),
        material: material.to_string(),
        cut_location: String::new(),
        quantity,
        operator: String::new(),
        order_number: String::new(),
        document_number: String::new(),
        handler: String::new(),
        entry_date: date(day),
        entry_time: None,
        due_date: None,
        on_list: false,
        done: false,
        scrapped: false,
        recut: false,
        failed: false,
        failed_qty: 0,
        scrapped_date: None,
        error_source: classify_recut_code(code),
        parent_sku: parent_sku(product_id),
    }
}
