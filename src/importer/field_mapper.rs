// ==========================================
// Rework Tracker - Field Mapper
// ==========================================
// Responsibility: source column (+ aliases) → raw row field
// No type conversion here; the record builder cleans values
// ==========================================

use crate::domain::{RawRecutRow, RawRepairRow};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_repair_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawRepairRow {
        RawRepairRow {
            date: self.get_string(row, "Date"),
            repair_discovered: self.get_string(row, "Repair Discovered"),
            sku: self.get_string(row, "SKU-Colorway-Size"),
            order_number: self.get_string(row, "PR#"),

            // quantities
            total_qty: self.get_string(row, "Total Qty"),
            repair_qty: self.get_string(row, "Repair Qty"),
            repair_time_min: self.get_string(row, "Repair Time (min)"),
            repair_fraction: self.get_string(row, "% Repaired"),
            recut_qty: self.get_string(row, "Recut Qty"),
            fail_qty: self.get_string(row, "Fail Qty"),

            // free-text reasons
            reason_for_repair: self.get_string(row, "Reason for Repair"),
            reason_for_recut: self.get_string(row, "Reason for Recut"),
            reason_for_fail: self.get_string(row, "Reason for Fail"),
            reason_code: self.get_string(row, "Reason Code"),

            // people
            manager: self.get_string(row, "Manager"),
            operator: self.get_string(row, "SMO/PA"),
            cutting_operator: self.get_string(row, "CMO"),

            row_number,
        }
    }

    fn map_recut_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawRecutRow {
        RawRecutRow {
            code: self.get_string(row, "CODE"),
            sku: self.get_string(row, "SKU"),
            material: self.get_string(row, "Material"),
            cut_location: self.get_string(row, "Cut/Length"),
            qty: self.get_string(row, "QTY"),
            operator: self.get_string(row, "Operator/Order#"),
            order_number: self.get_string(row, "Order#"),
            document_number: self.get_string(row, "Document_No"),
            handler: self.get_string(row, "PA"),
            time: self.get_string(row, "Time"),
            date: self.get_string(row, "Date"),
            due_date: self.get_string(row, "Due Date"),

            // flags
            on_list: self.get_string(row, "On list"),
            done: self.get_string(row, "Done"),
            scrapped: self.get_string(row, "scrap?"),
            recut: self.get_string(row, "RECUT?"),
            failed: self.get_string(row, "FAILED?"),
            failed_qty: self.get_string(row, "QTY Failed"),
            date_scrapped: self.get_string(row, "Date Scrapped"),

            row_number,
        }
    }
}

impl FieldMapper {
    /// Column aliases seen across sheet revisions
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            "Repair Discovered" => &["Repair Discovered", "Discovered"],
            "SKU-Colorway-Size" => &["SKU-Colorway-Size", "SKU"],
            "PR#" => &["PR#", "Order#", "Order Number"],
            "Repair Time (min)" => &["Repair Time (min)", "Repair Time"],
            "SMO/PA" => &["SMO/PA", "SMO"],
            "CODE" => &["CODE", "Code"],
            "QTY" => &["QTY", "Qty"],
            "Operator/Order#" => &["Operator/Order#", "Operator"],
            "Document_No" => &["Document_No", "Document No", "Document#"],
            "On list" => &["On list", "On List"],
            "scrap?" => &["scrap?", "Scrap?", "SCRAP?"],
            "RECUT?" => &["RECUT?", "Recut?"],
            "FAILED?" => &["FAILED?", "Failed?"],
            _ => &[],
        }
    }

    /// First non-blank value among the key and its aliases
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases = Self::aliases(key);
        let candidates = std::iter::once(key).chain(aliases.iter().copied());

        for alias in candidates {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }
}
