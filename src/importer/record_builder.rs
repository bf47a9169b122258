// ==========================================
// Rework Tracker - Record Model Builder
// ==========================================
// Responsibility: raw rows → canonical RepairRecord / RecutRecord
// Flow per row: required-field check → clean → classify → SKU rollup
// Every drop and every fallback becomes a DqViolation
// ==========================================

use crate::domain::{
    DiscoveryLocation, DqIssue, DqLevel, DqReport, DqSummary, DqViolation, RawRecutRow,
    RawRepairRow, RecutRecord, RepairRecord, ReworkDataset, SourceTable,
};
use crate::importer::classifier::ErrorSourceClassifier;
use crate::importer::data_cleaner::{Cleaned, DataCleaner as DataCleanerImpl};
use crate::importer::importer_trait::DataCleaner;
use crate::importer::sku_resolver::parent_sku;
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RowContext - violation sink for one source row
// ==========================================
struct RowContext<'a> {
    table: SourceTable,
    row_number: usize,
    violations: &'a mut Vec<DqViolation>,
}

impl RowContext<'_> {
    fn push(&mut self, issue: DqIssue, field: &str, message: impl Into<String>) {
        self.violations
            .push(DqViolation::new(self.table, self.row_number, issue, field, message));
    }

    /// Unwrap a cleaned value, recording its fallback if any
    fn take<T>(&mut self, cleaned: Cleaned<T>, field: &str, raw: Option<&str>) -> T {
        if let Some(issue) = cleaned.issue {
            let message = format!("'{}' replaced by fallback", raw.unwrap_or_default());
            self.push(issue, field, message);
        }
        cleaned.value
    }
}

// ==========================================
// RecordBuilder
// ==========================================
pub struct RecordBuilder {
    cleaner: Box<dyn DataCleaner>,
    classifier: ErrorSourceClassifier,
    drop_zero_quantity_rows: bool,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(false)
    }
}

impl RecordBuilder {
    pub fn new(drop_zero_quantity_rows: bool) -> Self {
        Self::with_cleaner(Box::new(DataCleanerImpl), drop_zero_quantity_rows)
    }

    pub fn with_cleaner(cleaner: Box<dyn DataCleaner>, drop_zero_quantity_rows: bool) -> Self {
        Self {
            cleaner,
            classifier: ErrorSourceClassifier,
            drop_zero_quantity_rows,
        }
    }

    /// Build the canonical dataset for one raw snapshot
    #[instrument(skip_all, fields(batch_id = tracing::field::Empty))]
    pub fn build(&self, repairs: &[RawRepairRow], recuts: &[RawRecutRow]) -> ReworkDataset {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let mut violations = Vec::new();

        debug!(rows = repairs.len(), "building repair records");
        let repair_records: Vec<RepairRecord> = repairs
            .iter()
            .filter_map(|raw| self.build_repair(raw, &mut violations))
            .collect();

        debug!(rows = recuts.len(), "building recut records");
        let recut_records: Vec<RecutRecord> = recuts
            .iter()
            .filter_map(|raw| self.build_recut(raw, &mut violations))
            .collect();

        let repair_summary = summarize(SourceTable::Repairs, repairs.len(), repair_records.len(), &violations);
        let recut_summary = summarize(SourceTable::Recuts, recuts.len(), recut_records.len(), &violations);

        if repair_summary.dropped + recut_summary.dropped > 0 {
            warn!(
                repairs_dropped = repair_summary.dropped,
                recuts_dropped = recut_summary.dropped,
                "rows dropped for missing required fields"
            );
        }
        info!(
            batch_id = %batch_id,
            repairs = repair_records.len(),
            recuts = recut_records.len(),
            violations = violations.len(),
            "canonical records built"
        );

        ReworkDataset {
            repairs: repair_records,
            recuts: recut_records,
            dq_report: DqReport {
                batch_id,
                repairs: repair_summary,
                recuts: recut_summary,
                violations,
            },
        }
    }

    /// One repairs-sheet row; None when the row is dropped
    pub fn build_repair(
        &self,
        raw: &RawRepairRow,
        violations: &mut Vec<DqViolation>,
    ) -> Option<RepairRecord> {
        let mut ctx = RowContext {
            table: SourceTable::Repairs,
            row_number: raw.row_number,
            violations,
        };

        let date = self.required_date(raw.date.as_deref(), "Date", &mut ctx);
        let product_id = self.required_text(raw.sku.as_deref(), "SKU-Colorway-Size", &mut ctx);
        let (date, product_id) = match (date, product_id) {
            (Some(d), Some(p)) => (d, p),
            _ => return None,
        };

        let c = self.cleaner.as_ref();
        let repair_qty = ctx.take(c.parse_quantity(raw.repair_qty.as_deref()), "Repair Qty", raw.repair_qty.as_deref());
        let recut_qty = ctx.take(c.parse_quantity(raw.recut_qty.as_deref()), "Recut Qty", raw.recut_qty.as_deref());
        let fail_qty = ctx.take(c.parse_quantity(raw.fail_qty.as_deref()), "Fail Qty", raw.fail_qty.as_deref());

        if self.drop_zero_quantity_rows && repair_qty + recut_qty + fail_qty == 0 {
            ctx.push(
                DqIssue::NoReworkQuantity,
                "Repair Qty/Recut Qty/Fail Qty",
                "repair, recut and fail quantities are all zero",
            );
            return None;
        }

        let total_qty = ctx.take(c.parse_quantity(raw.total_qty.as_deref()), "Total Qty", raw.total_qty.as_deref());
        let repair_time_min = ctx.take(
            c.parse_quantity(raw.repair_time_min.as_deref()),
            "Repair Time (min)",
            raw.repair_time_min.as_deref(),
        );
        let repair_fraction = ctx.take(
            c.parse_fraction(raw.repair_fraction.as_deref()),
            "% Repaired",
            raw.repair_fraction.as_deref(),
        );

        let discovered_at = raw.repair_discovered.as_deref().and_then(DiscoveryLocation::parse);
        if discovered_at.is_none() {
            ctx.push(
                DqIssue::UnknownDiscoveryLocation,
                "Repair Discovered",
                format!("'{}' is neither SEWING nor QC", raw.repair_discovered.as_deref().unwrap_or_default()),
            );
        }

        let reason_code = trimmed_text(raw.reason_code.as_deref());
        let error_source = self.classify(SourceTable::Repairs, &reason_code, "Reason Code", &mut ctx);

        let cutting_operator = raw
            .cutting_operator
            .as_deref()
            .map(|name| c.normalize_operator_name(Some(name)))
            .filter(|name| !name.is_empty());

        Some(RepairRecord {
            date,
            discovered_at,
            parent_sku: parent_sku(&product_id),
            product_id,
            order_number: trimmed_text(raw.order_number.as_deref()),
            total_qty,
            repair_qty,
            repair_time_min,
            repair_fraction,
            reason_for_repair: trimmed_text(raw.reason_for_repair.as_deref()),
            recut_qty,
            reason_for_recut: trimmed_text(raw.reason_for_recut.as_deref()),
            fail_qty,
            reason_for_fail: trimmed_text(raw.reason_for_fail.as_deref()),
            reason_code,
            manager: c.normalize_display_name(raw.manager.as_deref()),
            operator: c.normalize_operator_name(raw.operator.as_deref()),
            cutting_operator,
            error_source,
        })
    }

    /// One recut-list row; None when the row is dropped
    pub fn build_recut(
        &self,
        raw: &RawRecutRow,
        violations: &mut Vec<DqViolation>,
    ) -> Option<RecutRecord> {
        let mut ctx = RowContext {
            table: SourceTable::Recuts,
            row_number: raw.row_number,
            violations,
        };

        let entry_date = self.required_date(raw.date.as_deref(), "Date", &mut ctx);
        let product_id = self.required_text(raw.sku.as_deref(), "SKU", &mut ctx);
        let (entry_date, product_id) = match (entry_date, product_id) {
            (Some(d), Some(p)) => (d, p),
            _ => return None,
        };

        let c = self.cleaner.as_ref();
        let quantity = ctx.take(c.parse_quantity(raw.qty.as_deref()), "QTY", raw.qty.as_deref());

        if self.drop_zero_quantity_rows && quantity == 0 {
            ctx.push(DqIssue::NoReworkQuantity, "QTY", "recut quantity is zero");
            return None;
        }

        let failed_qty = ctx.take(c.parse_quantity(raw.failed_qty.as_deref()), "QTY Failed", raw.failed_qty.as_deref());

        let entry_time = match raw.time.as_deref() {
            None => None,
            Some(text) => {
                let parsed = c.parse_time(text);
                if parsed.is_none() {
                    ctx.push(DqIssue::InvalidDate, "Time", format!("'{}' is not a time of day", text));
                }
                parsed
            }
        };
        let due_date = self.optional_date(raw.due_date.as_deref(), "Due Date", &mut ctx);
        let scrapped_date = self.optional_date(raw.date_scrapped.as_deref(), "Date Scrapped", &mut ctx);

        let on_list = ctx.take(c.coerce_bool(raw.on_list.as_deref()), "On list", raw.on_list.as_deref());
        let done = ctx.take(c.coerce_bool(raw.done.as_deref()), "Done", raw.done.as_deref());
        let scrapped = ctx.take(c.coerce_bool(raw.scrapped.as_deref()), "scrap?", raw.scrapped.as_deref());
        let recut = ctx.take(c.coerce_bool(raw.recut.as_deref()), "RECUT?", raw.recut.as_deref());
        let failed = ctx.take(c.coerce_bool(raw.failed.as_deref()), "FAILED?", raw.failed.as_deref());

        let code = trimmed_text(raw.code.as_deref());
        let error_source = self.classify(SourceTable::Recuts, &code, "CODE", &mut ctx);

        Some(RecutRecord {
            code,
            parent_sku: parent_sku(&product_id),
            product_id,
            material: trimmed_text(raw.material.as_deref()),
            cut_location: trimmed_text(raw.cut_location.as_deref()),
            quantity,
            operator: c.normalize_operator_name(raw.operator.as_deref()),
            order_number: trimmed_text(raw.order_number.as_deref()),
            document_number: trimmed_text(raw.document_number.as_deref()),
            handler: c.normalize_display_name(raw.handler.as_deref()),
            entry_date,
            entry_time,
            due_date,
            on_list,
            done,
            scrapped,
            recut,
            failed,
            failed_qty,
            scrapped_date,
            error_source,
        })
    }

    // ===== helpers =====

    fn required_date(&self, raw: Option<&str>, field: &str, ctx: &mut RowContext) -> Option<NaiveDate> {
        match raw {
            None => {
                ctx.push(DqIssue::MissingDate, field, "date is blank");
                None
            }
            Some(text) => {
                let parsed = self.cleaner.parse_date(text);
                if parsed.is_none() {
                    ctx.push(DqIssue::MissingDate, field, format!("'{}' is not a date", text));
                }
                parsed
            }
        }
    }

    fn required_text(&self, raw: Option<&str>, field: &str, ctx: &mut RowContext) -> Option<String> {
        match raw.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Some(v.to_string()),
            None => {
                ctx.push(DqIssue::MissingProductId, field, "product identifier is blank");
                None
            }
        }
    }

    fn optional_date(&self, raw: Option<&str>, field: &str, ctx: &mut RowContext) -> Option<NaiveDate> {
        let text = raw?;
        let parsed = self.cleaner.parse_date(text);
        if parsed.is_none() {
            ctx.push(DqIssue::InvalidDate, field, format!("'{}' is not a date", text));
        }
        parsed
    }

    fn classify(
        &self,
        table: SourceTable,
        code: &str,
        field: &str,
        ctx: &mut RowContext,
    ) -> crate::domain::ErrorSource {
        if code.is_empty() {
            ctx.push(DqIssue::MissingCode, field, "code is blank");
        } else if self.classifier.lookup(table, code).is_none() {
            ctx.push(DqIssue::UnclassifiedCode, field, format!("'{}' is not a known code", code));
        }
        self.classifier.classify(table, code)
    }
}

fn trimmed_text(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}

fn summarize(
    table: SourceTable,
    total_rows: usize,
    kept: usize,
    violations: &[DqViolation],
) -> DqSummary {
    let fallbacks = violations
        .iter()
        .filter(|v| v.table == table && v.level == DqLevel::Warning)
        .count();

    DqSummary {
        total_rows,
        kept,
        dropped: total_rows - kept,
        fallbacks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorSource;

    fn repair_row(n: usize, date: &str, sku: &str, code: &str, fail: &str) -> RawRepairRow {
        RawRepairRow {
            date: Some(date.to_string()),
            sku: Some(sku.to_string()),
            reason_code: Some(code.to_string()),
            fail_qty: Some(fail.to_string()),
            repair_discovered: Some("SEWING".to_string()),
            operator: Some("JSMITH".to_string()),
            manager: Some("WILL".to_string()),
            row_number: n,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_repair_attaches_derived_fields() {
        let builder = RecordBuilder::default();
        let mut violations = Vec::new();

        let record = builder
            .build_repair(&repair_row(1, "2025-01-06", "TRK100-BK-L", "A1A", "1"), &mut violations)
            .unwrap();

        assert_eq!(record.error_source, ErrorSource::CuttingOperatorError);
        assert_eq!(record.parent_sku, "TRK100-L");
        assert_eq!(record.operator, "JSmith");
        assert_eq!(record.manager, "Will");
        assert_eq!(record.fail_qty, 1);
        assert_eq!(record.discovered_at, Some(DiscoveryLocation::Sewing));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_rows_missing_required_fields_are_dropped_and_counted() {
        let builder = RecordBuilder::default();
        let rows = vec![
            repair_row(1, "2025-01-06", "TRK100-BK", "A1A", "0"),
            RawRepairRow {
                date: None,
                ..repair_row(2, "", "TRK100-BK", "A1A", "0")
            },
            repair_row(3, "2025-01-06", "", "A1A", "0"),
            RawRepairRow {
                sku: None,
                ..repair_row(4, "not-a-date", "", "B2", "0")
            },
        ];

        let dataset = builder.build(&rows, &[]);

        assert_eq!(dataset.repairs.len(), 1);
        assert_eq!(dataset.dq_report.repairs.total_rows, 4);
        assert_eq!(dataset.dq_report.repairs.dropped, 3);
        assert_eq!(dataset.dq_report.count(DqIssue::MissingDate), 2);
        assert_eq!(dataset.dq_report.count(DqIssue::MissingProductId), 2);
    }

    #[test]
    fn test_unknown_codes_fall_back_to_other_and_are_reported() {
        let builder = RecordBuilder::default();
        let rows = vec![
            repair_row(1, "2025-01-06", "X-BK", "ZZ9", "0"),
            repair_row(2, "2025-01-06", "X-BK", "", "0"),
        ];

        let dataset = builder.build(&rows, &[]);

        assert!(dataset.repairs.iter().all(|r| r.error_source == ErrorSource::Other));
        assert_eq!(dataset.dq_report.count(DqIssue::UnclassifiedCode), 1);
        assert_eq!(dataset.dq_report.count(DqIssue::MissingCode), 1);
    }

    #[test]
    fn test_recut_flags_and_corrupted_booleans() {
        let builder = RecordBuilder::default();
        let raw = RawRecutRow {
            code: Some("A: SMO Error".to_string()),
            sku: Some("TRK100-CB-M".to_string()),
            qty: Some("2".to_string()),
            date: Some("2025-01-07".to_string()),
            operator: Some("mangela".to_string()),
            handler: Some("WILL".to_string()),
            done: Some("x".to_string()),
            scrapped: Some("`".to_string()),
            on_list: Some("TRUE".to_string()),
            row_number: 1,
            ..Default::default()
        };

        let dataset = builder.build(&[], &[raw]);
        let recut = &dataset.recuts[0];

        assert_eq!(recut.error_source, ErrorSource::SewingOperatorError);
        assert_eq!(recut.operator, "MAngela");
        assert_eq!(recut.handler, "Will");
        assert!(recut.done);
        assert!(recut.on_list);
        assert!(!recut.scrapped);
        assert!(!recut.failed);
        assert_eq!(dataset.dq_report.count(DqIssue::CorruptedBoolean), 1);
        assert_eq!(dataset.dq_report.recuts.fallbacks, 1);
    }

    #[test]
    fn test_zero_quantity_rows_dropped_only_when_enabled() {
        let rows = vec![repair_row(1, "2025-01-06", "X-BK", "A1A", "0")];

        let keep = RecordBuilder::new(false).build(&rows, &[]);
        assert_eq!(keep.repairs.len(), 1);

        let drop = RecordBuilder::new(true).build(&rows, &[]);
        assert!(drop.repairs.is_empty());
        assert_eq!(drop.dq_report.count(DqIssue::NoReworkQuantity), 1);
        assert_eq!(drop.dq_report.repairs.dropped, 1);
    }

    #[test]
    fn test_unknown_discovery_location_kept_and_counted() {
        let raw = RawRepairRow {
            repair_discovered: Some("PACKING".to_string()),
            ..repair_row(1, "2025-01-06", "X-BK", "A1A", "0")
        };

        let dataset = RecordBuilder::default().build(&[raw], &[]);

        assert_eq!(dataset.repairs[0].discovered_at, None);
        assert_eq!(dataset.dq_report.count(DqIssue::UnknownDiscoveryLocation), 1);
    }
}
