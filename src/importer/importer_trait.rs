// ==========================================
// Rework Tracker - Importer Traits
// ==========================================
// Seams of the ingestion pipeline (no implementations here)
// parse → map → clean → classify/roll up → build
// ==========================================

use crate::domain::{RawRecutRow, RawRepairRow};
use crate::importer::data_cleaner::Cleaned;
use crate::importer::error::ImportResult;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::path::Path;

/// One parsed table: header name → trimmed cell text, blank rows removed
pub type RawTable = Vec<HashMap<String, String>>;

// ==========================================
// FileParser Trait
// ==========================================
// Implementors: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// Parse one table out of a file
    ///
    /// # Parameters
    /// - file_path: source file
    /// - sheet: sheet name (ignored by single-table formats)
    /// - anchor: a column name the header row must contain
    fn parse_table(&self, file_path: &Path, sheet: &str, anchor: &str) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// Implementor: FieldMapper
// Unknown columns are ignored; missing columns read as None
pub trait FieldMapper: Send + Sync {
    fn map_repair_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawRepairRow;

    fn map_recut_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawRecutRow;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// Implementor: DataCleaner
// Nothing here may fail: every method returns a value plus an optional DQ issue
pub trait DataCleaner: Send + Sync {
    /// Operator / handler code: "JSMITH" → "JSmith"
    fn normalize_operator_name(&self, raw: Option<&str>) -> String;

    /// Manager / PA display name: "WILL" → "Will"
    fn normalize_display_name(&self, raw: Option<&str>) -> String;

    /// Boolean flag with truthy-set coercion
    fn coerce_bool(&self, raw: Option<&str>) -> Cleaned<bool>;

    /// Non-negative integer quantity
    fn parse_quantity(&self, raw: Option<&str>) -> Cleaned<i64>;

    /// Optional fraction ("0.5", "50%")
    fn parse_fraction(&self, raw: Option<&str>) -> Cleaned<Option<f64>>;

    /// Lenient date parse (text formats + Excel serials)
    fn parse_date(&self, raw: &str) -> Option<NaiveDate>;

    /// Lenient time-of-day parse
    fn parse_time(&self, raw: &str) -> Option<NaiveTime>;
}
