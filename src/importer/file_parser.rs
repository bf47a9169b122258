// ==========================================
// Rework Tracker - File Parser
// ==========================================
// Stage 0: file reading and parsing
// Supports: Excel (.xlsx/.xls, named sheet) / CSV (.csv, one table per file)
// The header row is located by an anchor column, since the
// repairs sheet carries a title row above its header.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, RawTable};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Rows scanned when looking for the header row
pub const HEADER_SCAN_ROWS: usize = 10;

// ==========================================
// Shared grid → table conversion
// ==========================================

/// Locate the header row (first row containing `anchor`) and turn the
/// rows below it into header → value maps. Fully blank rows are skipped.
pub fn grid_to_table(grid: Vec<Vec<String>>, sheet: &str, anchor: &str) -> ImportResult<RawTable> {
    let header_idx = grid
        .iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| row.iter().any(|cell| cell.trim() == anchor))
        .ok_or_else(|| ImportError::HeaderNotFound {
            sheet: sheet.to_string(),
            anchor: anchor.to_string(),
        })?;

    let headers: Vec<String> = grid[header_idx]
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in grid.into_iter().skip(header_idx + 1) {
        let mut row_map = HashMap::new();

        for (col_idx, value) in row.into_iter().enumerate() {
            match headers.get(col_idx) {
                // unnamed columns carry no mapping
                Some(header) if !header.is_empty() => {
                    row_map
                        .entry(header.clone())
                        .or_insert_with(|| value.trim().to_string());
                }
                _ => {}
            }
        }

        // skip fully blank rows
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        records.push(row_map);
    }

    debug!(sheet, header_row = header_idx, rows = records.len(), "table parsed");
    Ok(records)
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_table(&self, file_path: &Path, sheet: &str, anchor: &str) -> ImportResult<RawTable> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if !ext.is_empty() && ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // rows may differ in length
            .from_reader(file);

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result?;
            grid.push(record.iter().map(|v| v.to_string()).collect());
        }

        grid_to_table(grid, sheet, anchor)
    }
}

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// Cell → text; date cells become "YYYY-MM-DD HH:MM:SS"
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty | Data::Error(_) => String::new(),
            Data::String(s) => s.trim().to_string(),
            Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
            Data::DateTime(_) => cell
                .as_datetime()
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_table(&self, file_path: &Path, sheet: &str, anchor: &str) -> ImportResult<RawTable> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(ImportError::SheetNotFound(sheet.to_string()));
        }

        let range = workbook.worksheet_range(sheet)?;
        let grid: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(Self::cell_to_string).collect())
            .collect();

        grid_to_table(grid, sheet, anchor)
    }
}

// ==========================================
// Universal parser (dispatch by extension)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P, sheet: &str, anchor: &str) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = extension_of(path);

        match ext.as_str() {
            "csv" => CsvParser.parse_table(path, sheet, anchor),
            "xlsx" | "xls" => ExcelParser.parse_table(path, sheet, anchor),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&[
            "Date,SKU-Colorway-Size,Repair Qty",
            "2025-01-06,TRK100-BK-L,2",
            "2025-01-07,TRK100-CB-M,1",
        ]);

        let records = CsvParser.parse_table(temp_file.path(), "", "Date").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("SKU-Colorway-Size"), Some(&"TRK100-BK-L".to_string()));
        assert_eq!(records[1].get("Repair Qty"), Some(&"1".to_string()));
    }

    #[test]
    fn test_csv_parser_title_row_above_header() {
        let temp_file = csv_file(&[
            "2025 Sewing Repairs,,",
            "Date,Reason Code,Fail Qty",
            "2025-01-06,A1A,1",
        ]);

        let records = CsvParser.parse_table(temp_file.path(), "", "Date").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Reason Code"), Some(&"A1A".to_string()));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_and_ragged_lines() {
        let temp_file = csv_file(&["CODE,SKU,QTY", "B,TRK100-BK,3", ",,", "D,TRK200", "  ,  , "]);

        let records = CsvParser.parse_table(temp_file.path(), "", "CODE").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("QTY"), None);
    }

    #[test]
    fn test_csv_parser_missing_anchor() {
        let temp_file = csv_file(&["Foo,Bar", "1,2"]);

        let result = CsvParser.parse_table(temp_file.path(), "Recut List", "CODE");
        assert!(matches!(result, Err(ImportError::HeaderNotFound { .. })));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_table(Path::new("non_existent.csv"), "", "Date");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse("report.pdf", "", "Date");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_excel_cell_formatting() {
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(ExcelParser::cell_to_string(&Data::String(" QC ".to_string())), "QC");
        assert_eq!(ExcelParser::cell_to_string(&Data::Empty), "");
    }
}
