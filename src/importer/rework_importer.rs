// ==========================================
// Rework Tracker - Rework Importer
// ==========================================
// Responsibility: wire the import stages together
// Flow: parse → map → build (clean/classify/roll up) → DQ report
// Only I/O faults surface as errors; bad data lands in the DQ report
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::{RawRecutRow, RawRepairRow, ReworkDataset};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::{CsvParser, ExcelParser};
use crate::importer::importer_trait::{FieldMapper, FileParser, RawTable};
use crate::importer::record_builder::RecordBuilder;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Column that marks the header row of the repairs sheet
pub const REPAIRS_ANCHOR: &str = "Date";
/// Column that marks the header row of the recut list
pub const RECUTS_ANCHOR: &str = "CODE";

pub struct ReworkImporter {
    repairs_sheet: String,
    recuts_sheet: String,

    excel_parser: Box<dyn FileParser>,
    csv_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    record_builder: RecordBuilder,
}

impl ReworkImporter {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            repairs_sheet: config.repairs_sheet.clone(),
            recuts_sheet: config.recuts_sheet.clone(),
            excel_parser: Box::new(ExcelParser),
            csv_parser: Box::new(CsvParser),
            field_mapper: Box::new(FieldMapperImpl),
            record_builder: RecordBuilder::new(config.drop_zero_quantity_rows),
        }
    }

    /// Import both tables from one workbook
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_workbook<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ReworkDataset> {
        let path = file_path.as_ref();

        debug!(sheet = %self.repairs_sheet, "parsing repairs sheet");
        let repairs = self
            .excel_parser
            .parse_table(path, &self.repairs_sheet, REPAIRS_ANCHOR)?;

        debug!(sheet = %self.recuts_sheet, "parsing recut sheet");
        let recuts = self
            .excel_parser
            .parse_table(path, &self.recuts_sheet, RECUTS_ANCHOR)?;

        info!(repairs = repairs.len(), recuts = recuts.len(), "workbook parsed");
        Ok(self.import_tables(&repairs, &recuts))
    }

    /// Import the two tables from one CSV file each
    #[instrument(skip_all)]
    pub fn import_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        repairs_path: P,
        recuts_path: Q,
    ) -> ImportResult<ReworkDataset> {
        let repairs = self
            .csv_parser
            .parse_table(repairs_path.as_ref(), &self.repairs_sheet, REPAIRS_ANCHOR)?;
        let recuts = self
            .csv_parser
            .parse_table(recuts_path.as_ref(), &self.recuts_sheet, RECUTS_ANCHOR)?;

        info!(repairs = repairs.len(), recuts = recuts.len(), "csv tables parsed");
        Ok(self.import_tables(&repairs, &recuts))
    }

    /// Build the canonical dataset from already-parsed tables
    pub fn import_tables(&self, repairs: &RawTable, recuts: &RawTable) -> ReworkDataset {
        let raw_repairs: Vec<RawRepairRow> = repairs
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_repair_row(row, idx + 1))
            .collect();

        let raw_recuts: Vec<RawRecutRow> = recuts
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_recut_row(row, idx + 1))
            .collect();

        self.record_builder.build(&raw_repairs, &raw_recuts)
    }
}
