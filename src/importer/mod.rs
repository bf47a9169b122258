// ==========================================
// Rework Tracker - Importer Layer
// ==========================================
// Responsibility: external tables → canonical records + DQ report
// Supports: Excel, CSV, already-parsed tables
// ==========================================

pub mod classifier;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod record_builder;
pub mod rework_importer;
pub mod sku_resolver;

// core types
pub use classifier::{classify_recut_code, classify_repair_code, ErrorSourceClassifier};
pub use data_cleaner::{
    is_truthy, normalize_display_name, normalize_operator_name, Cleaned,
    DataCleaner as DataCleanerImpl,
};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use record_builder::RecordBuilder;
pub use rework_importer::ReworkImporter;
pub use sku_resolver::parent_sku;

// traits
pub use importer_trait::{DataCleaner, FieldMapper, FileParser, RawTable};
