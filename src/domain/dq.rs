// ==========================================
// Rework Tracker - Data Quality Report
// ==========================================
// Every dropped row and every fallback applied while building
// canonical records is recorded here and surfaced to the caller
// ==========================================

use crate::domain::types::SourceTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// DqLevel
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,   // row dropped
    Warning, // fallback applied, row kept
    Info,    // recorded only
}

// ==========================================
// DqIssue - what went wrong
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DqIssue {
    MissingDate,              // required date blank or unparseable
    MissingProductId,         // required SKU blank
    NoReworkQuantity,         // all quantities zero (optional drop rule)
    InvalidNumber,            // non-numeric quantity → 0
    NegativeNumber,           // negative quantity/time → 0
    InvalidDate,              // optional date unparseable → None
    CorruptedBoolean,         // unrecognized flag value → false
    UnclassifiedCode,         // code not in its lookup table → Other
    MissingCode,              // blank code → Other
    UnknownDiscoveryLocation, // not SEWING/QC
}

impl DqIssue {
    pub fn level(&self) -> DqLevel {
        match self {
            DqIssue::MissingDate | DqIssue::MissingProductId | DqIssue::NoReworkQuantity => {
                DqLevel::Error
            }
            DqIssue::MissingCode => DqLevel::Info,
            _ => DqLevel::Warning,
        }
    }
}

// ==========================================
// DqViolation
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub table: SourceTable,
    pub row_number: usize,
    pub level: DqLevel,
    pub issue: DqIssue,
    pub field: String,
    pub message: String,
}

impl DqViolation {
    pub fn new(
        table: SourceTable,
        row_number: usize,
        issue: DqIssue,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            table,
            row_number,
            level: issue.level(),
            issue,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ==========================================
// DqSummary - per table counts
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize, // raw rows received
    pub kept: usize,       // canonical records produced
    pub dropped: usize,    // rows with an Error violation
    pub fallbacks: usize,  // Warning violations
}

// ==========================================
// DqReport
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub batch_id: String,
    pub repairs: DqSummary,
    pub recuts: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    /// Number of violations of one kind across both tables
    pub fn count(&self, issue: DqIssue) -> usize {
        self.violations.iter().filter(|v| v.issue == issue).count()
    }

    /// Number of violations of one kind in one table
    pub fn count_in(&self, table: SourceTable, issue: DqIssue) -> usize {
        self.violations
            .iter()
            .filter(|v| v.table == table && v.issue == issue)
            .count()
    }

    /// Counts keyed by issue kind (ordered)
    pub fn issue_counts(&self) -> BTreeMap<DqIssue, usize> {
        let mut counts = BTreeMap::new();
        for v in &self.violations {
            *counts.entry(v.issue).or_insert(0) += 1;
        }
        counts
    }

    pub fn dropped_rows(&self) -> usize {
        self.repairs.dropped + self.recuts.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_levels() {
        assert_eq!(DqIssue::MissingDate.level(), DqLevel::Error);
        assert_eq!(DqIssue::MissingProductId.level(), DqLevel::Error);
        assert_eq!(DqIssue::CorruptedBoolean.level(), DqLevel::Warning);
        assert_eq!(DqIssue::MissingCode.level(), DqLevel::Info);
    }

    #[test]
    fn test_report_counts() {
        let report = DqReport {
            batch_id: "b1".to_string(),
            violations: vec![
                DqViolation::new(SourceTable::Repairs, 1, DqIssue::MissingDate, "Date", "blank"),
                DqViolation::new(SourceTable::Recuts, 4, DqIssue::MissingDate, "Date", "blank"),
                DqViolation::new(SourceTable::Recuts, 5, DqIssue::CorruptedBoolean, "Done", "`"),
            ],
            ..Default::default()
        };

        assert_eq!(report.count(DqIssue::MissingDate), 2);
        assert_eq!(report.count_in(SourceTable::Recuts, DqIssue::MissingDate), 1);
        assert_eq!(report.issue_counts().get(&DqIssue::CorruptedBoolean), Some(&1));
    }
}
