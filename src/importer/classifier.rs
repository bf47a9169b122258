// ==========================================
// Rework Tracker - Error Source Classifier
// ==========================================
// Responsibility: raw reason code → ErrorSource
// Two independent lookup tables, one per source table.
// The same literal ("A") means different things in each table,
// so a lookup is always scoped by SourceTable.
// ==========================================

use crate::domain::{ErrorSource, SourceTable};

// ==========================================
// Repairs-sheet codes ("Reason Code")
// ==========================================
const REPAIR_CODES: &[(&str, ErrorSource)] = &[
    ("A1A", ErrorSource::CuttingOperatorError), // cutting error
    ("A1B", ErrorSource::CuttingOperatorError), // marking error
    ("A1C", ErrorSource::CuttingOperatorError), // kitting error
    ("A1D", ErrorSource::CuttingOperatorError),
    ("A2A", ErrorSource::SewingOperatorError),
    ("A2D", ErrorSource::SewingOperatorError),
    ("A1", ErrorSource::CuttingMachineError),
    ("B1C", ErrorSource::CuttingMachineError),
    ("B1E", ErrorSource::CuttingMachineError),
    ("A", ErrorSource::SewingMachineError),
    ("B2", ErrorSource::SewingMachineError),
    ("B3", ErrorSource::OtherMachineError),
    ("C1", ErrorSource::MaterialDefect),
    ("C2", ErrorSource::MaterialDefect),
    ("C3", ErrorSource::MaterialDefect),
    // legacy sewing codes
    ("S1", ErrorSource::SewingOperatorError),
    ("S2", ErrorSource::SewingOperatorError),
    ("S3", ErrorSource::SewingOperatorError),
    ("S4", ErrorSource::SewingOperatorError),
    ("S5", ErrorSource::SewingOperatorError),
    ("S6", ErrorSource::SewingOperatorError),
    ("S7", ErrorSource::SewingOperatorError),
    ("S8", ErrorSource::SewingOperatorError),
];

// ==========================================
// Recut-list codes ("CODE")
// ==========================================
// Short codes plus the long-form labels used in the sheet's dropdown
const RECUT_CODES: &[(&str, ErrorSource)] = &[
    ("A", ErrorSource::SewingOperatorError),
    ("A: SMO Error", ErrorSource::SewingOperatorError),
    ("A: SMO ERROR", ErrorSource::SewingOperatorError),
    ("B", ErrorSource::CuttingOperatorError),
    ("B: Wrong Material Cut", ErrorSource::CuttingOperatorError),
    ("C", ErrorSource::CuttingOperatorError),
    ("C: Marking error", ErrorSource::CuttingOperatorError),
    ("c", ErrorSource::CuttingOperatorError),
    ("F", ErrorSource::CuttingOperatorError),
    ("F: Material Cut Too Short", ErrorSource::CuttingOperatorError),
    ("L", ErrorSource::CuttingMachineError),
    ("L: Lazer error", ErrorSource::CuttingMachineError),
    ("AMS", ErrorSource::SewingMachineError),
    ("AMS: AMS error", ErrorSource::SewingMachineError),
    ("A*", ErrorSource::OtherMachineError),
    ("A* Machine Error", ErrorSource::OtherMachineError),
    ("D", ErrorSource::MaterialDefect),
    ("D: Material Defect", ErrorSource::MaterialDefect),
    ("E", ErrorSource::Other),
    ("E: Missing Pieces", ErrorSource::Other),
    ("P", ErrorSource::Other),
    ("P: PA Error", ErrorSource::Other),
    ("A/D", ErrorSource::Other),
];

fn lookup_in(table: &[(&str, ErrorSource)], code: &str) -> Option<ErrorSource> {
    let code = code.trim();
    table
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, source)| *source)
}

/// Repairs-sheet lookup; None when the code is not in the table
pub fn lookup_repair_code(code: &str) -> Option<ErrorSource> {
    lookup_in(REPAIR_CODES, code)
}

/// Recut-list lookup; None when the code is not in the table
pub fn lookup_recut_code(code: &str) -> Option<ErrorSource> {
    lookup_in(RECUT_CODES, code)
}

/// Classify a repairs-sheet reason code (total: unknown → Other)
pub fn classify_repair_code(code: &str) -> ErrorSource {
    lookup_repair_code(code).unwrap_or(ErrorSource::Other)
}

/// Classify a recut-list code (total: unknown → Other)
pub fn classify_recut_code(code: &str) -> ErrorSource {
    lookup_recut_code(code).unwrap_or(ErrorSource::Other)
}

// ==========================================
// ErrorSourceClassifier
// ==========================================
pub struct ErrorSourceClassifier;

impl ErrorSourceClassifier {
    /// Lookup scoped by source table; None = not in that table
    pub fn lookup(&self, table: SourceTable, code: &str) -> Option<ErrorSource> {
        match table {
            SourceTable::Repairs => lookup_repair_code(code),
            SourceTable::Recuts => lookup_recut_code(code),
        }
    }

    pub fn classify(&self, table: SourceTable, code: &str) -> ErrorSource {
        self.lookup(table, code).unwrap_or(ErrorSource::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_codes() {
        assert_eq!(classify_repair_code("A1A"), ErrorSource::CuttingOperatorError);
        assert_eq!(classify_repair_code("A1D"), ErrorSource::CuttingOperatorError);
        assert_eq!(classify_repair_code("A2D"), ErrorSource::SewingOperatorError);
        assert_eq!(classify_repair_code("A1"), ErrorSource::CuttingMachineError);
        assert_eq!(classify_repair_code("B1E"), ErrorSource::CuttingMachineError);
        assert_eq!(classify_repair_code("B2"), ErrorSource::SewingMachineError);
        assert_eq!(classify_repair_code("B3"), ErrorSource::OtherMachineError);
        assert_eq!(classify_repair_code("C2"), ErrorSource::MaterialDefect);
        assert_eq!(classify_repair_code(" A1A "), ErrorSource::CuttingOperatorError);
    }

    #[test]
    fn test_legacy_sewing_codes() {
        for n in 1..=8 {
            let code = format!("S{}", n);
            assert_eq!(classify_repair_code(&code), ErrorSource::SewingOperatorError);
        }
        assert_eq!(classify_repair_code("S9"), ErrorSource::Other);
    }

    #[test]
    fn test_recut_codes() {
        assert_eq!(classify_recut_code("A: SMO Error"), ErrorSource::SewingOperatorError);
        assert_eq!(classify_recut_code("A*"), ErrorSource::OtherMachineError);
        assert_eq!(classify_recut_code("B"), ErrorSource::CuttingOperatorError);
        assert_eq!(classify_recut_code("F: Material Cut Too Short"), ErrorSource::CuttingOperatorError);
        assert_eq!(classify_recut_code("L"), ErrorSource::CuttingMachineError);
        assert_eq!(classify_recut_code("AMS"), ErrorSource::SewingMachineError);
        assert_eq!(classify_recut_code("D"), ErrorSource::MaterialDefect);
        assert_eq!(classify_recut_code("P"), ErrorSource::Other);
        assert_eq!(classify_recut_code("A/D"), ErrorSource::Other);
    }

    #[test]
    fn test_recut_sheet_spelling_variants() {
        assert_eq!(classify_recut_code("A: SMO ERROR"), ErrorSource::SewingOperatorError);
        assert_eq!(classify_recut_code(" c "), ErrorSource::CuttingOperatorError);
        // only the stored spellings match
        assert_eq!(classify_recut_code("b"), ErrorSource::Other);
        assert_eq!(classify_recut_code("a: smo error"), ErrorSource::Other);
    }

    #[test]
    fn test_same_literal_differs_per_table() {
        assert_eq!(classify_repair_code("A"), ErrorSource::SewingMachineError);
        assert_eq!(classify_recut_code("A"), ErrorSource::SewingOperatorError);

        let classifier = ErrorSourceClassifier;
        assert_ne!(
            classifier.classify(SourceTable::Repairs, "A"),
            classifier.classify(SourceTable::Recuts, "A")
        );
    }

    #[test]
    fn test_unknown_codes_are_other() {
        for code in ["", "   ", "ZZZ", "a1a", "A1AA", "B1", "a: smo error", "AMS?"] {
            assert_eq!(classify_repair_code(code), ErrorSource::Other, "repair {code:?}");
            assert_eq!(classify_recut_code(code), ErrorSource::Other, "recut {code:?}");
        }
        assert_eq!(lookup_repair_code("ZZZ"), None);
        assert_eq!(lookup_recut_code(""), None);
    }

    #[test]
    fn test_no_code_in_both_tables_unified() {
        // repair-only codes never leak into recut classification
        assert_eq!(classify_recut_code("A1A"), ErrorSource::Other);
        assert_eq!(classify_repair_code("AMS"), ErrorSource::Other);
    }
}
