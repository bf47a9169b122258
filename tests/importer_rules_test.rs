// ==========================================
// Importer rules integration tests
// ==========================================
// Scope: name normalization, code classification, parent SKU
// through the public importer API
// ==========================================

use rework_tracker::importer::{
    classify_recut_code, classify_repair_code, normalize_display_name, normalize_operator_name,
};
use rework_tracker::{parent_sku, ErrorSource, ErrorSourceClassifier, SourceTable};

#[test]
fn test_operator_names_idempotent() {
    for raw in ["jsmith", "JSMITH", "  JSmith ", "akhan", "ab", "x"] {
        let once = normalize_operator_name(raw);
        assert_eq!(normalize_operator_name(&once), once, "not idempotent for {:?}", raw);
    }
    assert_eq!(normalize_operator_name("jsmith"), "JSmith");
    assert_eq!(normalize_operator_name("JSMITH"), "JSmith");
}

#[test]
fn test_display_names_idempotent() {
    for raw in ["will", "WILL", "  wIlL "] {
        let once = normalize_display_name(raw);
        assert_eq!(once, "Will");
        assert_eq!(normalize_display_name(&once), once);
    }
}

#[test]
fn test_repair_codes() {
    assert_eq!(classify_repair_code("A1A"), ErrorSource::CuttingOperatorError);
    assert_eq!(classify_repair_code(" B2 "), ErrorSource::SewingMachineError);
    assert_eq!(classify_repair_code("S7"), ErrorSource::SewingOperatorError);
    assert_eq!(classify_repair_code("C3"), ErrorSource::MaterialDefect);
    assert_eq!(classify_repair_code(""), ErrorSource::Other);
    assert_eq!(classify_repair_code("Q9"), ErrorSource::Other);
}

#[test]
fn test_recut_codes() {
    assert_eq!(classify_recut_code("A: SMO Error"), ErrorSource::SewingOperatorError);
    assert_eq!(classify_recut_code("A*"), ErrorSource::OtherMachineError);
    assert_eq!(classify_recut_code("L: Lazer error"), ErrorSource::CuttingMachineError);
    assert_eq!(classify_recut_code("A/D"), ErrorSource::Other);
    assert_eq!(classify_recut_code("A: SMO ERROR"), ErrorSource::SewingOperatorError);
    assert_eq!(classify_recut_code("c"), ErrorSource::CuttingOperatorError);
}

#[test]
fn test_same_code_differs_by_table() {
    let classifier = ErrorSourceClassifier;
    assert_eq!(
        classifier.classify(SourceTable::Repairs, "A"),
        ErrorSource::SewingMachineError
    );
    assert_eq!(
        classifier.classify(SourceTable::Recuts, "A"),
        ErrorSource::SewingOperatorError
    );
    assert_eq!(classifier.lookup(SourceTable::Recuts, "A1A"), None);
}

#[test]
fn test_parent_sku_rollup() {
    // colour tokens drop wherever they sit; the size token stays (PC-F20-BK-LG → PC-F20-LG)
    assert_eq!(parent_sku("PC-F20-BK-LG"), "PC-F20-LG");
    assert_eq!(parent_sku("TRK100-BK-L"), "TRK100-L");
    assert_eq!(parent_sku("TRK100-CB-L"), "TRK100-L");
    assert_eq!(parent_sku("AC-ESE-BK"), "AC-ESE");
    assert_eq!(parent_sku("CR-AL-BK"), "CR-AL");
    assert_eq!(parent_sku("PI-CB"), "PI-CB");
    assert_eq!(parent_sku("MI-556-TR"), "MI-556-TR");
    assert_eq!(parent_sku("bag200-bk"), "bag200");
}
