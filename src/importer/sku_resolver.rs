// ==========================================
// Rework Tracker - Parent SKU Resolver
// ==========================================
// Responsibility: product identifier → product-family identifier
// Rule: split on '-', drop tokens that are known color codes,
//       rejoin the rest. Size tokens stay.
// ==========================================

/// Fixed color-code set (compared uppercase)
pub const COLOR_CODES: &[&str] = &[
    "BK", "CB", "MC", "MA", "MB", "MT", "RG", "WD", "WG", "TB", "TD", "TJ", "RD", "ML", "NG", "NP",
    "RT",
];

/// Identifiers whose trailing token looks like a color but is part of the name
pub const SKU_EXCEPTIONS: &[&str] = &["PI-CB", "MI-556-TR", "MI-556-SN"];

const DELIMITER: char = '-';

pub fn is_color_code(token: &str) -> bool {
    let upper = token.to_uppercase();
    COLOR_CODES.contains(&upper.as_str())
}

/// Resolve the parent SKU.
///
/// "TRK100-BK-L" → "TRK100-L", "AC-ESE-BK" → "AC-ESE", "CR-AL-BK" → "CR-AL".
/// `CR` is a family prefix and is never treated as a color.
/// Unknown shapes fall back to the trimmed input.
pub fn parent_sku(product_id: &str) -> String {
    let sku = product_id.trim();
    if sku.is_empty() || SKU_EXCEPTIONS.contains(&sku) {
        return sku.to_string();
    }

    let kept: Vec<&str> = sku
        .split(DELIMITER)
        .filter(|token| !is_color_code(token))
        .collect();

    if kept.is_empty() {
        return sku.to_string();
    }
    kept.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_token() {
        assert_eq!(parent_sku("AC-ESE-BK"), "AC-ESE");
        assert_eq!(parent_sku("PC-F20-BK-LG"), "PC-F20-LG");
        assert_eq!(parent_sku("CR-AL-BK"), "CR-AL");
        assert_eq!(parent_sku("TRK100-bk"), "TRK100");
    }

    #[test]
    fn test_variants_roll_up_to_same_family() {
        assert_eq!(parent_sku("TRK100-BK"), parent_sku("TRK100-CB"));
        assert_eq!(parent_sku("TRK100-BK-L"), "TRK100-L");
        assert_eq!(parent_sku("TRK100-CB-L"), "TRK100-L");
    }

    #[test]
    fn test_every_color_code_is_stripped() {
        for color in COLOR_CODES {
            let sku = format!("BASE-{}-XL", color);
            assert_eq!(parent_sku(&sku), "BASE-XL", "color {color}");
        }
    }

    #[test]
    fn test_cr_is_never_stripped() {
        assert!(!is_color_code("CR"));
        assert_eq!(parent_sku("CR-100"), "CR-100");
        assert_eq!(parent_sku("TRK100-CR-L"), "TRK100-CR-L");
        assert_eq!(parent_sku("CR100-BK"), "CR100");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(parent_sku("PI-CB"), "PI-CB");
        assert_eq!(parent_sku("MI-556-TR"), "MI-556-TR");
        assert_eq!(parent_sku("PLAIN"), "PLAIN");
        assert_eq!(parent_sku("BK"), "BK");
        assert_eq!(parent_sku("BK-CB"), "BK-CB");
        assert_eq!(parent_sku("  TRK100-BK "), "TRK100");
        assert_eq!(parent_sku(""), "");
    }

    #[test]
    fn test_idempotent() {
        for sku in ["AC-ESE-BK", "PC-F20-BK-LG", "CR-AL-BK", "PI-CB", "X"] {
            let once = parent_sku(sku);
            assert_eq!(parent_sku(&once), once);
        }
    }
}
