// ==========================================
// Rework Tracker - Data Cleaner (Name Normalizer)
// ==========================================
// Responsibility: TRIM / name canonicalization / boolean coercion /
//                 lenient number and date parsing
// Never fails: bad input yields a neutral value plus a DQ issue
// ==========================================

use crate::domain::DqIssue;
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Values accepted as `true` (compared lowercase)
pub const TRUTHY_VALUES: &[&str] = &["true", "1", "yes", "y", "x"];

/// Values accepted as `false` without being reported as corrupted
pub const FALSY_VALUES: &[&str] = &["false", "0", "no", "n"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M:%S %p", "%H:%M:%S%.f"];

// Excel serial dates count days from 1899-12-30
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0;

// ==========================================
// Cleaned<T> - value plus the fallback that produced it
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cleaned<T> {
    pub value: T,
    pub issue: Option<DqIssue>,
}

impl<T> Cleaned<T> {
    pub fn clean(value: T) -> Self {
        Self { value, issue: None }
    }

    pub fn fallback(value: T, issue: DqIssue) -> Self {
        Self {
            value,
            issue: Some(issue),
        }
    }
}

// ==========================================
// Name rules
// ==========================================

/// Operator code: first initial + capitalized last name, one token.
///
/// Index 0 and index 1 are uppercased, the rest lowercased:
/// "JSMITH" → "JSmith", "jfernandez" → "JFernandez", "MANGELA" → "MAngela".
/// Blank → "". Idempotent.
pub fn normalize_operator_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let mut out = String::with_capacity(trimmed.len());

    if let Some(initial) = chars.next() {
        out.extend(initial.to_uppercase());
    }
    if let Some(last_initial) = chars.next() {
        out.extend(last_initial.to_uppercase());
    }
    for c in chars {
        out.extend(c.to_lowercase());
    }
    out
}

/// Display name: first letter uppercase, remainder lowercase ("WILL" → "Will")
pub fn normalize_display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let mut out = String::with_capacity(trimmed.len());

    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }
    for c in chars {
        out.extend(c.to_lowercase());
    }
    out
}

/// Truthy-set check; anything unrecognized is false
pub fn is_truthy(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    TRUTHY_VALUES.contains(&lowered.as_str())
}

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_operator_name(&self, raw: Option<&str>) -> String {
        raw.map(normalize_operator_name).unwrap_or_default()
    }

    fn normalize_display_name(&self, raw: Option<&str>) -> String {
        raw.map(normalize_display_name).unwrap_or_default()
    }

    fn coerce_bool(&self, raw: Option<&str>) -> Cleaned<bool> {
        let value = match self.normalize_null(raw) {
            None => return Cleaned::clean(false),
            Some(v) => v.to_lowercase(),
        };

        if TRUTHY_VALUES.contains(&value.as_str()) {
            Cleaned::clean(true)
        } else if FALSY_VALUES.contains(&value.as_str()) {
            Cleaned::clean(false)
        } else {
            // '*', '\', '`' and similar keystroke noise
            Cleaned::fallback(false, DqIssue::CorruptedBoolean)
        }
    }

    fn parse_quantity(&self, raw: Option<&str>) -> Cleaned<i64> {
        let value = match self.normalize_null(raw) {
            None => return Cleaned::clean(0),
            Some(v) => v,
        };

        match parse_number(value) {
            Some(n) if n < 0.0 => Cleaned::fallback(0, DqIssue::NegativeNumber),
            Some(n) => Cleaned::clean(n.round() as i64),
            None => Cleaned::fallback(0, DqIssue::InvalidNumber),
        }
    }

    fn parse_fraction(&self, raw: Option<&str>) -> Cleaned<Option<f64>> {
        let value = match self.normalize_null(raw) {
            None => return Cleaned::clean(None),
            Some(v) => v,
        };

        let parsed = match value.strip_suffix('%') {
            Some(pct) => parse_number(pct.trim()).map(|n| n / 100.0),
            None => parse_number(value),
        };

        match parsed {
            Some(n) => Cleaned::clean(Some(n)),
            None => Cleaned::fallback(None, DqIssue::InvalidNumber),
        }
    }

    fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
                return Some(date);
            }
        }

        if let Some(dt) = parse_datetime(value) {
            return Some(dt.date());
        }

        parse_excel_serial(value).map(|dt| dt.date())
    }

    fn parse_time(&self, raw: &str) -> Option<NaiveTime> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        for fmt in TIME_FORMATS {
            if let Ok(time) = NaiveTime::parse_from_str(value, fmt) {
                return Some(time);
            }
        }

        if let Some(dt) = parse_datetime(value) {
            return Some(dt.time());
        }

        // Excel stores a bare time as a day fraction
        parse_excel_serial(value).map(|dt| dt.time())
    }
}

impl DataCleaner {
    /// Blank / whitespace-only → None
    pub fn normalize_null<'a>(&self, value: Option<&'a str>) -> Option<&'a str> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }
}

fn parse_number(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn parse_excel_serial(value: &str) -> Option<NaiveDateTime> {
    let serial = value.parse::<f64>().ok()?;
    if !(0.0..=EXCEL_SERIAL_MAX).contains(&serial) {
        return None;
    }

    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let dt = base + Duration::milliseconds(millis);
    // drop sub-second noise from float serials
    dt.with_nanosecond(0)
}
