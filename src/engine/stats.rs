// ==========================================
// Rework Tracker - Metric Arithmetic
// ==========================================
// Empty denominators yield 0, never a division fault
// ==========================================

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100`, clamped to [0, 100]; 0 when `whole` is 0
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    (part / whole * 100.0).clamp(0.0, 100.0)
}

/// `num / den`; 0 when `den` is 0
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        return 0.0;
    }
    num / den
}

pub fn minutes_to_hours(minutes: i64) -> f64 {
    round1(minutes as f64 / 60.0)
}

/// Eight-hour working days
pub fn hours_to_fte_days(hours: f64) -> f64 {
    round1(hours / 8.0)
}
