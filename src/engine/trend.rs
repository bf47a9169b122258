// ==========================================
// Rework Tracker - Trend Comparison
// ==========================================
// delta = (current - prior) / prior * 100
// prior absent or zero → NotApplicable
// ==========================================

use crate::engine::stats::round1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pct", rename_all = "snake_case")]
pub enum Trend {
    Change(f64),
    NotApplicable,
}

impl Trend {
    pub fn pct(&self) -> Option<f64> {
        match self {
            Trend::Change(pct) => Some(*pct),
            Trend::NotApplicable => None,
        }
    }

    /// Rose by more than `threshold` percent
    pub fn is_rise_above(&self, threshold: f64) -> bool {
        self.pct().is_some_and(|pct| pct > threshold)
    }
}

pub fn percent_change(current: f64, prior: Option<f64>) -> Trend {
    match prior {
        Some(prior) if prior != 0.0 && prior.is_finite() && current.is_finite() => {
            Trend::Change(round1((current - prior) / prior * 100.0))
        }
        _ => Trend::NotApplicable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(120.0, Some(100.0)), Trend::Change(20.0));
        assert_eq!(percent_change(50.0, Some(100.0)), Trend::Change(-50.0));
        assert_eq!(percent_change(0.0, Some(10.0)), Trend::Change(-100.0));
    }

    #[test]
    fn test_zero_or_missing_prior_is_not_applicable() {
        assert_eq!(percent_change(10.0, Some(0.0)), Trend::NotApplicable);
        assert_eq!(percent_change(10.0, None), Trend::NotApplicable);
        assert_eq!(percent_change(0.0, Some(0.0)), Trend::NotApplicable);
    }

    #[test]
    fn test_rise_above() {
        assert!(Trend::Change(25.0).is_rise_above(20.0));
        assert!(!Trend::Change(20.0).is_rise_above(20.0));
        assert!(!Trend::NotApplicable.is_rise_above(0.0));
    }
}
