// ==========================================
// Rework Tracker - Decision Object: Metric
// ==========================================
// A named scalar with an optional prior-period trend
// ==========================================

use crate::engine::{percent_change, CellValue, Trend};
use serde::{Deserialize, Serialize};

pub type MetricValue = CellValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,

    /// None when no comparison window was requested or the value is text
    pub trend: Option<Trend>,
}

/// Typed metric sets expose themselves as an ordered list of named values
pub trait MetricSet {
    fn named_values(&self) -> Vec<(&'static str, MetricValue)>;
}

/// Pair current values with prior values by name and attach trends.
///
/// With a prior set, every numeric metric gets a trend
/// (NotApplicable when the prior value is zero).
pub fn with_trends(
    current: Vec<(&'static str, MetricValue)>,
    prior: Option<Vec<(&'static str, MetricValue)>>,
) -> Vec<Metric> {
    current
        .into_iter()
        .map(|(name, value)| {
            let trend = match (&prior, value.as_f64()) {
                (Some(prior), Some(now)) => {
                    let before = prior
                        .iter()
                        .find(|(n, _)| *n == name)
                        .and_then(|(_, v)| v.as_f64());
                    Some(percent_change(now, before))
                }
                _ => None,
            };

            Metric {
                name: name.to_string(),
                value,
                trend,
            }
        })
        .collect()
}
