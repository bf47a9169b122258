// ==========================================
// Rework Tracker - Decision Object: Insight
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    Info,
    Good,
    Warning,
    Bad,
}

/// One templated natural-language observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Rule that produced it (stable id)
    pub rule: String,
    pub level: InsightLevel,
    pub message: String,
}

impl Insight {
    pub fn new(rule: &str, level: InsightLevel, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            level,
            message: message.into(),
        }
    }
}
