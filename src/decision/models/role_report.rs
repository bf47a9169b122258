// ==========================================
// Rework Tracker - Decision Object: Role Report
// ==========================================
// Output contract toward the rendering layer:
// named metrics, named tables, named series, ordered insights
// ==========================================

use crate::decision::models::insight::Insight;
use crate::decision::models::metric::Metric;
use crate::domain::Role;
use crate::engine::{CellValue, DateRange, GroupedTable, TimeSeries};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleReport {
    pub role: Role,

    /// Current window (None = all data)
    pub period: Option<DateRange>,

    /// Prior window used for trends
    pub compared_to: Option<DateRange>,

    pub metrics: Vec<Metric>,
    pub tables: Vec<GroupedTable>,
    pub series: Vec<TimeSeries>,
    pub insights: Vec<Insight>,
}

impl RoleReport {
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn metric_value(&self, name: &str) -> Option<&CellValue> {
        self.metric(name).map(|m| &m.value)
    }

    pub fn table(&self, name: &str) -> Option<&GroupedTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn series(&self, name: &str) -> Option<&TimeSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn insight_messages(&self) -> Vec<&str> {
        self.insights.iter().map(|i| i.message.as_str()).collect()
    }
}
