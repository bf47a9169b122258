// ==========================================
// Rework Tracker - Date Range Filter
// ==========================================
// Responsibility: inclusive date window + filtered record view
// Repairs filter on `date`, recuts on `entry_date`
// ==========================================

use crate::domain::{RecutRecord, RepairRecord, ReworkDataset};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid date range: start {start} is after end {end}")]
pub struct InvalidDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ==========================================
// DateRange (inclusive both ends)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRange> {
        if start > end {
            return Err(InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered (a single-day range has 1)
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Equal-length window ending the day before `start`
    pub fn preceding(&self) -> Self {
        let end = self.start - Duration::days(1);
        let start = end - Duration::days(self.days() - 1);
        Self { start, end }
    }
}

// ==========================================
// ReworkView - borrowed, filtered slice of a dataset
// ==========================================
#[derive(Debug, Clone)]
pub struct ReworkView<'a> {
    pub repairs: Vec<&'a RepairRecord>,
    pub recuts: Vec<&'a RecutRecord>,
    pub range: Option<DateRange>,
}

impl<'a> ReworkView<'a> {
    /// Records inside `range`; `None` keeps everything
    pub fn filter(dataset: &'a ReworkDataset, range: Option<DateRange>) -> Self {
        let keep = |date: NaiveDate| range.map_or(true, |r| r.contains(date));

        Self {
            repairs: dataset.repairs.iter().filter(|r| keep(r.date)).collect(),
            recuts: dataset.recuts.iter().filter(|r| keep(r.entry_date)).collect(),
            range,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.repairs.is_empty() && self.recuts.is_empty()
    }

    /// Requested range, or the span of the records when unbounded
    pub fn effective_range(&self) -> Option<DateRange> {
        if self.range.is_some() {
            return self.range;
        }

        let dates = self
            .repairs
            .iter()
            .map(|r| r.date)
            .chain(self.recuts.iter().map(|r| r.entry_date));
        let min = dates.clone().min()?;
        let max = dates.max()?;
        Some(DateRange { start: min, end: max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        assert!(DateRange::new(d(2025, 2, 1), d(2025, 1, 1)).is_err());
        assert!(DateRange::new(d(2025, 1, 1), d(2025, 1, 1)).is_ok());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(d(2025, 1, 6), d(2025, 1, 12)).unwrap();
        assert!(range.contains(d(2025, 1, 6)));
        assert!(range.contains(d(2025, 1, 12)));
        assert!(!range.contains(d(2025, 1, 13)));
        assert_eq!(range.days(), 7);
    }

    #[test]
    fn test_preceding_window() {
        let range = DateRange::new(d(2025, 1, 6), d(2025, 1, 12)).unwrap();
        let prior = range.preceding();
        assert_eq!(prior.start, d(2024, 12, 30));
        assert_eq!(prior.end, d(2025, 1, 5));
        assert_eq!(prior.days(), range.days());
    }
}
