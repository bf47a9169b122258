// ==========================================
// Rework Tracker - Time Series
// ==========================================
// Per-period sums over a date range, contiguous and zero-filled
// Weeks start on Monday; months on the 1st
// ==========================================

use crate::domain::Granularity;
use crate::engine::filter::DateRange;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period_start: NaiveDate,
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub name: String,
    pub granularity: Granularity,
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn total(&self) -> i64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

/// First day of the period containing `date`
pub fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Week => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        Granularity::Month => date.with_day(1).unwrap_or(date),
    }
}

fn next_period(start: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Week => start + Duration::days(7),
        Granularity::Month => {
            let (year, month) = if start.month() == 12 {
                (start.year() + 1, 1)
            } else {
                (start.year(), start.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start + Duration::days(31))
        }
    }
}

fn label(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Week => start.format("%Y-%m-%d").to_string(),
        Granularity::Month => start.format("%Y-%m").to_string(),
    }
}

/// Bucket `(date, value)` events into every period overlapping `range`.
///
/// Events outside the range are ignored. With no range the series is empty.
pub fn build_series<I>(
    name: &str,
    granularity: Granularity,
    range: Option<DateRange>,
    events: I,
) -> TimeSeries
where
    I: IntoIterator<Item = (NaiveDate, i64)>,
{
    let mut series = TimeSeries {
        name: name.to_string(),
        granularity,
        points: Vec::new(),
    };

    let range = match range {
        Some(r) => r,
        None => return series,
    };

    let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut cursor = period_start(range.start, granularity);
    while cursor <= range.end {
        buckets.insert(cursor, 0);
        cursor = next_period(cursor, granularity);
    }

    for (date, value) in events {
        if range.contains(date) {
            *buckets.entry(period_start(date, granularity)).or_insert(0) += value;
        }
    }

    series.points = buckets
        .into_iter()
        .map(|(start, value)| SeriesPoint {
            period_start: start,
            label: label(start, granularity),
            value,
        })
        .collect();
    series
}
