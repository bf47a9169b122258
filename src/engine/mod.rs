// ==========================================
// Rework Tracker - Engine Layer
// ==========================================
// Responsibility: aggregation primitives shared by every role view
// Stateless: every function is a pure function of its inputs
// ==========================================

pub mod filter;
pub mod grouping;
pub mod stats;
pub mod table;
pub mod time_series;
pub mod trend;

pub use filter::{DateRange, InvalidDateRange, ReworkView};
pub use grouping::{distinct_count, distinct_joined, group_by, mode, name_key, UNASSIGNED_KEY};
pub use stats::{hours_to_fte_days, minutes_to_hours, percent, ratio, round1};
pub use table::{CellValue, GroupedTable, TableRow};
pub use time_series::{build_series, period_start, SeriesPoint, TimeSeries};
pub use trend::{percent_change, Trend};
