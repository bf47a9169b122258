// ==========================================
// Rework Tracker - Grouped Table
// ==========================================
// Output shape for every grouped aggregation:
// named columns, one keyed row per group, deterministic order
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// CellValue
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numbers order numerically; text orders after numbers, lexically
    fn compare(&self, other: &Self) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{:.1}", v),
            CellValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<usize> for CellValue {
    fn from(v: usize) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

// ==========================================
// TableRow
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub key: String,
    pub values: Vec<CellValue>, // aligned with GroupedTable.columns
}

// ==========================================
// GroupedTable
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedTable {
    pub name: String,
    pub key_column: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl GroupedTable {
    pub fn new(name: &str, key_column: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            key_column: key_column.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, key: impl Into<String>, values: Vec<CellValue>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.push(TableRow {
            key: key.into(),
            values,
        });
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Descending by `column`, ties broken by key ascending
    pub fn sorted_by(mut self, column: &str) -> Self {
        if let Some(idx) = self.column_index(column) {
            self.rows.sort_by(|a, b| {
                b.values[idx]
                    .compare(&a.values[idx])
                    .then_with(|| a.key.cmp(&b.key))
            });
        }
        self
    }

    pub fn truncated(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    /// Keep rows matching a predicate (order preserved)
    pub fn retain(mut self, keep: impl Fn(&TableRow) -> bool) -> Self {
        self.rows.retain(|row| keep(row));
        self
    }

    pub fn value(&self, key: &str, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows
            .iter()
            .find(|row| row.key == key)
            .and_then(|row| row.values.get(idx))
    }

    /// Sum of an integer column (cross-check against scalar totals)
    pub fn column_sum(&self, column: &str) -> i64 {
        match self.column_index(column) {
            None => 0,
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|row| row.values.get(idx).and_then(CellValue::as_i64))
                .sum(),
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.key.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroupedTable {
        let mut table = GroupedTable::new("by_sku", "Parent_SKU", &["Repair_Qty", "Avg"]);
        table.push_row("B", vec![5i64.into(), 1.5.into()]);
        table.push_row("A", vec![5i64.into(), 2.0.into()]);
        table.push_row("C", vec![9i64.into(), 0.5.into()]);
        table
    }

    #[test]
    fn test_sort_desc_with_key_tiebreak() {
        let table = sample().sorted_by("Repair_Qty");
        assert_eq!(table.keys(), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_sort_on_float_column() {
        let table = sample().sorted_by("Avg");
        assert_eq!(table.keys(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_column_sum_and_lookup() {
        let table = sample();
        assert_eq!(table.column_sum("Repair_Qty"), 19);
        assert_eq!(table.column_sum("Missing"), 0);
        assert_eq!(table.value("C", "Repair_Qty"), Some(&CellValue::Int(9)));
        assert_eq!(table.value("Z", "Repair_Qty"), None);
    }

    #[test]
    fn test_truncate_and_retain() {
        let table = sample().sorted_by("Repair_Qty").truncated(2);
        assert_eq!(table.rows.len(), 2);

        let only_a = sample().retain(|row| row.key == "A");
        assert_eq!(only_a.keys(), vec!["A"]);
    }
}
