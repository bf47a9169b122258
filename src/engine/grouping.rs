// ==========================================
// Rework Tracker - Grouping
// ==========================================
// Ordered group-by over borrowed records; BTreeMap keeps
// iteration order independent of input order
// ==========================================

use std::collections::{BTreeMap, BTreeSet};

/// Key used for records whose operator name is blank
pub const UNASSIGNED_KEY: &str = "(unassigned)";

/// Group items by a derived key
pub fn group_by<'a, T, K, F>(items: &[&'a T], key_fn: F) -> BTreeMap<K, Vec<&'a T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(*item);
    }
    groups
}

/// Number of distinct non-empty values
pub fn distinct_count<'a, I>(values: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Sorted distinct non-empty values joined with ", "
pub fn distinct_joined<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Most frequent non-empty value; ties go to the lexically smallest
pub fn mode<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    for v in values.into_iter().filter(|v| !v.is_empty()) {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Blank names collapse into one visible bucket
pub fn name_key(name: &str) -> String {
    if name.is_empty() {
        UNASSIGNED_KEY.to_string()
    } else {
        name.to_string()
    }
}
