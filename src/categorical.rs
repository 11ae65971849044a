use indexmap::IndexMap;
use serde::Serialize;

/// Frequency profile for a text column.
///
/// `top_value` and `top_freq` are `None` only when the column had no values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique_count: usize,
    pub top_value: Option<String>,
    pub top_freq: Option<usize>,
}

/// Counts distinct values and picks the most frequent one.
///
/// Ties go to the value seen first. The counter keeps insertion order, so a
/// strict comparison during the scan yields the earliest of the tied values.
pub fn summarize_categorical(values: &[&str]) -> CategoricalSummary {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for (&value, &freq) in &counts {
        match top {
            Some((_, best)) if freq <= best => {}
            _ => top = Some((value, freq)),
        }
    }

    CategoricalSummary {
        count: values.len(),
        unique_count: counts.len(),
        top_value: top.map(|(value, _)| value.to_string()),
        top_freq: top.map(|(_, freq)| freq),
    }
}
