use serde::Serialize;

/// Which summary a column receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Reads `raw` as a finite float.
///
/// Surrounding whitespace is ignored. Empty text, `nan` and infinities do not
/// parse.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn is_numeric(raw: &str) -> bool {
    parse_numeric(raw).is_some()
}

/// A column is numeric as soon as one of its values parses.
pub fn classify(values: &[&str]) -> ColumnKind {
    if values.iter().any(|value| is_numeric(value)) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}
