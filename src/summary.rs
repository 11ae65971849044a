//! Report assembly.
//!
//! [`build_report()`] classifies and summarizes every column of a dataset and,
//! when group-by columns are configured, does the same for the largest groups.
//! The resulting [`Report`] is plain data for a report sink to render.

use indexmap::IndexMap;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    categorical::{CategoricalSummary, summarize_categorical},
    classify::{ColumnKind, classify},
    dataset::{Dataset, Row, column_values},
    error::{SummaryError, SummaryResult},
    group::{Group, GroupKey, group_rows},
    numeric::{NumericSummary, summarize_numeric},
    top_n::{DEFAULT_TOP_N, select_top_n},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl ColumnSummary {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnSummary::Numeric(_) => ColumnKind::Numeric,
            ColumnSummary::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            ColumnSummary::Numeric(summary) => summary.count,
            ColumnSummary::Categorical(summary) => summary.count,
        }
    }
}

/// Column summaries keyed by column name, in dataset column order.
pub type ColumnSummaryTable = IndexMap<String, ColumnSummary>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Columns whose values jointly define a group; `None` disables grouping.
    pub group_by: Option<Vec<String>>,
    pub top_n: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            group_by: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub row_count: usize,
    pub overall: ColumnSummaryTable,
    pub grouped: Option<GroupedReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedReport {
    pub group_by: Vec<String>,
    pub top_n: usize,
    /// Number of groups found before the top-N cut.
    pub total_groups: usize,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub size: usize,
    pub columns: ColumnSummaryTable,
}

/// Summarizes one column's raw values.
pub fn summarize_column(column: &str, values: &[&str]) -> SummaryResult<ColumnSummary> {
    match classify(values) {
        ColumnKind::Numeric => summarize_numeric(column, values).map(ColumnSummary::Numeric),
        ColumnKind::Categorical => Ok(ColumnSummary::Categorical(summarize_categorical(values))),
    }
}

/// Builds a summary table over `rows` for every column in `columns` that is
/// not listed in `excluded`.
pub fn summarize_rows(
    rows: &[&Row],
    columns: &[String],
    excluded: &[String],
) -> SummaryResult<ColumnSummaryTable> {
    columns
        .iter()
        .filter(|column| !excluded.contains(column))
        .map(|column| {
            let values = column_values(rows.iter().copied(), column);
            summarize_column(column, &values).map(|summary| (column.clone(), summary))
        })
        .collect()
}

pub fn build_report(dataset: &Dataset, config: &SummaryConfig) -> SummaryResult<Report> {
    if dataset.is_empty() {
        return Err(SummaryError::EmptyDataset);
    }

    let all_rows = dataset.rows().iter().collect::<Vec<_>>();
    let overall = summarize_rows(&all_rows, dataset.columns(), &[])?;
    debug!("Summarized {} column(s) overall", overall.len());

    let grouped = match &config.group_by {
        Some(group_by) => Some(build_grouped(dataset, group_by, config.top_n)?),
        None => None,
    };

    Ok(Report {
        row_count: dataset.row_count(),
        overall,
        grouped,
    })
}

fn build_grouped(
    dataset: &Dataset,
    group_by: &[String],
    top_n: usize,
) -> SummaryResult<GroupedReport> {
    let groups = group_rows(dataset, group_by);
    let total_groups = groups.len();
    let selected = select_top_n(groups, top_n);
    debug!(
        "Selected {} of {} group(s) by size",
        selected.len(),
        total_groups
    );

    let groups = selected
        .par_iter()
        .map(|group| summarize_group(group, dataset.columns(), group_by))
        .collect::<SummaryResult<Vec<_>>>()?;

    Ok(GroupedReport {
        group_by: group_by.to_vec(),
        top_n,
        total_groups,
        groups,
    })
}

fn summarize_group(
    group: &Group<'_>,
    columns: &[String],
    group_by: &[String],
) -> SummaryResult<GroupSummary> {
    Ok(GroupSummary {
        key: group.key.clone(),
        size: group.size(),
        columns: summarize_rows(&group.rows, columns, group_by)?,
    })
}
