//! Report sink: text tables and JSON.

use anyhow::{Context, Result};
use clap::ValueEnum;
use itertools::Itertools;

use crate::{
    summary::{ColumnSummary, ColumnSummaryTable, Report},
    table::{Align, Table},
};

const ABSENT: &str = "—";

const HEADERS: [&str; 14] = [
    "Column",
    "Kind",
    "Count",
    "Numeric",
    "Mean",
    "Min",
    "25%",
    "Median",
    "75%",
    "Max",
    "Std Dev",
    "Unique",
    "Top Value",
    "Top Freq",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Serializing report to JSON")
}

pub fn render_text(report: &Report) -> String {
    let mut output = format!("Overall Summary ({} row(s))\n", report.row_count);
    output.push_str(&summary_table(&report.overall).render());

    if let Some(grouped) = &report.grouped {
        output.push_str(&format!(
            "\nGrouped Summary by {} (Top {} of {} Groups by Size)\n",
            grouped.group_by.iter().join(", "),
            grouped.top_n,
            grouped.total_groups
        ));
        if grouped.groups.is_empty() {
            output.push_str("No groups selected\n");
        }
        for group in &grouped.groups {
            output.push_str(&format!("\nGroup: {} ({} row(s))\n", group.key, group.size));
            let table = summary_table(&group.columns);
            if table.is_empty() {
                output.push_str("No columns outside the group-by columns\n");
            } else {
                output.push_str(&table.render());
            }
        }
    }
    output
}

fn summary_table(columns: &ColumnSummaryTable) -> Table {
    let mut table = (0..HEADERS.len())
        .filter(|&idx| !matches!(HEADERS[idx], "Column" | "Kind" | "Top Value"))
        .fold(Table::new(HEADERS), |table, idx| table.align(idx, Align::Right));
    for (name, summary) in columns {
        table.push_row(summary_row(name, summary));
    }
    table
}

fn summary_row(name: &str, summary: &ColumnSummary) -> Vec<String> {
    let absent = || ABSENT.to_string();
    match summary {
        ColumnSummary::Numeric(s) => vec![
            name.to_string(),
            "numeric".to_string(),
            s.count.to_string(),
            s.numeric_count.to_string(),
            format_number(s.mean),
            format_number(s.min),
            format_number(s.p25),
            format_number(s.median),
            format_number(s.p75),
            format_number(s.max),
            s.std_dev.map(format_number).unwrap_or_else(absent),
            absent(),
            absent(),
            absent(),
        ],
        ColumnSummary::Categorical(s) => vec![
            name.to_string(),
            "categorical".to_string(),
            s.count.to_string(),
            absent(),
            absent(),
            absent(),
            absent(),
            absent(),
            absent(),
            absent(),
            absent(),
            s.unique_count.to_string(),
            s.top_value.clone().unwrap_or_else(absent),
            s.top_freq.map(|f| f.to_string()).unwrap_or_else(absent),
        ],
    }
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
