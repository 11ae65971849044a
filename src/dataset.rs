//! In-memory dataset model.
//!
//! A [`Dataset`] is the full set of rows handed over by the row source. Every
//! [`Row`] maps column names to raw text in header order; nothing is typed
//! until a column is summarized.

use anyhow::{Result, bail};
use indexmap::IndexMap;

/// Ordered mapping from column name to raw text.
pub type Row = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset from header names and raw records.
    ///
    /// Records shorter than the header produce rows without the trailing
    /// columns; fields past the header are dropped.
    pub fn from_records<I>(headers: Vec<String>, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        for (idx, name) in headers.iter().enumerate() {
            if headers[..idx].contains(name) {
                bail!("Duplicate column name '{name}' in header");
            }
        }
        let rows = records
            .into_iter()
            .map(|record| {
                headers
                    .iter()
                    .cloned()
                    .zip(record)
                    .collect::<Row>()
            })
            .collect();
        Ok(Self {
            columns: headers,
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Collects the raw values of `column` across `rows`, in row order.
///
/// Rows that lack the column contribute nothing.
pub fn column_values<'a, I>(rows: I, column: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter()
        .filter_map(|row| row.get(column).map(String::as_str))
        .collect()
}
