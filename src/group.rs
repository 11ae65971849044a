//! Row partitioning by group-by columns.
//!
//! [`group_rows()`] walks the dataset once and buckets rows by the tuple of
//! their group-by values. Buckets keep the order in which their key first
//! appeared; [`crate::top_n`] relies on that order to break ties.

use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use serde::Serialize;

use crate::dataset::{Dataset, Row};

/// Values of the group-by columns for one group, in group-by column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<String>);

impl GroupKey {
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})",
            self.0.iter().map(|value| format!("'{value}'")).join(", ")
        )
    }
}

#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub key: GroupKey,
    /// Position of this group in first-seen order.
    pub ordinal: usize,
    pub rows: Vec<&'a Row>,
}

impl Group<'_> {
    pub fn size(&self) -> usize {
        self.rows.len()
    }
}

/// Partitions `dataset` by the values of `group_by`.
///
/// Rows missing any group-by column are left out of every group.
pub fn group_rows<'a>(dataset: &'a Dataset, group_by: &[String]) -> Vec<Group<'a>> {
    let mut buckets: IndexMap<GroupKey, Vec<&'a Row>> = IndexMap::new();
    let mut skipped = 0usize;

    for row in dataset.rows() {
        let Some(key) = group_key(row, group_by) else {
            skipped += 1;
            continue;
        };
        buckets.entry(key).or_default().push(row);
    }

    if skipped > 0 {
        debug!(
            "Skipped {skipped} row(s) missing one of the group-by columns {:?}",
            group_by
        );
    }
    debug!(
        "Partitioned {} row(s) into {} group(s)",
        dataset.row_count() - skipped,
        buckets.len()
    );

    buckets
        .into_iter()
        .enumerate()
        .map(|(ordinal, (key, rows))| Group { key, ordinal, rows })
        .collect()
}

fn group_key(row: &Row, group_by: &[String]) -> Option<GroupKey> {
    group_by
        .iter()
        .map(|column| row.get(column).cloned())
        .collect::<Option<Vec<_>>>()
        .map(GroupKey)
}
