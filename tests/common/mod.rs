#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use csv_summary::dataset::Dataset;
use tempfile::{TempDir, tempdir};

/// Scratch directory that removes its files on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write temp file contents");
        path
    }
}

/// Builds a dataset from string literals.
pub fn dataset(headers: &[&str], records: &[&[&str]]) -> Dataset {
    Dataset::from_records(
        headers.iter().map(|h| h.to_string()).collect(),
        records
            .iter()
            .map(|record| record.iter().map(|v| v.to_string()).collect::<Vec<_>>()),
    )
    .expect("build dataset")
}

/// Posts sample: two accounts with engagement numbers and a free-text column.
pub const POSTS_CSV: &str = "\
account,likes,shares,topic
acme,10,1,economy
beta,4,,health
acme,6,3,economy
gamma,n/a,2,economy
acme,8,2,health
beta,2,0,economy
";
