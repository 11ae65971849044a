//! Batch manifests.
//!
//! A manifest is a YAML file naming several datasets to profile in one run:
//!
//! ```yaml
//! datasets:
//!   - name: Facebook Ads
//!     path: fb_ads.csv
//!     group_by: [page_id, ad_id]
//!     top_n: 5
//! ```
//!
//! Relative paths resolve against the directory holding the manifest.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, ensure};
use serde::Deserialize;

use crate::{cli::parse_delimiter, summary::SummaryConfig, top_n::DEFAULT_TOP_N};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub datasets: Vec<DatasetEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetEntry {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub group_by: Option<Vec<String>>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl DatasetEntry {
    pub fn summary_config(&self) -> SummaryConfig {
        SummaryConfig {
            group_by: self.group_by.clone().filter(|cols| !cols.is_empty()),
            top_n: self.top_n,
        }
    }

    pub fn delimiter(&self) -> Result<Option<u8>> {
        self.delimiter
            .as_deref()
            .map(parse_delimiter)
            .transpose()
            .map_err(|err| anyhow!("Dataset '{}': {err}", self.name))
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("Opening manifest {path:?}"))?;
        let mut manifest =
            Self::parse(&raw).with_context(|| format!("Parsing manifest {path:?}"))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for entry in &mut manifest.datasets {
            if entry.path.is_relative() && !crate::io_utils::is_dash(&entry.path) {
                entry.path = base.join(&entry.path);
            }
        }
        Ok(manifest)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(raw)?;
        ensure!(
            !manifest.datasets.is_empty(),
            "Manifest does not list any datasets"
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_applies_defaults() {
        let manifest = Manifest::parse(
            "datasets:\n  - name: Posts\n    path: posts.csv\n  - name: Ads\n    path: ads.tsv\n    group_by: [page_id, ad_id]\n    top_n: 2\n    delimiter: tab\n",
        )
        .expect("manifest");

        assert_eq!(manifest.datasets.len(), 2);
        let posts = &manifest.datasets[0];
        assert_eq!(posts.summary_config(), SummaryConfig::default());
        assert_eq!(posts.delimiter().expect("delimiter"), None);

        let ads = &manifest.datasets[1];
        let config = ads.summary_config();
        assert_eq!(
            config.group_by,
            Some(vec!["page_id".to_string(), "ad_id".to_string()])
        );
        assert_eq!(config.top_n, 2);
        assert_eq!(ads.delimiter().expect("delimiter"), Some(b'\t'));
    }

    #[test]
    fn empty_group_by_disables_grouping() {
        let manifest =
            Manifest::parse("datasets:\n  - name: T\n    path: t.csv\n    group_by: []\n")
                .expect("manifest");
        assert_eq!(manifest.datasets[0].summary_config().group_by, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Manifest::parse("datasets:\n  - name: T\n    path: t.csv\n    groupby: [a]\n").is_err());
    }

    #[test]
    fn empty_manifest_is_rejected() {
        let err = Manifest::parse("datasets: []\n").expect_err("empty");
        assert!(err.to_string().contains("does not list any datasets"));
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = tempfile::tempdir().expect("temp dir");
        let manifest_path = dir.path().join("runs.yml");
        fs::write(&manifest_path, "datasets:\n  - name: T\n    path: data/t.csv\n")
            .expect("write manifest");

        let manifest = Manifest::load(&manifest_path).expect("load");
        assert_eq!(manifest.datasets[0].path, dir.path().join("data/t.csv"));
    }
}
