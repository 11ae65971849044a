use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{report::OutputFormat, top_n::DEFAULT_TOP_N};

#[derive(Debug, Parser)]
#[command(author, version, about = "Summarize CSV columns overall and per group", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Profile every column of a CSV file, optionally for its largest groups
    Summarize(SummarizeArgs),
    /// Profile each dataset listed in a YAML manifest
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Input CSV file to profile (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Columns whose values define groups, e.g. `page_id,ad_id`
    #[arg(short = 'g', long = "group-by", value_delimiter = ',')]
    pub group_by: Vec<String>,
    /// Number of largest groups to report
    #[arg(short = 'n', long = "top", default_value_t = DEFAULT_TOP_N)]
    pub top: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum rows to read (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// YAML manifest listing the datasets to profile
    #[arg(short = 'm', long = "manifest")]
    pub manifest: PathBuf,
    /// Output format for each report
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
