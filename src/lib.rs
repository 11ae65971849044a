pub mod categorical;
pub mod classify;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod group;
pub mod io_utils;
pub mod manifest;
pub mod numeric;
pub mod report;
pub mod summary;
pub mod table;
pub mod top_n;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, error, info, warn};

use crate::{
    cli::{BatchArgs, Cli, Commands, SummarizeArgs},
    io_utils::ReadOptions,
    manifest::Manifest,
    report::OutputFormat,
    summary::{SummaryConfig, build_report},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_summary", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Summarize(args) => handle_summarize(&args),
        Commands::Batch(args) => handle_batch(&args),
    }
}

fn handle_summarize(args: &SummarizeArgs) -> Result<()> {
    let options = ReadOptions {
        delimiter: io_utils::resolve_input_delimiter(&args.input, args.delimiter),
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        row_limit: (args.limit > 0).then_some(args.limit),
    };
    let config = SummaryConfig {
        group_by: (!args.group_by.is_empty()).then(|| args.group_by.clone()),
        top_n: args.top,
    };
    let rendered = summarize_path(&args.input, &options, &config, args.format)?;
    print!("{rendered}");
    Ok(())
}

fn handle_batch(args: &BatchArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let mut failures = 0usize;

    for entry in &manifest.datasets {
        println!("\n========== {} ==========", entry.name);
        let outcome = entry.delimiter().and_then(|delimiter| {
            let options = ReadOptions {
                delimiter: io_utils::resolve_input_delimiter(&entry.path, delimiter),
                encoding: io_utils::resolve_encoding(entry.encoding.as_deref())?,
                row_limit: None,
            };
            summarize_path(&entry.path, &options, &entry.summary_config(), args.format)
        });
        match outcome {
            Ok(rendered) => print!("{rendered}"),
            Err(err) => {
                failures += 1;
                error!("Skipping dataset '{}': {err:#}", entry.name);
                println!("Failed to summarize {:?}: {err:#}", entry.path);
            }
        }
    }

    let total = manifest.datasets.len();
    if failures == total {
        bail!("All {total} dataset(s) in {:?} failed", args.manifest);
    }
    if failures > 0 {
        warn!("{failures} of {total} dataset(s) could not be summarized");
    }
    info!("Summarized {} of {total} dataset(s)", total - failures);
    Ok(())
}

/// Reads one dataset and renders its report.
pub fn summarize_path(
    path: &Path,
    options: &ReadOptions,
    config: &SummaryConfig,
    format: OutputFormat,
) -> Result<String> {
    info!(
        "Summarizing '{}' with delimiter '{}'",
        path.display(),
        printable_delimiter(options.delimiter)
    );
    let dataset = io_utils::read_dataset(path, options)?;
    let report = build_report(&dataset, config)
        .with_context(|| format!("Summarizing {path:?}"))?;
    info!(
        "Summarized {} column(s) across {} row(s)",
        report.overall.len(),
        report.row_count
    );
    if let Some(grouped) = &report.grouped {
        info!(
            "Reported {} of {} group(s) by {:?}",
            grouped.groups.len(),
            grouped.total_groups,
            grouped.group_by
        );
    }
    report::render(&report, format)
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
