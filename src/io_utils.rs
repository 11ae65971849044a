//! Row source: turns a delimited text file into a [`Dataset`].
//!
//! - **Delimiter resolution**: `.tsv` files default to tab, everything else
//!   to comma, unless the caller supplies one.
//! - **Encoding**: fields are decoded with `encoding_rs`, defaulting to UTF-8.
//!   A byte-order mark is recognised only at the start of the header.
//! - **stdin**: the `-` path reads from standard input.
//!
//! The first record is always the header. Records may be shorter than the
//! header; the missing trailing columns are simply absent from that row.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::dataset::Dataset;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// Options for reading one dataset.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
    /// Maximum number of data rows to read; `None` reads everything.
    pub row_limit: Option<usize>,
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'")),
        None => Ok(UTF_8),
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true)
        .from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<Box<dyn Read>>> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Opening input file {path:?}"))?,
        ))
    };
    Ok(open_csv_reader(reader, delimiter))
}

/// Decodes one field. Byte-order marks are only honoured at the start of the
/// stream, so no per-field sniffing happens here.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

/// Decodes the header row. Only its first field may carry a byte-order mark,
/// which then overrides `encoding` for that field.
pub fn decode_headers(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    let mut fields = record.iter();
    let Some(first) = fields.next() else {
        return Ok(Vec::new());
    };
    let (text, _, had_errors) = encoding.decode(first);
    if had_errors {
        return Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ));
    }
    std::iter::once(Ok(text.into_owned()))
        .chain(fields.map(|field| decode_bytes(field, encoding)))
        .collect()
}

/// Reads every record from `reader` into a dataset.
pub fn read_dataset_from_reader<R>(
    mut reader: csv::Reader<R>,
    options: &ReadOptions,
) -> Result<Dataset>
where
    R: Read,
{
    let headers = reader.byte_headers().context("Reading header row")?.clone();
    let headers = decode_headers(&headers, options.encoding).context("Decoding header row")?;

    let mut records = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        if let Some(limit) = options.row_limit
            && row_idx >= limit
        {
            break;
        }
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = decode_record(&record, options.encoding)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        records.push(decoded);
    }
    debug!(
        "Read {} row(s) across {} column(s)",
        records.len(),
        headers.len()
    );

    Dataset::from_records(headers, records)
}

/// Reads the file at `path` (or stdin for `-`) into a dataset.
pub fn read_dataset(path: &Path, options: &ReadOptions) -> Result<Dataset> {
    let reader = open_csv_reader_from_path(path, options.delimiter)?;
    read_dataset_from_reader(reader, options).with_context(|| format!("Reading {path:?}"))
}
