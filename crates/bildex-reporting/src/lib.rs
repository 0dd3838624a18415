use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use bildex_core::ArticleRecord;

pub mod summary;

pub use summary::RunSummary;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}

/// Sink format for extracted records. Empty string is a valid cell value in
/// both formats, never a null marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Jsonl,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Jsonl => "jsonl",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "jsonl" | "ndjson" => Ok(Self::Jsonl),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Write records to `path` in the given format.
pub fn write_records(
    records: &[ArticleRecord],
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let file = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Csv => write_csv(records, file),
        ExportFormat::Jsonl => write_jsonl(records, file),
    }
}

/// CSV with one row per record; the header row carries the external column
/// names in sink order (`PageNumber, Year, Title_Primary, ...`).
pub fn write_csv<W: Write>(records: &[ArticleRecord], writer: W) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    for record in records {
        out.serialize(record)?;
    }
    out.flush()?;
    Ok(())
}

/// Line-delimited JSON, one object per record.
pub fn write_jsonl<W: Write>(records: &[ArticleRecord], mut writer: W) -> Result<(), ExportError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a previously produced CSV back into records (for re-summarizing).
pub fn read_csv(path: &Path) -> Result<Vec<ArticleRecord>, ExportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
