use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

mod entities;

pub use entities::{
    RecordAttribute, STDF_RESULT_RECORDS, StdfRecord, StdfRecordType, TEST_NUM, create_ptr_record,
};

/// Record loading errors
#[derive(Debug, Error)]
pub enum RecordParseError {
    #[error("Failed to read record file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid record on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a JSON-lines record file into a vector of StdfRecord structs
///
/// Blank lines are skipped; any other line must hold exactly one record.
pub fn parse_record_file(path: impl AsRef<Path>) -> Result<Vec<StdfRecord>, RecordParseError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_record_line(&line, idx + 1)?);
    }

    debug!(
        path = %path.as_ref().display(),
        count = records.len(),
        "loaded records"
    );
    Ok(records)
}

/// Parses a single JSON record; `line` is the 1-indexed source line for errors
pub fn parse_record_line(text: &str, line: usize) -> Result<StdfRecord, RecordParseError> {
    serde_json::from_str(text).map_err(|source| RecordParseError::Json { line, source })
}
