//! Point table loading
//!
//! Reads a header-less delimited table with columns `x, y, elevation, name`.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use super::errors::{TwdError, TwdResult};
use super::record::PointRecord;

/// Number of columns every row must carry
const FIELD_COUNT: usize = 4;

/// Lines starting with this byte are skipped
const COMMENT: u8 = b'#';

/// Loader for survey point tables
#[derive(Debug, Clone)]
pub struct RecordLoader {
    delimiter: u8,
}

impl Default for RecordLoader {
    fn default() -> Self {
        RecordLoader {
            delimiter: b',',
        }
    }
}

impl RecordLoader {
    /// Create a loader for comma separated input with `#` comments
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load all records from a file
    ///
    /// # Arguments
    /// * `path` - Path to the point table
    ///
    /// # Returns
    /// The records in file order, or `SourceNotFound` / `MalformedRecord`
    pub fn load(&self, path: &Path) -> TwdResult<Vec<PointRecord>> {
        if !path.is_file() {
            return Err(TwdError::SourceNotFound(path.to_path_buf()));
        }

        let size = fs::metadata(path)?.len();
        info!("{}, size {}", path.display(), size);

        let file = fs::File::open(path)?;
        self.read_from(file)
    }

    /// Read all records from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> TwdResult<Vec<PointRecord>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::None)
            .delimiter(self.delimiter)
            .comment(Some(COMMENT))
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                TwdError::MalformedRecord { line, reason: e.to_string() }
            })?;
            records.push(Self::parse_row(&row)?);
        }

        debug!("Loaded {} records", records.len());
        Ok(records)
    }

    fn parse_row(row: &StringRecord) -> TwdResult<PointRecord> {
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() != FIELD_COUNT {
            return Err(TwdError::MalformedRecord {
                line,
                reason: format!("expected {} fields (x, y, elevation, name), found {}", FIELD_COUNT, row.len()),
            });
        }

        for (index, field) in ["x", "y"].iter().enumerate() {
            if row[index].trim().is_empty() {
                return Err(TwdError::MalformedRecord { line, reason: format!("missing {} coordinate", field) });
            }
        }

        let elevation = if row[2].trim().is_empty() { None } else { Some(&row[2]) };
        Ok(PointRecord::new(&row[0], &row[1], elevation, &row[3]))
    }
}
