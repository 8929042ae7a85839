//! Reader for the `.xvg` text files written by `gmx`.
//!
//! Lines starting with `@` or `#` are metadata. They are otherwise ignored but
//! scanned for the markers that identify the metric category. Every other
//! non-blank line is a data row whose first two whitespace-separated fields are
//! the x and y values.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::category::MetricCategory;

/// Ordered `(x, y)` pairs of one file plus its inferred category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSeries {
    pub points: Vec<[f64; 2]>,
    pub category: Option<MetricCategory>,
}

impl RawSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Result of reading a file that was well formed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Series(RawSeries),
    /// The file had no data rows. Callers skip it without reporting an error.
    Empty { category: Option<MetricCategory> },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected two numeric columns, got {content:?}")]
    Row { line: usize, content: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn is_metadata_line(line: &str) -> bool {
    line.starts_with('@') || line.starts_with('#')
}

/// Parse the contents of one `.xvg` file.
///
/// Any malformed data row fails the whole file; no partial series is returned.
/// When several metadata lines carry a category marker the last one in file
/// order decides the category.
pub fn parse_str(text: &str) -> Result<ParseOutcome, ParseError> {
    let mut points = Vec::new();
    let mut category = None;

    for (idx, line) in text.lines().enumerate() {
        if is_metadata_line(line) {
            if let Some(found) = MetricCategory::from_marker_line(line) {
                category = Some(found);
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        points.push(parse_row(line).ok_or_else(|| ParseError::Row {
            line: idx + 1,
            content: line.to_string(),
        })?);
    }

    if points.is_empty() {
        Ok(ParseOutcome::Empty { category })
    } else {
        Ok(ParseOutcome::Series(RawSeries { points, category }))
    }
}

/// Read and parse one file from disk.
pub fn parse_file(path: &Path) -> Result<ParseOutcome, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text)
}

// Extra columns (per-axis radii, pair counts) are ignored.
fn parse_row(line: &str) -> Option<[f64; 2]> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse::<f64>().ok()?;
    let y = fields.next()?.parse::<f64>().ok()?;
    Some([x, y])
}
