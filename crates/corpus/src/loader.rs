use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{derived_path, table, CorpusError, CorpusRow, Dataset, Result};

pub const PREPROCESSED_SUFFIX: &str = "_preprocessed";

/// Row counts before and after cleaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_read: usize,
    pub missing: usize,
    pub duplicates: usize,
    pub rows_kept: usize,
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows read:          {}", self.rows_read)?;
        writeln!(f, "Rows with missing:  {}", self.missing)?;
        writeln!(f, "Duplicate rows:     {}", self.duplicates)?;
        write!(f, "Rows after cleaning: {}", self.rows_kept)
    }
}

#[derive(Clone, Debug)]
pub struct Cleaned {
    pub dataset: Dataset,
    pub report: CleaningReport,
    /// Header names of the first two columns as found in the file.
    pub source_headers: [String; 2],
}

/// Reads the first two columns of a CSV file, whatever their headers, into
/// canonically named `Original` / `Leichte Sprache` pairs. Rows with a
/// missing cell are dropped first, then exact duplicates; the order of the
/// remaining rows is kept.
pub fn load(path: &Path) -> Result<Cleaned> {
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(CorpusError::TooFewColumns(headers.len()));
    }
    let source_headers = [headers[0].to_string(), headers[1].to_string()];

    let mut report = CleaningReport::default();
    let mut seen = HashSet::<[u8; 32]>::new();
    let mut pairs = Vec::new();

    for record in reader.records() {
        let record = record?;
        report.rows_read += 1;

        let (Some(original), Some(simplified)) = (present(record.get(0)), present(record.get(1)))
        else {
            report.missing += 1;
            continue;
        };

        let pair = CorpusRow::new(original, simplified);
        if !seen.insert(pair.fingerprint()) {
            report.duplicates += 1;
            continue;
        }
        pairs.push(pair);
    }

    report.rows_kept = pairs.len();

    Ok(Cleaned {
        dataset: Dataset::from_pairs(pairs),
        report,
        source_headers,
    })
}

/// Writes the cleaned table next to `input` as `<stem>_preprocessed.<ext>`.
pub fn save_cleaned(dataset: &Dataset, input: &Path) -> Result<PathBuf> {
    let out = derived_path(input, PREPROCESSED_SUFFIX, None);
    table::write(dataset, &out)?;
    Ok(out)
}

fn present(cell: Option<&str>) -> Option<&str> {
    cell.filter(|c| !c.trim().is_empty())
}
