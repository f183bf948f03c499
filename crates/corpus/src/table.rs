//! CSV persistence of a scored dataset.
//!
//! Layout: the two text columns, then the four reference score columns
//! when any row is scored, then three columns per run
//! (`Leichte Sprache <run>`, `<run> FRE Score`, `<run> WSTF Score`).
//! Unset values are empty cells.

use std::collections::HashMap;
use std::path::Path;

use readability::Scores;

use crate::{
    CorpusError, CorpusRow, Dataset, Metric, Result, RunKey, RunOutput, ScoredRow, ORIGINAL,
    SIMPLIFIED,
};

pub fn write(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    let with_refs = dataset.has_reference_scores();

    let mut header: Vec<String> = dataset.headers.to_vec();
    if with_refs {
        for metric in Metric::ALL {
            header.push(metric.column(ORIGINAL));
            header.push(metric.column(SIMPLIFIED));
        }
    }
    for key in &dataset.runs {
        let label = key.to_string();
        header.push(key.text_column());
        header.push(Metric::Fre.column(&label));
        header.push(Metric::Wstf.column(&label));
    }
    w.write_record(&header)?;

    for row in &dataset.rows {
        let mut rec = vec![row.pair.original.clone(), row.pair.simplified.clone()];
        if with_refs {
            for metric in Metric::ALL {
                rec.push(cell(row.original_scores.map(|s| metric.pick(&s))));
                rec.push(cell(row.simplified_scores.map(|s| metric.pick(&s))));
            }
        }
        for key in &dataset.runs {
            match row.runs.get(key) {
                Some(out) => {
                    rec.push(out.text.clone());
                    rec.push(cell(Some(out.scores.fre)));
                    rec.push(cell(Some(out.scores.wstf)));
                }
                None => rec.extend([String::new(), String::new(), String::new()]),
            }
        }
        w.write_record(&rec)?;
    }

    w.flush()?;
    Ok(())
}

/// Reads a table written by [`write`] (or any CSV with at least two
/// columns). No cleaning happens here: rows are kept exactly as read.
/// Columns that are neither text, reference score nor run columns are
/// dropped.
pub fn read(path: &Path) -> Result<Dataset> {
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
    let index: HashMap<&str, usize> = headers.iter().enumerate().map(|(i, h)| (h, i)).collect();

    let refs = RefColumns {
        original_fre: index.get(Metric::Fre.column(ORIGINAL).as_str()).copied(),
        simplified_fre: index.get(Metric::Fre.column(SIMPLIFIED).as_str()).copied(),
        original_wstf: index.get(Metric::Wstf.column(ORIGINAL).as_str()).copied(),
        simplified_wstf: index.get(Metric::Wstf.column(SIMPLIFIED).as_str()).copied(),
    };

    let prefix = format!("{SIMPLIFIED} ");
    let runs: Vec<(RunKey, usize, Option<usize>, Option<usize>)> = headers
        .iter()
        .enumerate()
        .skip(2)
        .filter_map(|(i, h)| {
            let label = h.strip_prefix(&prefix)?;
            if label.ends_with(" Score") {
                return None;
            }
            Some((
                RunKey::parse(label),
                i,
                index.get(Metric::Fre.column(label).as_str()).copied(),
                index.get(Metric::Wstf.column(label).as_str()).copied(),
            ))
        })
        .collect();

    let mut dataset = Dataset::default().with_headers(&headers[0], &headers[1]);
    for (key, ..) in &runs {
        dataset.register_run(key);
    }

    for record in reader.records() {
        let record = record?;
        let text = |i: usize| record.get(i).unwrap_or("").to_string();
        let num = |i: Option<usize>| {
            i.and_then(|i| record.get(i))
                .and_then(|c| c.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN)
        };

        let mut row = ScoredRow::from(CorpusRow::new(text(0), text(1)));
        if refs.any() {
            row.original_scores = scores(num(refs.original_fre), num(refs.original_wstf));
            row.simplified_scores = scores(num(refs.simplified_fre), num(refs.simplified_wstf));
        }
        for (key, text_col, fre_col, wstf_col) in &runs {
            let generated = text(*text_col);
            if generated.is_empty() {
                continue;
            }
            row.runs.insert(
                key.clone(),
                RunOutput {
                    text: generated,
                    scores: Scores {
                        fre: num(*fre_col),
                        wstf: num(*wstf_col),
                    },
                },
            );
        }
        dataset.rows.push(row);
    }

    Ok(dataset)
}

struct RefColumns {
    original_fre: Option<usize>,
    simplified_fre: Option<usize>,
    original_wstf: Option<usize>,
    simplified_wstf: Option<usize>,
}

impl RefColumns {
    fn any(&self) -> bool {
        self.original_fre.is_some()
            || self.simplified_fre.is_some()
            || self.original_wstf.is_some()
            || self.simplified_wstf.is_some()
    }
}

fn scores(fre: f64, wstf: f64) -> Option<Scores> {
    (!fre.is_nan() || !wstf.is_nan()).then_some(Scores { fre, wstf })
}

fn cell(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => x.to_string(),
        _ => String::new(),
    }
}
