use std::collections::HashMap;
use std::fmt;

use readability::Scores;
use serde::{Deserialize, Serialize};

pub const ORIGINAL: &str = "Original";
pub const SIMPLIFIED: &str = "Leichte Sprache";

const RULES_SUFFIX: &str = "_w_rules";

/// One parallel-text pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorpusRow {
    pub original: String,
    pub simplified: String,
}

impl CorpusRow {
    pub fn new(original: impl Into<String>, simplified: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            simplified: simplified.into(),
        }
    }

    /// Length-prefixed so that `("a\nb", "c")` and `("a", "b\nc")` differ.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        for field in [&self.original, &self.simplified] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
        hasher.finalize().into()
    }
}

/// Which of the two text columns a batch reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Original,
    Simplified,
}

/// Identifies one model run on a dataset: the model id and whether the
/// style rules were part of the prompt.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunKey {
    pub model: String,
    pub use_rules: bool,
}

impl RunKey {
    pub fn new(model: impl Into<String>, use_rules: bool) -> Self {
        Self {
            model: model.into(),
            use_rules,
        }
    }

    /// Inverse of `Display`: a trailing `_w_rules` marks a rules run.
    pub fn parse(label: &str) -> Self {
        match label.strip_suffix(RULES_SUFFIX) {
            Some(model) => Self::new(model, true),
            None => Self::new(label, false),
        }
    }

    pub fn text_column(&self) -> String {
        format!("{SIMPLIFIED} {self}")
    }
}

impl fmt::Display for RunKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model)?;
        if self.use_rules {
            f.write_str(RULES_SUFFIX)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Fre,
    Wstf,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Fre, Metric::Wstf];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Fre => "FRE",
            Metric::Wstf => "WSTF",
        }
    }

    pub fn column(self, prefix: &str) -> String {
        format!("{prefix} {} Score", self.name())
    }

    pub fn pick(self, scores: &Scores) -> f64 {
        match self {
            Metric::Fre => scores.fre,
            Metric::Wstf => scores.wstf,
        }
    }
}

/// Generated text of one run for one row, with its scores.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutput {
    pub text: String,
    pub scores: Scores,
}

impl RunOutput {
    pub fn scored(text: String) -> Self {
        let scores = Scores::of(&text);
        Self { text, scores }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRow {
    pub pair: CorpusRow,
    pub original_scores: Option<Scores>,
    pub simplified_scores: Option<Scores>,
    pub runs: HashMap<RunKey, RunOutput>,
}

impl ScoredRow {
    pub fn source(&self, source: Source) -> &str {
        match source {
            Source::Original => &self.pair.original,
            Source::Simplified => &self.pair.simplified,
        }
    }
}

impl From<CorpusRow> for ScoredRow {
    fn from(pair: CorpusRow) -> Self {
        Self {
            pair,
            original_scores: None,
            simplified_scores: None,
            runs: HashMap::new(),
        }
    }
}

/// Ordered rows plus the column schema they share. `runs` lists every
/// run key in the order its columns were added; a row may lack output
/// for any of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub headers: [String; 2],
    pub rows: Vec<ScoredRow>,
    pub runs: Vec<RunKey>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            headers: [ORIGINAL.to_string(), SIMPLIFIED.to_string()],
            rows: Vec::new(),
            runs: Vec::new(),
        }
    }
}

impl Dataset {
    pub fn from_pairs(pairs: impl IntoIterator<Item = CorpusRow>) -> Self {
        Self {
            rows: pairs.into_iter().map(ScoredRow::from).collect(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &CorpusRow> {
        self.rows.iter().map(|r| &r.pair)
    }

    pub fn with_headers(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.headers = [first.into(), second.into()];
        self
    }

    /// Resolves a header name to the text column it names.
    pub fn source_for(&self, column: &str) -> Option<Source> {
        if column == self.headers[0] {
            Some(Source::Original)
        } else if column == self.headers[1] {
            Some(Source::Simplified)
        } else {
            None
        }
    }

    pub fn has_reference_scores(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.original_scores.is_some() || r.simplified_scores.is_some())
    }

    /// Scores both text columns of every row.
    pub fn score_references(&mut self) {
        for row in &mut self.rows {
            row.original_scores = Some(Scores::of(&row.pair.original));
            row.simplified_scores = Some(Scores::of(&row.pair.simplified));
        }
    }

    pub fn register_run(&mut self, key: &RunKey) {
        if !self.runs.contains(key) {
            self.runs.push(key.clone());
        }
    }

    /// Drops every row's output for `key`, keeping the run's columns.
    pub fn clear_run(&mut self, key: &RunKey) {
        for row in &mut self.rows {
            row.runs.remove(key);
        }
    }

    /// Stores `output` for row `index`, replacing an earlier output of the
    /// same run. Out-of-range indices are ignored.
    pub fn record_run(&mut self, index: usize, key: &RunKey, output: RunOutput) {
        self.register_run(key);
        if let Some(row) = self.rows.get_mut(index) {
            row.runs.insert(key.clone(), output);
        }
    }

    /// Mean scores of one run over the rows that have output for it.
    pub fn run_means(&self, key: &RunKey) -> Option<Scores> {
        let outputs: Vec<&RunOutput> = self.rows.iter().filter_map(|r| r.runs.get(key)).collect();
        if outputs.is_empty() {
            return None;
        }
        Some(Scores {
            fre: readability::mean(outputs.iter().map(|o| o.scores.fre)),
            wstf: readability::mean(outputs.iter().map(|o| o.scores.wstf)),
        })
    }

    /// Labelled per-row values of every column scoring `metric`, in table
    /// column order. Missing values are `NaN`.
    pub fn score_series(&self, metric: Metric) -> Vec<(String, Vec<f64>)> {
        let mut out = Vec::new();

        if self.has_reference_scores() {
            out.push((
                metric.column(ORIGINAL),
                self.rows
                    .iter()
                    .map(|r| r.original_scores.map_or(f64::NAN, |s| metric.pick(&s)))
                    .collect(),
            ));
            out.push((
                metric.column(SIMPLIFIED),
                self.rows
                    .iter()
                    .map(|r| r.simplified_scores.map_or(f64::NAN, |s| metric.pick(&s)))
                    .collect(),
            ));
        }

        for key in &self.runs {
            out.push((
                metric.column(&key.to_string()),
                self.rows
                    .iter()
                    .map(|r| r.runs.get(key).map_or(f64::NAN, |o| metric.pick(&o.scores)))
                    .collect(),
            ));
        }

        out
    }

    /// The `n` rows whose original text is hardest by `metric`: lowest FRE
    /// or highest WSTF. Unscored rows are never selected.
    pub fn hardest(&self, metric: Metric, n: usize) -> Vec<&ScoredRow> {
        let mut scored: Vec<(&ScoredRow, f64)> = self
            .rows
            .iter()
            .filter_map(|r| {
                let v = metric.pick(r.original_scores.as_ref()?);
                v.is_finite().then_some((r, v))
            })
            .collect();

        scored.sort_by(|a, b| match metric {
            Metric::Fre => a.1.total_cmp(&b.1),
            Metric::Wstf => b.1.total_cmp(&a.1),
        });
        scored.into_iter().take(n).map(|(r, _)| r).collect()
    }
}
