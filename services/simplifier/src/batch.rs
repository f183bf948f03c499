//! Row-by-row generation over a dataset.
//!
//! Each row is sent to the model on its own; a failed call leaves that
//! row without output for the run and the batch moves on.

use std::fmt;

use corpus::{Dataset, RunKey, RunOutput, Source};
use indicatif::{ProgressBar, ProgressStyle};
use readability::Scores;
use tracing::{info, warn};

use crate::config::DecodingParams;
use crate::provider::LLMProvider;
use crate::simplify::simplify_text;

#[derive(Clone, Debug)]
pub struct BatchJob {
    pub model: String,
    pub use_rules: bool,
    pub source: Source,
    pub params: DecodingParams,
    pub progress: bool,
}

impl BatchJob {
    pub fn key(&self) -> RunKey {
        RunKey::new(self.model.clone(), self.use_rules)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RowOutcome {
    Generated,
    Failed { reason: String },
    /// The source cell was empty.
    Skipped,
}

#[derive(Clone, Debug)]
pub struct BatchSummary {
    pub key: RunKey,
    pub outcomes: Vec<RowOutcome>,
    /// Means over rows with output; `None` when no row succeeded.
    pub means: Option<Scores>,
}

impl BatchSummary {
    pub fn generated(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Generated))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Skipped))
    }

    fn count(&self, f: impl Fn(&RowOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| f(o)).count()
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Average Scores:", self.key)?;
        writeln!(
            f,
            "Rows generated: {}, failed: {}, skipped: {}",
            self.generated(),
            self.failed(),
            self.skipped()
        )?;
        match self.means {
            Some(m) => {
                writeln!(f, "Average Flesch Reading Ease Score: {:.2}", m.fre)?;
                write!(f, "Average Wiener Sachtextformel Score: {:.2}", m.wstf)
            }
            None => write!(f, "No rows were generated."),
        }
    }
}

/// Runs `job` over every row of `dataset`, storing output under the
/// job's run key. Output an earlier run left under the same key is
/// discarded first. Never fails as a whole.
pub async fn process(dataset: &mut Dataset, provider: &dyn LLMProvider, job: &BatchJob) -> BatchSummary {
    let key = job.key();
    dataset.register_run(&key);
    dataset.clear_run(&key);
    info!(run = %key, rows = dataset.len(), "processing dataset");

    let pb = if job.progress {
        let pb = ProgressBar::new(dataset.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut outcomes = Vec::with_capacity(dataset.len());
    for index in 0..dataset.len() {
        let text = dataset.rows[index].source(job.source).to_string();
        pb.inc(1);

        if text.trim().is_empty() {
            outcomes.push(RowOutcome::Skipped);
            continue;
        }

        match simplify_text(provider, &text, &job.model, job.use_rules, &job.params).await {
            Ok(generated) => {
                dataset.record_run(index, &key, RunOutput::scored(generated));
                outcomes.push(RowOutcome::Generated);
            }
            Err(e) => {
                warn!(row = index, run = %key, kind = e.tag(), "no output for row");
                outcomes.push(RowOutcome::Failed { reason: e.tag().to_string() });
            }
        }
    }
    pb.finish_and_clear();

    let summary = BatchSummary {
        means: dataset.run_means(&key),
        key,
        outcomes,
    };
    info!(
        generated = summary.generated(),
        failed = summary.failed(),
        skipped = summary.skipped(),
        "processing done"
    );
    summary
}
