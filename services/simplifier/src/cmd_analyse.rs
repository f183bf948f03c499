use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use corpus::{derived_path, table, Cleaned, Dataset, Metric, ScoredRow, ORIGINAL, SIMPLIFIED};
use tracing::info;

use simplifier::charts;

pub const ANALYSED_SUFFIX: &str = "_analysed";

const RULE: &str = "--------------------------------------------------------------------------------";

pub fn preprocess(file: &Path, verbose: bool) -> Result<()> {
    let cleaned = load(file, verbose)?;
    let out = corpus::save_cleaned(&cleaned.dataset, file)
        .with_context(|| format!("Failed to write cleaned dataset for {}", file.display()))?;
    println!("Preprocessed data saved to {}", out.display());
    Ok(())
}

pub fn analyse(file: &Path, save: bool, plot: bool, top_hard: bool, verbose: bool) -> Result<()> {
    let mut ds = load(file, verbose)?.dataset;
    ds.score_references();

    print_reference_averages(&ds);
    if top_hard {
        print_hardest(&ds);
    }

    let mut out: Option<PathBuf> = None;
    if save {
        let path = derived_path(file, ANALYSED_SUFFIX, None);
        table::write(&ds, &path).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nSaved analysed dataset to {}", path.display());
        out = Some(path);
    }

    if plot {
        charts::plot_all(&ds, out.as_deref());
    }
    Ok(())
}

fn load(file: &Path, verbose: bool) -> Result<Cleaned> {
    info!(path = %file.display(), "loading dataset");
    let cleaned = corpus::load(file).with_context(|| format!("Failed to load {}", file.display()))?;
    if verbose {
        println!("Columns: {:?} -> {:?}", cleaned.source_headers, cleaned.dataset.headers);
        println!("{}", cleaned.report);
    }
    Ok(cleaned)
}

/// Averages of the reference score columns, when the table has them.
pub fn print_reference_averages(ds: &Dataset) {
    if !ds.has_reference_scores() {
        return;
    }
    let avg = |metric: Metric, pick: fn(&ScoredRow) -> Option<readability::Scores>| {
        readability::mean(ds.rows.iter().filter_map(|r| pick(r).map(|s| metric.pick(&s))))
    };

    println!("\nText Complexity Scores");
    println!("\nFlesch Reading Ease Score (low = hard, high = easy):");
    println!("Average {ORIGINAL} FRE Score: {:.2}", avg(Metric::Fre, |r| r.original_scores));
    println!("Average {SIMPLIFIED} FRE Score: {:.2}", avg(Metric::Fre, |r| r.simplified_scores));
    println!("{RULE}");
    println!("Wiener Sachtextformel: (min: 4 = easy, max: ~15 = hard)");
    println!("Average {ORIGINAL} WSTF Score: {:.2}", avg(Metric::Wstf, |r| r.original_scores));
    println!("Average {SIMPLIFIED} WSTF Score: {:.2}", avg(Metric::Wstf, |r| r.simplified_scores));
}

fn print_hardest(ds: &Dataset) {
    let n = hardest_count(ds.len());

    for (metric, order) in [(Metric::Fre, "lowest"), (Metric::Wstf, "highest")] {
        println!("\n{RULE}");
        println!("Top {n} hardest samples according to {} ({order} first):\n", metric.name());
        for row in ds.hardest(metric, n) {
            let score = |s: Option<readability::Scores>| s.map_or(f64::NAN, |s| metric.pick(&s));
            println!(
                "| {:<60} | {:>7.2} | {:<60} | {:>7.2} |",
                clip(&row.pair.original, 60),
                score(row.original_scores),
                clip(&row.pair.simplified, 60),
                score(row.simplified_scores),
            );
        }
    }
}

/// A tenth of the rows, halves rounded to even, at most ten.
fn hardest_count(rows: usize) -> usize {
    (((rows as f64) * 0.1).round_ties_even() as usize).min(10)
}

fn clip(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let mut s: String = flat.chars().take(max - 1).collect();
    s.push('…');
    s
}
