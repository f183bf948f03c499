use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use corpus::{derived_path, table};
use tracing::info;

use simplifier::batch::{self, BatchJob};
use simplifier::charts;
use simplifier::config::AppConfig;
use simplifier::provider_ollama::OllamaProvider;

use crate::cmd_analyse::print_reference_averages;

pub struct ProcessOpts {
    pub model: String,
    pub use_rules: bool,
    pub column: String,
    pub save: bool,
    pub plot: bool,
    pub verbose: bool,
}

pub fn output_path(file: &Path, use_rules: bool) -> PathBuf {
    let suffix = if use_rules { "_llm_processed_w_rules" } else { "_llm_processed" };
    derived_path(file, suffix, None)
}

pub async fn run(cfg: &AppConfig, file: &Path, opts: &ProcessOpts) -> Result<()> {
    info!(path = %file.display(), "loading dataset");
    let mut ds = table::read(file).with_context(|| format!("Failed to load {}", file.display()))?;

    let Some(source) = ds.source_for(&opts.column) else {
        bail!("Column '{}' does not exist in the dataset.", opts.column);
    };

    if opts.verbose {
        println!("Headers: {:?}, rows: {}", ds.headers, ds.len());
        print_reference_averages(&ds);
    }

    let provider = OllamaProvider::new(cfg.api_base());
    let job = BatchJob {
        model: opts.model.clone(),
        use_rules: opts.use_rules,
        source,
        params: cfg.decoding,
        progress: true,
    };
    let summary = batch::process(&mut ds, &provider, &job).await;
    println!("\n{summary}");

    let mut out = None;
    if opts.save {
        let path = output_path(file, opts.use_rules);
        table::write(&ds, &path).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "saved processed dataset");
        out = Some(path);
    }

    if opts.plot {
        charts::plot_all(&ds, out.as_deref());
    }
    Ok(())
}
