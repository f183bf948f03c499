use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use corpus::export::{self, ExportFormat};
use corpus::table;
use tracing::info;

pub struct SplitOpts {
    pub train_fraction: f64,
    pub random_seed: u64,
    pub input_header: String,
    pub target_header: String,
    pub format: ExportFormat,
    pub out_dir: Option<PathBuf>,
    pub verbose: bool,
}

pub fn split(file: &Path, opts: &SplitOpts) -> Result<()> {
    info!(path = %file.display(), "loading dataset");
    let split = corpus::load_and_split(file, opts.train_fraction, opts.random_seed)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    println!("Number of samples: {}", split.train.len() + split.test.len());
    println!("Train set size: {}", split.train.len());
    println!("Test set size: {}", split.test.len());

    let dir = match &opts.out_dir {
        Some(d) => d.clone(),
        None => file.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    for (name, part) in [("train", split.train), ("test", split.test)] {
        let part = part.with_headers(&opts.input_header, &opts.target_header);
        let csv_path = dir.join(format!("{name}.csv"));
        table::write(&part, &csv_path).with_context(|| format!("Failed to write {}", csv_path.display()))?;

        let out = export::save(&part, opts.format, &dir, name)?;
        info!(path = %out.display(), rows = part.len(), "saved {name} set");

        if opts.verbose && name == "train" {
            print_sample(&part, opts.format)?;
        }
    }

    info!(format = ?opts.format, "data preprocessing completed");
    Ok(())
}

fn print_sample(part: &corpus::Dataset, format: ExportFormat) -> Result<()> {
    let sample = match format {
        ExportFormat::ChatMl => {
            let recs = export::to_dialogue_format(part);
            serde_json::to_string_pretty(&recs[..recs.len().min(2)])?
        }
        ExportFormat::Alpaca => {
            let recs = export::to_instruction_format(part);
            serde_json::to_string_pretty(&recs[..recs.len().min(2)])?
        }
    };
    println!("\n{format:?} format sample:\n{sample}");
    Ok(())
}

pub fn modelfile(file: &Path, output: &Path, base_model: &str) -> Result<()> {
    info!(path = %file.display(), "loading dataset");
    let cleaned = corpus::load(file).with_context(|| format!("Failed to load {}", file.display()))?;
    export::write_modelfile(&cleaned.dataset, base_model, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), rows = cleaned.dataset.len(), "data has been written");
    Ok(())
}
