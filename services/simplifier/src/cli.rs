use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "leichte-sprache")]
#[command(author, version, about = "Simplify German text into Leichte Sprache with a local LLM", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a two-column corpus and save it with a `_preprocessed` suffix
    Preprocess {
        /// Input CSV file
        file: PathBuf,
    },

    /// Score original and simplified text with FRE and WSTF
    Analyse {
        /// Input CSV file
        file: PathBuf,

        /// Do not write the `_analysed` table
        #[arg(long)]
        no_save: bool,

        /// Do not render charts
        #[arg(long)]
        no_plot: bool,

        /// Print the hardest samples by both scores
        #[arg(long)]
        top_hard: bool,
    },

    /// Simplify every row of a dataset with a model and score the output
    Process {
        /// Input CSV file
        file: PathBuf,

        /// Model to use (default: OLLAMA_MODEL)
        #[arg(short, long)]
        model: Option<String>,

        /// Put the Leichte Sprache rules into the prompt
        #[arg(short = 'r', long)]
        use_rules: bool,

        /// Name of the column containing the text to process
        #[arg(short, long, default_value = "Original")]
        column: String,

        /// Do not write the `_llm_processed` table
        #[arg(long)]
        no_save: bool,

        /// Do not render charts
        #[arg(long)]
        no_plot: bool,
    },

    /// Split a dataset into train/test sets and export them for fine-tuning
    Split {
        /// Input CSV file
        file: PathBuf,

        /// Fraction of rows used for training
        #[arg(long, default_value_t = 0.8)]
        train_fraction: f64,

        /// Seed of the row shuffle
        #[arg(long, default_value_t = 42)]
        random_seed: u64,

        /// Header of the input column in train.csv/test.csv
        #[arg(long, default_value = "input")]
        input_header: String,

        /// Header of the target column in train.csv/test.csv
        #[arg(long, default_value = "output")]
        target_header: String,

        /// Export format
        #[arg(long, value_enum, default_value_t = Format::Chatml)]
        format: Format,

        /// Output directory (default: next to the input file)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Write an Ollama model file with the dataset as example messages
    Modelfile {
        /// Input CSV file
        file: PathBuf,

        /// Output file
        #[arg(long, default_value = "ModelfileLS_FS")]
        output: PathBuf,

        /// Base model the file builds on
        #[arg(long, default_value = "llama3.1")]
        base_model: String,
    },

    /// Simplify a single text
    Simplify {
        /// Text to simplify
        text: String,

        #[arg(short, long)]
        model: Option<String>,

        #[arg(short = 'r', long)]
        use_rules: bool,

        #[arg(long)]
        top_k: Option<u32>,

        #[arg(long)]
        top_p: Option<f32>,

        #[arg(long)]
        temperature: Option<f32>,
    },

    /// List configured models available on the service
    Models,

    /// Serve the JSON backend of the simplification form
    Serve,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Chatml,
    Alpaca,
}

impl From<Format> for corpus::export::ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Chatml => corpus::export::ExportFormat::ChatMl,
            Format::Alpaca => corpus::export::ExportFormat::Alpaca,
        }
    }
}
