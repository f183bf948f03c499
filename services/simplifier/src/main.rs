mod cli;
mod cmd_analyse;
mod cmd_export;
mod cmd_process;
mod cmd_simplify;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use simplifier::config::{AppConfig, DecodingParams};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let cfg = AppConfig::from_env()?;
    let verbose = cli.verbose;

    match cli.command {
        Commands::Preprocess { file } => cmd_analyse::preprocess(&file, verbose),
        Commands::Analyse {
            file,
            no_save,
            no_plot,
            top_hard,
        } => cmd_analyse::analyse(&file, !no_save, !no_plot, top_hard, verbose),
        Commands::Process {
            file,
            model,
            use_rules,
            column,
            no_save,
            no_plot,
        } => {
            let opts = cmd_process::ProcessOpts {
                model: model.unwrap_or_else(|| cfg.default_model.clone()),
                use_rules: use_rules || cfg.use_rules,
                column,
                save: !no_save,
                plot: !no_plot,
                verbose,
            };
            cmd_process::run(&cfg, &file, &opts).await
        }
        Commands::Split {
            file,
            train_fraction,
            random_seed,
            input_header,
            target_header,
            format,
            out_dir,
        } => cmd_export::split(
            &file,
            &cmd_export::SplitOpts {
                train_fraction,
                random_seed,
                input_header,
                target_header,
                format: format.into(),
                out_dir,
                verbose,
            },
        ),
        Commands::Modelfile {
            file,
            output,
            base_model,
        } => cmd_export::modelfile(&file, &output, &base_model),
        Commands::Simplify {
            text,
            model,
            use_rules,
            top_k,
            top_p,
            temperature,
        } => {
            let params = DecodingParams {
                top_k: top_k.unwrap_or(cfg.decoding.top_k),
                top_p: top_p.unwrap_or(cfg.decoding.top_p),
                temperature: temperature.unwrap_or(cfg.decoding.temperature),
            };
            let model = model.unwrap_or_else(|| cfg.default_model.clone());
            cmd_simplify::simplify(&cfg, &text, &model, use_rules || cfg.use_rules, &params).await
        }
        Commands::Models => cmd_simplify::models(&cfg).await,
        Commands::Serve => cmd_simplify::serve(cfg).await,
    }
}

/// `LOG_LEVEL` is an `EnvFilter` directive (default `info`); `LOG_FORMAT`
/// picks `full`, `compact` or `pretty` output. Logs go to stderr so
/// stdout carries only reports.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("compact") => builder.compact().init(),
        Ok("pretty") => builder.pretty().init(),
        _ => builder.init(),
    }
}
