mod cli;
mod config;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use digest_engine::{Analyzer, RunReport};
use digest_logging::digest_info;

use crate::cli::Cli;
use crate::config::DigestConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => config::load(path)?,
        None => DigestConfig::default(),
    }
    .with_cli_overrides(&cli);

    let guard = logging::initialize(config.log_destination(), &config.log_file())
        .context("logging was already initialized")?;
    if let Some(path) = guard.log_file() {
        digest_info!("Logging to {}", path.display());
    }

    let analyzer = Analyzer::new(config.analyzer_settings());
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let code = match runtime.block_on(analyzer.analyze(&cli.url)) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Analysis of {} failed: {}", cli.url, err);
            ExitCode::FAILURE
        }
    };

    drop(guard);
    Ok(code)
}

fn print_summary(report: &RunReport) {
    let info = &report.model.article_info;
    println!();
    println!("Analysis summary:");
    println!("Title: {}", info.title.as_deref().unwrap_or("(none)"));
    println!("Headings found: {}", info.headings.len());
    println!("Tables found: {}", report.model.tables.len());
    println!("Images found: {}", report.model.images.len());
    println!("Paragraphs found: {}", info.paragraphs.len());
    println!("Output: {}", report.output_dir.display());
}
