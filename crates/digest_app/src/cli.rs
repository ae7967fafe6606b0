use std::path::PathBuf;

use clap::Parser;
use digest_engine::HeaderPolicy;

use crate::logging::LogDestination;

pub const DEFAULT_URL: &str = "https://es.wikipedia.org/wiki/Bolivia";

/// Fetch one web page and save a structured digest of its content.
#[derive(Debug, Parser)]
#[command(name = "page_digest", version)]
pub struct Cli {
    /// Page to analyze.
    #[arg(default_value = DEFAULT_URL)]
    pub url: String,

    /// RON config file; flags given here take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory that receives one timestamped folder per run.
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub log_destination: Option<LogDestination>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Whole-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// all-header-cells, first-row or none.
    #[arg(long)]
    pub header_policy: Option<HeaderPolicy>,
}
