use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use digest_engine::{
    AnalyzerSettings, FetchSettings, HeaderPolicy, OutputSettings, TableSettings,
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::logging::{LogDestination, DEFAULT_LOG_FILE};

/// Optional settings read from a RON file. Unset fields keep engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub output_root: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_destination: Option<LogDestination>,
    pub user_agent: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub max_bytes: Option<u64>,
    pub header_policy: Option<HeaderPolicy>,
}

pub fn load(path: &Path) -> anyhow::Result<DigestConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ron::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

impl DigestConfig {
    /// Flags given on the command line win over file values.
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(root) = &cli.output_root {
            self.output_root = Some(root.clone());
        }
        if let Some(file) = &cli.log_file {
            self.log_file = Some(file.clone());
        }
        if cli.log_destination.is_some() {
            self.log_destination = cli.log_destination;
        }
        if let Some(agent) = &cli.user_agent {
            self.user_agent = Some(agent.clone());
        }
        if cli.timeout_secs.is_some() {
            self.request_timeout_secs = cli.timeout_secs;
        }
        if cli.header_policy.is_some() {
            self.header_policy = cli.header_policy;
        }
        self
    }

    pub fn log_destination(&self) -> LogDestination {
        self.log_destination.unwrap_or_default()
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        let mut fetch = FetchSettings::default();
        if let Some(agent) = &self.user_agent {
            fetch = fetch.with_user_agent(agent.clone());
        }
        if let Some(secs) = self.request_timeout_secs {
            fetch.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.connect_timeout_secs {
            fetch.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = self.max_bytes {
            fetch.max_bytes = max;
        }

        let output = match &self.output_root {
            Some(root) => OutputSettings::with_root(root.clone()),
            None => OutputSettings::default(),
        };

        AnalyzerSettings {
            fetch,
            tables: TableSettings {
                header_policy: self.header_policy.unwrap_or_default(),
            },
            output,
        }
    }
}
