use std::fmt;
use std::path::{Path, PathBuf};

/// Lifecycle of one run. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Parsing,
    Extracting,
    Persisting,
    Done,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Fetching => "fetching",
            Phase::Parsing => "parsing",
            Phase::Extracting => "extracting",
            Phase::Persisting => "persisting",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Why a run ended in `Phase::Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Phase that was active when the failure happened.
    pub phase: Phase,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunState {
    phase: Phase,
    url: Option<String>,
    failure: Option<Failure>,
    output_dir: Option<PathBuf>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub(crate) fn begin(&mut self, url: String) {
        self.url = Some(url);
        self.phase = Phase::Fetching;
    }

    pub(crate) fn advance(&mut self, next: Phase) {
        self.phase = next;
    }

    pub(crate) fn fail(&mut self, reason: String) {
        self.failure = Some(Failure {
            phase: self.phase,
            reason,
        });
        self.phase = Phase::Failed;
    }

    pub(crate) fn finish(&mut self, output_dir: PathBuf) {
        self.output_dir = Some(output_dir);
        self.phase = Phase::Done;
    }
}
