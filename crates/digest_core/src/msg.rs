use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Caller asked to analyze a URL.
    Start { url: String },
    /// Response body arrived.
    Fetched,
    /// Transport or HTTP status failure.
    FetchFailed { reason: String },
    /// A DOM was built from the body.
    Parsed,
    /// No DOM could be built.
    ParseFailed { reason: String },
    /// The content model is ready.
    Extracted,
    /// Every artifact was written under `output_dir`.
    Persisted { output_dir: PathBuf },
    /// An artifact failed to write.
    PersistFailed { reason: String },
}
