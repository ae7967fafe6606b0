use std::collections::VecDeque;
use std::mem;
use std::path::PathBuf;
use std::sync::Arc;

use digest_core::{update, Effect, Msg, Phase, RunOutcome, RunState};
use digest_logging::{digest_error, digest_info, digest_warn};

use crate::decode::decode_html;
use crate::dom::ParsedDocument;
use crate::output::{OutputSettings, OutputWriter};
use crate::persist::PersistError;
use crate::{
    ContentExtractor, ContentModel, FailureKind, FetchError, FetchMetadata, FetchOutput,
    FetchSettings, Fetcher, ParseError, ReqwestFetcher, TableSettings,
};

#[derive(Debug, Clone, Default)]
pub struct AnalyzerSettings {
    pub fetch: FetchSettings,
    pub tables: TableSettings,
    pub output: OutputSettings,
}

/// Result of a run that reached `Phase::Done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub model: ContentModel,
    pub output_dir: PathBuf,
    pub fetch: FetchMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
    #[error("persist failed: {0}")]
    Persist(#[from] PersistError),
    #[error("run stopped while {0}")]
    Incomplete(Phase),
}

/// Sequences fetch, parse, extract and persist for one URL.
pub struct Analyzer {
    fetcher: Arc<dyn Fetcher>,
    extractor: ContentExtractor,
    writer: OutputWriter,
}

/// Data handed from one phase to the next.
#[derive(Default)]
struct Scratch {
    fetched: Option<FetchOutput>,
    document: Option<ParsedDocument>,
    model: Option<ContentModel>,
    error: Option<RunError>,
}

impl Analyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self::with_fetcher(
            Arc::new(ReqwestFetcher::new(settings.fetch)),
            settings.tables,
            settings.output,
        )
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        tables: TableSettings,
        output: OutputSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor: ContentExtractor::new(tables),
            writer: OutputWriter::new(output),
        }
    }

    /// Runs one analysis. Nothing is written unless the fetch and parse succeed.
    ///
    /// The DOM is single-threaded, so the returned future is not `Send`;
    /// drive it with `block_on`.
    pub async fn analyze(&self, url: &str) -> Result<RunReport, RunError> {
        digest_info!("Starting analysis of {}", url);
        let mut state = RunState::new();
        let mut scratch = Scratch::default();
        let mut pending: VecDeque<Effect> = apply(
            &mut state,
            Msg::Start {
                url: url.to_string(),
            },
        );

        while let Some(effect) = pending.pop_front() {
            let msg = match effect {
                Effect::Fetch { url } => match self.fetcher.fetch(&url).await {
                    Ok(output) => {
                        scratch.fetched = Some(output);
                        Msg::Fetched
                    }
                    Err(err) => {
                        let reason = err.to_string();
                        scratch.error = Some(err.into());
                        Msg::FetchFailed { reason }
                    }
                },
                Effect::Parse => parse(&mut scratch),
                Effect::Extract => match scratch.document.take() {
                    Some(doc) => {
                        scratch.model = Some(self.extractor.extract(&doc));
                        Msg::Extracted
                    }
                    None => break,
                },
                Effect::Persist => {
                    let Some(model) = scratch.model.as_ref() else {
                        break;
                    };
                    match self.writer.persist(model, state.url().unwrap_or(url)) {
                        Ok(output_dir) => Msg::Persisted { output_dir },
                        Err(err) => {
                            let reason = err.to_string();
                            scratch.error = Some(err.into());
                            Msg::PersistFailed { reason }
                        }
                    }
                }
                Effect::Finish { outcome } => return finish(outcome, &state, scratch),
            };
            pending.extend(apply(&mut state, msg));
        }

        Err(RunError::Incomplete(state.phase()))
    }
}

fn parse(scratch: &mut Scratch) -> Msg {
    let Some(fetched) = scratch.fetched.as_ref() else {
        return Msg::ParseFailed {
            reason: "no response body".to_string(),
        };
    };
    let decoded = decode_html(&fetched.bytes, fetched.metadata.content_type.as_deref());
    if decoded.had_errors {
        digest_warn!(
            "Body of {} had malformed {} sequences; replaced",
            fetched.metadata.final_url,
            decoded.encoding_label
        );
    }
    match ParsedDocument::parse(&decoded.html) {
        Ok(doc) => {
            scratch.document = Some(doc);
            Msg::Parsed
        }
        Err(err) => {
            let reason = err.to_string();
            scratch.error = Some(err.into());
            Msg::ParseFailed { reason }
        }
    }
}

/// Feeds `msg` to the state machine and logs the transition it caused.
fn apply(state: &mut RunState, msg: Msg) -> VecDeque<Effect> {
    let before = state.phase();
    let (next, effects) = update(mem::take(state), msg);
    *state = next;
    let after = state.phase();
    let url = state.url().unwrap_or_default();
    if after != before {
        digest_info!("[{}] {} -> {}", url, before, after);
    }
    if let Some(failure) = state.failure().filter(|_| after != before) {
        digest_error!(
            "Analysis of {} failed while {}: {}",
            url,
            failure.phase,
            failure.reason
        );
    }
    effects.into()
}

fn finish(outcome: RunOutcome, state: &RunState, mut scratch: Scratch) -> Result<RunReport, RunError> {
    let url = state.url().unwrap_or_default();
    match outcome {
        RunOutcome::Done => {
            let (Some(model), Some(output_dir), Some(fetched)) = (
                scratch.model,
                state.output_dir().map(PathBuf::from),
                scratch.fetched,
            ) else {
                return Err(RunError::Incomplete(state.phase()));
            };
            digest_info!("Analysis completed. Results in {}", output_dir.display());
            Ok(RunReport {
                model,
                output_dir,
                fetch: fetched.metadata,
            })
        }
        RunOutcome::Failed => Err(scratch.error.take().unwrap_or_else(|| {
            // Only URL validation fails before any effect runs.
            let reason = state
                .failure()
                .map(|f| f.reason.clone())
                .unwrap_or_default();
            FetchError::new(url, FailureKind::InvalidUrl, reason).into()
        })),
    }
}
