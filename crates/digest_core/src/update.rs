use url::Url;

use crate::{Effect, Msg, Phase, RunOutcome, RunState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not match the current phase leave the state untouched and
/// produce no effects; terminal phases accept nothing.
pub fn update(mut state: RunState, msg: Msg) -> (RunState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (Phase::Idle, Msg::Start { url }) => {
            let url = url.trim().to_string();
            state.begin(url.clone());
            match Url::parse(&url) {
                Ok(_) => vec![Effect::Fetch { url }],
                Err(err) => {
                    state.fail(format!("invalid url: {err}"));
                    vec![finish(RunOutcome::Failed)]
                }
            }
        }
        (Phase::Fetching, Msg::Fetched) => {
            state.advance(Phase::Parsing);
            vec![Effect::Parse]
        }
        (Phase::Parsing, Msg::Parsed) => {
            state.advance(Phase::Extracting);
            vec![Effect::Extract]
        }
        (Phase::Extracting, Msg::Extracted) => {
            state.advance(Phase::Persisting);
            vec![Effect::Persist]
        }
        (Phase::Persisting, Msg::Persisted { output_dir }) => {
            state.finish(output_dir);
            vec![finish(RunOutcome::Done)]
        }
        (Phase::Fetching, Msg::FetchFailed { reason })
        | (Phase::Parsing, Msg::ParseFailed { reason })
        | (Phase::Persisting, Msg::PersistFailed { reason }) => {
            state.fail(reason);
            vec![finish(RunOutcome::Failed)]
        }
        _ => Vec::new(),
    };

    (state, effects)
}

fn finish(outcome: RunOutcome) -> Effect {
    Effect::Finish { outcome }
}
