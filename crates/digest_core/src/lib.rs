//! Digest core: pure run state machine for a single page analysis.
mod effect;
mod msg;
mod state;
mod update;

pub use effect::{Effect, RunOutcome};
pub use msg::Msg;
pub use state::{Failure, Phase, RunState};
pub use update::update;
