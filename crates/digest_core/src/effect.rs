#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { url: String },
    Parse,
    Extract,
    Persist,
    Finish { outcome: RunOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Done,
    Failed,
}
