// Error types for draft configuration and engine contract checks.

use thiserror::Error;

use crate::engine::DraftStatus;

/// Raised while building a draft from catalog data and setup input, before
/// any pick happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("at least one bot is required, got {0}")]
    TooFewBots(usize),

    #[error("at least one round is required, got {0}")]
    TooFewRounds(usize),

    #[error("human position {position} is outside 1..={participants}")]
    HumanPositionOutOfRange { position: usize, participants: usize },

    #[error("pick rate for `{unit}` must be between 1 and 100, got {rate}")]
    RateOutOfRange { unit: String, rate: u32 },

    #[error("unit `{0}` is listed more than once")]
    DuplicateUnit(String),

    #[error("game `{0}` is listed more than once")]
    DuplicateGame(String),

    #[error("unit `{0}` is not a draftable unit of this game")]
    UnknownDraftableUnit(String),

    #[error("unit `{0}` is not a free unit of this game")]
    UnknownFreeUnit(String),

    #[error("no game named `{0}`")]
    UnknownGame(String),

    #[error("game `{0}` has no units configured")]
    EmptyGame(String),
}

/// A caller broke one of the engine's preconditions. These indicate an
/// integration bug, not a condition worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("operation requires an in-progress draft, draft is {0}")]
    NotInProgress(DraftStatus),

    #[error("results require a complete draft, draft is {0}")]
    NotComplete(DraftStatus),

    #[error("draft was already started")]
    AlreadyStarted,

    #[error("participant {got} picked out of turn, it is participant {expected}'s turn")]
    OutOfTurn { expected: usize, got: usize },

    #[error("unit `{0}` is not available")]
    UnitUnavailable(String),

    #[error("no candidates to select from")]
    NoCandidates,

    #[error("turn order references participant {index} but only {count} exist")]
    UnknownParticipant { index: usize, count: usize },

    #[error("unit `{0}` appears more than once in the pool")]
    DuplicatePoolUnit(String),

    #[error("a draft needs exactly one human participant, got {0}")]
    HumanCount(usize),
}
