// Messages exchanged between the draft loop and a front end.

use botdraft_core::{DraftResults, DraftSnapshot, PickRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Commands a front end sends to the draft loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserCommand {
    /// The human takes `unit`.
    Pick { unit: String },
    /// Throw the current draft away and start again with the same setup.
    Redraft,
    Quit,
}

impl UserCommand {
    /// Interpret one line of text input. Blank lines yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Some(UserCommand::Quit),
            "redraft" => Some(UserCommand::Redraft),
            _ => Some(UserCommand::Pick {
                unit: trimmed.to_string(),
            }),
        }
    }
}

/// Updates pushed from the draft loop to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum UiUpdate {
    /// A new draft began (first draft or a redraft).
    DraftStarted {
        game: String,
        draft_number: u64,
        snapshot: Box<DraftSnapshot>,
    },
    /// Someone picked a unit.
    PickMade { label: String, record: PickRecord },
    /// Full board after a change.
    Snapshot(Box<DraftSnapshot>),
    /// The human is on the clock; these units may be picked.
    YourTurn { available: Vec<String> },
    /// A human pick was refused and nothing changed.
    PickRejected { unit: String, reason: String },
    DraftComplete(Box<SessionResults>),
}

/// Results of one finished draft, stamped with wall-clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResults {
    pub game: String,
    pub draft_number: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: DraftResults,
}
