// Read-only views of the engine for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::engine::{DraftStatus, ParticipantKind, PickRecord};
use crate::order::RoundPosition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub label: String,
    pub kind: ParticipantKind,
    pub picks: Vec<String>,
}

/// Everything a front end needs to draw the draft board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub status: DraftStatus,
    /// Participant on the clock, if the draft is in progress.
    pub current_turn: Option<usize>,
    pub progress: Option<RoundPosition>,
    pub total_turns: usize,
    pub picks_made: usize,
    /// Index of the human participant.
    pub human: usize,
    pub participants: Vec<ParticipantView>,
    pub free_units: Vec<String>,
    pub available: Vec<String>,
    pub log: Vec<PickRecord>,
}

impl DraftSnapshot {
    pub fn is_human_turn(&self) -> bool {
        self.current_turn == Some(self.human)
    }

    /// Label of the participant on the clock.
    pub fn current_label(&self) -> Option<&str> {
        self.current_turn
            .and_then(|i| self.participants.get(i))
            .map(|p| p.label.as_str())
    }

    /// One-line status, e.g. "Round 2 - Pick 3 of 4 - Bot 2's turn".
    pub fn headline(&self) -> String {
        match (self.progress, self.current_label()) {
            (Some(at), Some(label)) => format!(
                "Round {} - Pick {} of {} - {}'s turn",
                at.round,
                at.pick_in_round,
                self.participants.len(),
                label
            ),
            _ if self.status == DraftStatus::Complete => "Draft complete!".to_string(),
            _ => "Draft not started".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResult {
    pub label: String,
    pub kind: ParticipantKind,
    pub picks: Vec<String>,
}

/// Final outcome of a completed draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResults {
    pub participants: Vec<ParticipantResult>,
    pub free_units: Vec<String>,
    /// Draftable units nobody took (rounds ran out first).
    pub unpicked: Vec<String>,
    pub turns_used: usize,
    pub turns_planned: usize,
}

impl DraftResults {
    /// Whether the pool ran dry before the planned rounds finished.
    pub fn ended_early(&self) -> bool {
        self.turns_used < self.turns_planned
    }
}
