// Draft engine: turn cursor, pick application, and completion detection.

use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ContractViolation;
use crate::order::{round_position, RoundPosition};
use crate::rates::PickRateTable;
use crate::selector;
use crate::snapshot::{DraftResults, DraftSnapshot, ParticipantResult, ParticipantView};

// ---------------------------------------------------------------------------
// Participants and plans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Human,
    Bot,
}

/// A seat in the draft. Its index is its position in the participant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display label, e.g. "Player" or "Bot 2".
    pub label: String,
    pub kind: ParticipantKind,
}

impl Participant {
    pub fn human(label: impl Into<String>) -> Self {
        Participant {
            label: label.into(),
            kind: ParticipantKind::Human,
        }
    }

    pub fn bot(label: impl Into<String>) -> Self {
        Participant {
            label: label.into(),
            kind: ParticipantKind::Bot,
        }
    }

    pub fn is_human(&self) -> bool {
        self.kind == ParticipantKind::Human
    }
}

/// Everything `DraftEngine::start` needs to run one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPlan {
    pub participants: Vec<Participant>,
    pub turn_order: Vec<usize>,
    /// Draftable units in candidate order.
    pub pool: Vec<String>,
    /// Units granted to everyone; never drafted.
    pub free_units: Vec<String>,
    pub rates: PickRateTable,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DraftStatus::NotStarted => "not started",
            DraftStatus::InProgress => "in progress",
            DraftStatus::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// A single applied pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRecord {
    /// Position in the turn order, 0-based.
    pub pick_number: usize,
    pub round: usize,
    pub pick_in_round: usize,
    pub participant: usize,
    pub unit: String,
}

/// Mutable draft data. Only the engine writes to it.
#[derive(Debug, Clone, Default)]
struct DraftState {
    participants: Vec<Participant>,
    turn_order: Vec<usize>,
    cursor: usize,
    picks: Vec<Vec<String>>,
    available: Vec<String>,
    free_units: Vec<String>,
    log: Vec<PickRecord>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Runs one draft from start to completion.
///
/// The engine is synchronous and performs no I/O. Automated picks draw from
/// the random source `R`, which tests replace with a seeded generator.
pub struct DraftEngine<R = StdRng> {
    rng: R,
    status: DraftStatus,
    rates: PickRateTable,
    human: usize,
    state: DraftState,
}

impl DraftEngine<StdRng> {
    /// Engine with a reproducible random source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Engine seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> DraftEngine<R> {
    pub fn new(rng: R) -> Self {
        DraftEngine {
            rng,
            status: DraftStatus::NotStarted,
            rates: PickRateTable::new(),
            human: 0,
            state: DraftState::default(),
        }
    }

    /// Begin the draft described by `plan`.
    ///
    /// Goes straight to `Complete` when the turn order or the pool is empty.
    pub fn start(&mut self, plan: DraftPlan) -> Result<DraftStatus, ContractViolation> {
        if self.status != DraftStatus::NotStarted {
            return Err(ContractViolation::AlreadyStarted);
        }

        let humans: Vec<usize> = plan
            .participants
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_human())
            .map(|(i, _)| i)
            .collect();
        if humans.len() != 1 {
            return Err(ContractViolation::HumanCount(humans.len()));
        }

        let count = plan.participants.len();
        if let Some(&index) = plan.turn_order.iter().find(|&&i| i >= count) {
            return Err(ContractViolation::UnknownParticipant { index, count });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = plan.pool.iter().find(|u| !seen.insert(u.as_str())) {
            return Err(ContractViolation::DuplicatePoolUnit(dup.clone()));
        }

        self.human = humans[0];
        self.rates = plan.rates;
        self.state = DraftState {
            picks: vec![Vec::new(); count],
            participants: plan.participants,
            turn_order: plan.turn_order,
            cursor: 0,
            available: plan.pool,
            free_units: plan.free_units,
            log: Vec::new(),
        };

        self.status = if self.state.turn_order.is_empty() || self.state.available.is_empty() {
            DraftStatus::Complete
        } else {
            DraftStatus::InProgress
        };

        info!(
            "Draft started: {} participants, {} turns, {} units in pool, status {}",
            count,
            self.state.turn_order.len(),
            self.state.available.len(),
            self.status
        );

        Ok(self.status)
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == DraftStatus::Complete
    }

    /// Participant whose turn it is. Only valid while the draft is in progress.
    pub fn current_turn_participant(&self) -> Result<usize, ContractViolation> {
        self.require_in_progress()?;
        Ok(self.state.turn_order[self.state.cursor])
    }

    /// Whether the draft is waiting on the human participant.
    pub fn is_human_turn(&self) -> bool {
        self.current_turn_participant().is_ok_and(|p| p == self.human)
    }

    /// Apply `unit` as `participant`'s pick and advance the cursor.
    ///
    /// Fails without touching state if the draft is not in progress, it is
    /// not `participant`'s turn, or `unit` is not in the pool.
    pub fn apply_pick(
        &mut self,
        participant: usize,
        unit: &str,
    ) -> Result<PickRecord, ContractViolation> {
        let expected = self.current_turn_participant()?;
        if participant != expected {
            return Err(ContractViolation::OutOfTurn {
                expected,
                got: participant,
            });
        }
        let pos = self
            .state
            .available
            .iter()
            .position(|u| u == unit)
            .ok_or_else(|| ContractViolation::UnitUnavailable(unit.to_string()))?;

        let unit = self.state.available.remove(pos);
        let at = round_position(self.state.cursor, self.state.participants.len());
        let record = PickRecord {
            pick_number: self.state.cursor,
            round: at.round,
            pick_in_round: at.pick_in_round,
            participant,
            unit: unit.clone(),
        };

        self.state.picks[participant].push(unit);
        self.state.log.push(record.clone());
        self.state.cursor += 1;

        debug!(
            "Pick {} (round {}, pick {}): {} takes {}",
            record.pick_number + 1,
            record.round,
            record.pick_in_round,
            self.state.participants[participant].label,
            record.unit
        );

        if self.state.cursor >= self.state.turn_order.len() || self.state.available.is_empty() {
            self.status = DraftStatus::Complete;
            info!(
                "Draft complete after {} of {} turns, {} units left",
                self.state.cursor,
                self.state.turn_order.len(),
                self.state.available.len()
            );
        }

        Ok(record)
    }

    /// Make at most one automated pick.
    ///
    /// Returns `None` when the draft is complete or waiting on the human.
    pub fn step_automated_turn(&mut self) -> Result<Option<PickRecord>, ContractViolation> {
        match self.status {
            DraftStatus::NotStarted => {
                return Err(ContractViolation::NotInProgress(self.status));
            }
            DraftStatus::Complete => return Ok(None),
            DraftStatus::InProgress => {}
        }

        let participant = self.state.turn_order[self.state.cursor];
        if participant == self.human {
            return Ok(None);
        }

        let unit = selector::pick(&self.state.available, &self.rates, &mut self.rng)?.to_string();
        self.apply_pick(participant, &unit).map(Some)
    }

    /// Run automated picks until the human is up or the draft completes.
    pub fn advance_automated_turns(&mut self) -> Result<Vec<PickRecord>, ContractViolation> {
        let mut applied = Vec::new();
        while let Some(record) = self.step_automated_turn()? {
            applied.push(record);
        }
        Ok(applied)
    }

    // --- Observable state ---

    pub fn participants(&self) -> &[Participant] {
        &self.state.participants
    }

    /// Index of the human participant. Meaningless before `start`.
    pub fn human_index(&self) -> usize {
        self.human
    }

    /// Units picked by `participant`, in pick order.
    pub fn picks_of(&self, participant: usize) -> &[String] {
        self.state
            .picks
            .get(participant)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn available(&self) -> &[String] {
        &self.state.available
    }

    pub fn free_units(&self) -> &[String] {
        &self.state.free_units
    }

    pub fn pick_log(&self) -> &[PickRecord] {
        &self.state.log
    }

    pub fn turn_order(&self) -> &[usize] {
        &self.state.turn_order
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn rates(&self) -> &PickRateTable {
        &self.rates
    }

    /// Round and pick-in-round of the next pick, while in progress.
    pub fn progress(&self) -> Option<RoundPosition> {
        (self.status == DraftStatus::InProgress)
            .then(|| round_position(self.state.cursor, self.state.participants.len()))
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            status: self.status,
            current_turn: self.current_turn_participant().ok(),
            progress: self.progress(),
            total_turns: self.state.turn_order.len(),
            picks_made: self.state.cursor,
            human: self.human,
            participants: self
                .state
                .participants
                .iter()
                .zip(&self.state.picks)
                .map(|(p, picks)| ParticipantView {
                    label: p.label.clone(),
                    kind: p.kind,
                    picks: picks.clone(),
                })
                .collect(),
            free_units: self.state.free_units.clone(),
            available: self.state.available.clone(),
            log: self.state.log.clone(),
        }
    }

    /// Final pick lists. Only valid once the draft is complete.
    pub fn results(&self) -> Result<DraftResults, ContractViolation> {
        if self.status != DraftStatus::Complete {
            return Err(ContractViolation::NotComplete(self.status));
        }
        Ok(DraftResults {
            participants: self
                .state
                .participants
                .iter()
                .zip(&self.state.picks)
                .map(|(p, picks)| ParticipantResult {
                    label: p.label.clone(),
                    kind: p.kind,
                    picks: picks.clone(),
                })
                .collect(),
            free_units: self.state.free_units.clone(),
            unpicked: self.state.available.clone(),
            turns_used: self.state.cursor,
            turns_planned: self.state.turn_order.len(),
        })
    }

    fn require_in_progress(&self) -> Result<(), ContractViolation> {
        if self.status == DraftStatus::InProgress {
            Ok(())
        } else {
            Err(ContractViolation::NotInProgress(self.status))
        }
    }
}
