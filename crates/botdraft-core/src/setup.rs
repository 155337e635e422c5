// Draft setup: turns catalog data plus operator choices into a DraftPlan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Game;
use crate::engine::{DraftPlan, Participant};
use crate::error::ConfigurationError;
use crate::order::{self, DraftMode};
use crate::rates::PickRateTable;

/// Pick rate for a unit moved out of the free category.
pub const DEFAULT_UNFREED_RATE: u32 = 50;

/// Label of the human participant.
pub const HUMAN_LABEL: &str = "Player";

/// Operator choices made before a draft starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftSetup {
    pub num_bots: usize,
    pub num_rounds: usize,
    pub mode: DraftMode,
    /// 1-based seat of the human.
    pub human_position: usize,
    /// Per-unit weights replacing the catalog defaults.
    pub rate_overrides: BTreeMap<String, u32>,
    /// Draftable units to hand out for free instead.
    pub add_free: Vec<String>,
    /// Free units to put back into the pool.
    pub remove_free: Vec<String>,
}

impl Default for DraftSetup {
    fn default() -> Self {
        DraftSetup {
            num_bots: 3,
            num_rounds: 7,
            mode: DraftMode::Snake,
            human_position: 1,
            rate_overrides: BTreeMap::new(),
            add_free: Vec::new(),
            remove_free: Vec::new(),
        }
    }
}

impl DraftSetup {
    /// Bots plus the human.
    pub fn participant_count(&self) -> usize {
        self.num_bots + 1
    }

    /// Check counts and the human position, independent of any game.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.num_bots < 1 {
            return Err(ConfigurationError::TooFewBots(self.num_bots));
        }
        if self.num_rounds < 1 {
            return Err(ConfigurationError::TooFewRounds(self.num_rounds));
        }
        let participants = self.participant_count();
        if !(1..=participants).contains(&self.human_position) {
            return Err(ConfigurationError::HumanPositionOutOfRange {
                position: self.human_position,
                participants,
            });
        }
        Ok(())
    }

    /// Resolve categories, rates, seats and turn order for `game`.
    pub fn build_plan(&self, game: &Game) -> Result<DraftPlan, ConfigurationError> {
        self.validate()?;
        game.validate()?;
        if !game.is_playable() {
            return Err(ConfigurationError::EmptyGame(game.name.clone()));
        }

        let free_units = self.resolve_free_units(game)?;

        let pool: Vec<String> = game
            .all_unit_names()
            .into_iter()
            .filter(|name| !free_units.iter().any(|f| f.as_str() == *name))
            .map(str::to_string)
            .collect();

        let mut rates = PickRateTable::new();
        for name in &pool {
            let rate = game
                .unit(name)
                .map(|u| u.pick_rate)
                .unwrap_or(DEFAULT_UNFREED_RATE);
            rates.set(name.as_str(), rate)?;
        }
        for (name, &rate) in &self.rate_overrides {
            if !rates.contains(name) {
                return Err(ConfigurationError::UnknownDraftableUnit(name.clone()));
            }
            rates.set(name.as_str(), rate)?;
        }

        let participants = participant_seats(self.participant_count(), self.human_position - 1);
        let turn_order = order::build(participants.len(), self.num_rounds, self.mode);

        Ok(DraftPlan {
            participants,
            turn_order,
            pool,
            free_units,
            rates,
        })
    }

    fn resolve_free_units(&self, game: &Game) -> Result<Vec<String>, ConfigurationError> {
        let mut free: Vec<String> = game.free_units.clone();

        for name in &self.remove_free {
            let pos = free
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| ConfigurationError::UnknownFreeUnit(name.clone()))?;
            free.remove(pos);
        }

        let all = game.all_unit_names();
        for name in &self.add_free {
            if !all.contains(&name.as_str()) || free.contains(name) {
                return Err(ConfigurationError::UnknownDraftableUnit(name.clone()));
            }
            free.push(name.clone());
        }

        Ok(free)
    }
}

/// Seats for `total` participants with the human at `human_idx`. Bots are
/// numbered from 1 in seat order.
pub fn participant_seats(total: usize, human_idx: usize) -> Vec<Participant> {
    let mut bot_number = 0;
    (0..total)
        .map(|i| {
            if i == human_idx {
                Participant::human(HUMAN_LABEL)
            } else {
                bot_number += 1;
                Participant::bot(format!("Bot {bot_number}"))
            }
        })
        .collect()
}

/// English ordinal for `n`, e.g. "1st", "12th", "23rd".
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Choices for the human's seat in a draft of `participants` seats.
pub fn position_labels(participants: usize) -> Vec<String> {
    (1..=participants).map(ordinal).collect()
}
