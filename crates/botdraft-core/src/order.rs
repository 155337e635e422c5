// Turn order generation for linear and snake drafts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the seat order evolves from one round to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftMode {
    /// Every round runs seats 0..N-1.
    Linear,
    /// Odd rounds (0-based) run seats in reverse.
    #[default]
    Snake,
}

impl DraftMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftMode::Linear => "linear",
            DraftMode::Snake => "snake",
        }
    }
}

impl fmt::Display for DraftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(DraftMode::Linear),
            "snake" => Ok(DraftMode::Snake),
            other => Err(format!("unknown draft mode `{other}`, expected linear or snake")),
        }
    }
}

/// Build the full turn sequence for a draft.
///
/// The result has `num_participants * num_rounds` entries, one per pick event.
/// Callers validate counts beforehand; zero counts simply yield an empty order.
pub fn build(num_participants: usize, num_rounds: usize, mode: DraftMode) -> Vec<usize> {
    let mut order = Vec::with_capacity(num_participants * num_rounds);
    for round in 0..num_rounds {
        if mode == DraftMode::Snake && round % 2 == 1 {
            order.extend((0..num_participants).rev());
        } else {
            order.extend(0..num_participants);
        }
    }
    order
}

/// Position of a pick within the draft, both values 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPosition {
    pub round: usize,
    pub pick_in_round: usize,
}

/// Round and pick-in-round for the pick at `cursor`.
///
/// `num_participants` must be non-zero.
pub fn round_position(cursor: usize, num_participants: usize) -> RoundPosition {
    RoundPosition {
        round: cursor / num_participants + 1,
        pick_in_round: cursor % num_participants + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_repeats_forward_order() {
        for n in 1..=6 {
            for rounds in 1..=5 {
                let order = build(n, rounds, DraftMode::Linear);
                assert_eq!(order.len(), n * rounds);
                let forward: Vec<usize> = (0..n).collect();
                for chunk in order.chunks(n) {
                    assert_eq!(chunk, forward.as_slice());
                }
            }
        }
    }

    #[test]
    fn snake_reverses_odd_rounds() {
        for n in 1..=6 {
            for rounds in 1..=5 {
                let order = build(n, rounds, DraftMode::Snake);
                assert_eq!(order.len(), n * rounds);
                let forward: Vec<usize> = (0..n).collect();
                let reverse: Vec<usize> = (0..n).rev().collect();
                for (round, chunk) in order.chunks(n).enumerate() {
                    if round % 2 == 1 {
                        assert_eq!(chunk, reverse.as_slice(), "round {round}");
                    } else {
                        assert_eq!(chunk, forward.as_slice(), "round {round}");
                    }
                }
            }
        }
    }

    #[test]
    fn three_seat_two_round_snake() {
        assert_eq!(build(3, 2, DraftMode::Snake), vec![0, 1, 2, 2, 1, 0]);
    }

    #[test]
    fn single_participant() {
        assert_eq!(build(1, 3, DraftMode::Snake), vec![0, 0, 0]);
    }

    #[test]
    fn zero_rounds_is_empty() {
        assert!(build(4, 0, DraftMode::Linear).is_empty());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Snake".parse::<DraftMode>(), Ok(DraftMode::Snake));
        assert_eq!(" linear ".parse::<DraftMode>(), Ok(DraftMode::Linear));
        assert!("auction".parse::<DraftMode>().is_err());
    }

    #[test]
    fn round_position_wraps_per_round() {
        assert_eq!(
            round_position(0, 4),
            RoundPosition {
                round: 1,
                pick_in_round: 1
            }
        );
        assert_eq!(
            round_position(5, 4),
            RoundPosition {
                round: 2,
                pick_in_round: 2
            }
        );
    }
}
