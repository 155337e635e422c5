// Game catalog: draftable units with default pick rates, plus free units.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::rates::validate_rate;

/// A draftable unit as described by game data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDef {
    pub name: String,
    /// Default desirability weight, 1..=100.
    pub pick_rate: u32,
}

/// One game's unit data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    #[serde(default)]
    pub units: Vec<UnitDef>,
    /// Units every participant receives without drafting.
    #[serde(default)]
    pub free_units: Vec<String>,
}

impl Game {
    /// Whether the game can be drafted. Games without units are listed but
    /// cannot be selected.
    pub fn is_playable(&self) -> bool {
        !self.units.is_empty()
    }

    /// Every unit name in catalog order: free units first, then draftable units.
    pub fn all_unit_names(&self) -> Vec<&str> {
        self.free_units
            .iter()
            .map(String::as_str)
            .chain(self.units.iter().map(|u| u.name.as_str()))
            .collect()
    }

    pub fn unit(&self, name: &str) -> Option<&UnitDef> {
        self.units.iter().find(|u| u.name == name)
    }

    /// Short description for listings, e.g. "12 units".
    pub fn summary(&self) -> String {
        if self.is_playable() {
            format!("{} units", self.units.len())
        } else {
            "No units configured yet".to_string()
        }
    }

    /// Check weights and name uniqueness within and across categories.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for unit in &self.units {
            validate_rate(&unit.name, unit.pick_rate)?;
            if !seen.insert(&unit.name) {
                return Err(ConfigurationError::DuplicateUnit(unit.name.clone()));
            }
        }
        for name in &self.free_units {
            if !seen.insert(name) {
                return Err(ConfigurationError::DuplicateUnit(name.clone()));
            }
        }
        Ok(())
    }
}

/// All games known to the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub games: Vec<Game>,
}

impl Catalog {
    pub fn new(games: Vec<Game>) -> Self {
        Catalog { games }
    }

    /// Validate every game and reject duplicate game names.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut names: HashSet<&str> = HashSet::new();
        for game in &self.games {
            if !names.insert(&game.name) {
                return Err(ConfigurationError::DuplicateGame(game.name.clone()));
            }
            game.validate()?;
        }
        Ok(())
    }

    /// Look up a game by name, case-insensitively, for drafting.
    pub fn select(&self, name: &str) -> Result<&Game, ConfigurationError> {
        let game = self
            .games
            .iter()
            .find(|g| g.name == name)
            .or_else(|| self.games.iter().find(|g| g.name.eq_ignore_ascii_case(name)))
            .ok_or_else(|| ConfigurationError::UnknownGame(name.to_string()))?;
        if !game.is_playable() {
            return Err(ConfigurationError::EmptyGame(game.name.clone()));
        }
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, rate: u32) -> UnitDef {
        UnitDef {
            name: name.to_string(),
            pick_rate: rate,
        }
    }

    fn skirmish() -> Game {
        Game {
            name: "Skirmish".into(),
            units: vec![unit("Archer", 60), unit("Knight", 80), unit("Scout", 20)],
            free_units: vec!["Peasant".into()],
        }
    }

    #[test]
    fn valid_game_passes() {
        assert!(skirmish().validate().is_ok());
    }

    #[test]
    fn all_unit_names_lists_free_first() {
        assert_eq!(
            skirmish().all_unit_names(),
            vec!["Peasant", "Archer", "Knight", "Scout"]
        );
    }

    #[test]
    fn rejects_rate_out_of_range() {
        let mut game = skirmish();
        game.units.push(unit("Catapult", 0));
        assert!(matches!(
            game.validate(),
            Err(ConfigurationError::RateOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_draftable() {
        let mut game = skirmish();
        game.units.push(unit("Archer", 10));
        assert_eq!(
            game.validate(),
            Err(ConfigurationError::DuplicateUnit("Archer".into()))
        );
    }

    #[test]
    fn rejects_unit_in_both_categories() {
        let mut game = skirmish();
        game.free_units.push("Knight".into());
        assert_eq!(
            game.validate(),
            Err(ConfigurationError::DuplicateUnit("Knight".into()))
        );
    }

    #[test]
    fn empty_game_is_listed_but_not_selectable() {
        let catalog = Catalog::new(vec![
            skirmish(),
            Game {
                name: "Coming Soon".into(),
                units: vec![],
                free_units: vec![],
            },
        ]);
        assert_eq!(catalog.games[1].summary(), "No units configured yet");
        assert_eq!(
            catalog.select("Coming Soon"),
            Err(ConfigurationError::EmptyGame("Coming Soon".into()))
        );
    }

    #[test]
    fn select_matches_case_insensitively() {
        let catalog = Catalog::new(vec![skirmish()]);
        assert_eq!(catalog.select("skirmish").unwrap().name, "Skirmish");
        assert_eq!(
            catalog.select("Chess"),
            Err(ConfigurationError::UnknownGame("Chess".into()))
        );
    }

    #[test]
    fn duplicate_game_names_rejected() {
        let catalog = Catalog::new(vec![skirmish(), skirmish()]);
        assert_eq!(
            catalog.validate(),
            Err(ConfigurationError::DuplicateGame("Skirmish".into()))
        );
    }
}
