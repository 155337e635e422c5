// Pick rate table: desirability weights for draftable units.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Lowest accepted pick rate.
pub const MIN_PICK_RATE: u32 = 1;
/// Highest accepted pick rate.
pub const MAX_PICK_RATE: u32 = 100;
/// Weight given to a unit that has no entry in the table.
pub const FALLBACK_WEIGHT: u32 = 1;

/// Maps each draftable unit name to an integer weight in
/// `MIN_PICK_RATE..=MAX_PICK_RATE`.
///
/// The table is built during setup and handed to the engine by value, so it
/// cannot change once a draft has started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRateTable {
    rates: BTreeMap<String, u32>,
}

impl PickRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rate for `unit`, rejecting weights outside 1..=100.
    pub fn set(&mut self, unit: impl Into<String>, rate: u32) -> Result<(), ConfigurationError> {
        let unit = unit.into();
        validate_rate(&unit, rate)?;
        self.rates.insert(unit, rate);
        Ok(())
    }

    /// Build a table from `(unit, rate)` pairs. A repeated unit is an error.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (unit, rate) in pairs {
            let unit = unit.into();
            if table.rates.contains_key(&unit) {
                return Err(ConfigurationError::DuplicateUnit(unit));
            }
            table.set(unit, rate)?;
        }
        Ok(table)
    }

    pub fn get(&self, unit: &str) -> Option<u32> {
        self.rates.get(unit).copied()
    }

    /// Effective selection weight: the table entry, or `FALLBACK_WEIGHT`.
    pub fn weight(&self, unit: &str) -> u32 {
        self.get(unit).unwrap_or(FALLBACK_WEIGHT)
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.rates.contains_key(unit)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterate entries in unit-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

pub(crate) fn validate_rate(unit: &str, rate: u32) -> Result<(), ConfigurationError> {
    if (MIN_PICK_RATE..=MAX_PICK_RATE).contains(&rate) {
        Ok(())
    } else {
        Err(ConfigurationError::RateOutOfRange {
            unit: unit.to_string(),
            rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_accepts_bounds() {
        let mut table = PickRateTable::new();
        table.set("Archer", 1).unwrap();
        table.set("Knight", 100).unwrap();
        assert_eq!(table.get("Archer"), Some(1));
        assert_eq!(table.get("Knight"), Some(100));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn set_rejects_out_of_range() {
        let mut table = PickRateTable::new();
        assert_eq!(
            table.set("Archer", 0),
            Err(ConfigurationError::RateOutOfRange {
                unit: "Archer".into(),
                rate: 0
            })
        );
        assert!(table.set("Archer", 101).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn set_replaces_existing_rate() {
        let mut table = PickRateTable::new();
        table.set("Archer", 10).unwrap();
        table.set("Archer", 60).unwrap();
        assert_eq!(table.get("Archer"), Some(60));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn weight_falls_back_for_missing_unit() {
        let table = PickRateTable::from_pairs([("Archer", 40)]).unwrap();
        assert_eq!(table.weight("Archer"), 40);
        assert_eq!(table.weight("Ghost"), FALLBACK_WEIGHT);
    }

    #[test]
    fn from_pairs_rejects_duplicates() {
        let err = PickRateTable::from_pairs([("Archer", 40), ("Archer", 50)]).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateUnit("Archer".into()));
    }

    #[test]
    fn iter_is_name_ordered() {
        let table = PickRateTable::from_pairs([("Zealot", 5), ("Archer", 7)]).unwrap();
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Archer", "Zealot"]);
    }
}
