use rand::Rng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive bounds for every character stat.
pub const STAT_MIN: u8 = 1;
pub const STAT_MAX: u8 = 10;

/// Most parents a character can record.
pub const MAX_PARENTS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("given name cannot be empty")]
    EmptyGivenName,

    #[error("stat {stat} out of range: {value} (expected {STAT_MIN}..={STAT_MAX})")]
    StatOutOfRange { stat: &'static str, value: u8 },

    #[error("character lists {0} parents (max {MAX_PARENTS})")]
    TooManyParents(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Uniform male/female draw. Generation never produces `Other`; it only
    /// enters a graph through explicit construction.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        if rng.random_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

/// The five bounded character attributes, each in [`STAT_MIN`]..=[`STAT_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub diplomacy: u8,
    pub martial: u8,
    pub stewardship: u8,
    pub intrigue: u8,
    pub learning: u8,
}

impl Stats {
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self {
            diplomacy: rng.random_range(STAT_MIN..=STAT_MAX),
            martial: rng.random_range(STAT_MIN..=STAT_MAX),
            stewardship: rng.random_range(STAT_MIN..=STAT_MAX),
            intrigue: rng.random_range(STAT_MIN..=STAT_MAX),
            learning: rng.random_range(STAT_MIN..=STAT_MAX),
        }
    }

    /// Reports the first out-of-range stat, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (stat, value) in [
            ("diplomacy", self.diplomacy),
            ("martial", self.martial),
            ("stewardship", self.stewardship),
            ("intrigue", self.intrigue),
            ("learning", self.learning),
        ] {
            if !(STAT_MIN..=STAT_MAX).contains(&value) {
                return Err(ValidationError::StatOutOfRange { stat, value });
            }
        }
        Ok(())
    }
}

/// A node in the dynasty graph.
///
/// Relation fields reference other characters by ID. `spouse_ids` is kept
/// symmetric and `parent_ids`/`child_ids` consistent in direction by the
/// graph operations in [`super::graph`]; the schema itself carries no
/// behavior beyond validation.
///
/// Serializes with camelCase field names — the wire/save shape is the one
/// the surrounding app persists under its `dynasty` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u64,
    pub given_name: String,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub birth_year: Option<i32>,
    /// `None` while `alive` is true.
    #[serde(default)]
    pub death_year: Option<i32>,
    pub gender: Gender,
    pub parent_ids: Vec<u64>,
    pub spouse_ids: Vec<u64>,
    pub child_ids: Vec<u64>,
    pub stats: Stats,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub titles: Vec<String>,
    pub alive: bool,
}

impl Character {
    /// Checks the constraints a character must satisfy before entering a
    /// graph: non-empty given name, stats in range, at most two parents.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.given_name.is_empty() {
            return Err(ValidationError::EmptyGivenName);
        }
        self.stats.validate()?;
        if self.parent_ids.len() > MAX_PARENTS {
            return Err(ValidationError::TooManyParents(self.parent_ids.len()));
        }
        Ok(())
    }
}

/// Caller-supplied field overrides for child construction. Any field left
/// `None` is defaulted (randomized where the schema calls for it).
#[derive(Debug, Clone, Default)]
pub struct CharacterOverrides {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub birth_year: Option<i32>,
    pub gender: Option<Gender>,
    pub stats: Option<Stats>,
    pub traits: Option<Vec<String>>,
    pub titles: Option<Vec<String>>,
}
