//! The single mutable aggregate of simulation state: scalar metrics, flags,
//! the character registry, and the append-only record log.

use std::collections::BTreeMap;
use std::fmt;

mod init;
mod snapshot;

use contracts::{Character, LogRecord, Theme};

/// A lookup named a character the registry does not hold.
#[derive(Debug)]
pub enum WorldError {
    UnknownCharacter(String),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCharacter(name) => write!(f, "unknown character: {name}"),
        }
    }
}

impl std::error::Error for WorldError {}

/// World state threaded explicitly through every event and runner.
///
/// Metrics and flags are public; event effects mutate them directly. The
/// registry and the log stay private: characters are reached through the
/// fallible lookups, and records enter the log only through [`log_event`].
///
/// [`log_event`]: World::log_event
#[derive(Debug, Clone)]
pub struct World {
    pub matrix_control: f64,
    pub zion_defense: f64,
    pub smith_factor: f64,
    pub humans_free: i64,
    pub humans_enslaved: i64,
    pub peace: bool,
    pub prophecy_valid: bool,
    pub neo_awake: bool,
    pub neo_alive: bool,
    pub trinity_alive: bool,
    pub zion_alive: bool,
    characters: BTreeMap<String, Character>,
    log: Vec<LogRecord>,
}

impl World {
    /// Registers a character; re-adding a name replaces the earlier entry.
    pub fn add(&mut self, character: Character) {
        self.characters.insert(character.name.clone(), character);
    }

    pub fn character(&self, name: &str) -> Result<&Character, WorldError> {
        self.characters
            .get(name)
            .ok_or_else(|| WorldError::UnknownCharacter(name.to_string()))
    }

    pub fn character_mut(&mut self, name: &str) -> Result<&mut Character, WorldError> {
        self.characters
            .get_mut(name)
            .ok_or_else(|| WorldError::UnknownCharacter(name.to_string()))
    }

    pub fn log(&self) -> &[LogRecord] {
        &self.log
    }

    /// Appends one record carrying a snapshot of the current state. Every
    /// record in the log passes through here.
    pub fn log_event(
        &mut self,
        movie: &str,
        event: &str,
        desc: &str,
        themes: Vec<Theme>,
        myth: Vec<String>,
    ) {
        let snapshot = self.snapshot();
        self.log.push(LogRecord {
            movie: movie.to_string(),
            event: event.to_string(),
            desc: desc.to_string(),
            themes,
            myth,
            snapshot,
        });
    }
}
