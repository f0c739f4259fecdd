//! Shared vocabulary for the trilogy simulation: closed enums, the scenario
//! configuration, world snapshots, and the log record that crosses the
//! engine/CLI boundary and the JSONL sink.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pseudo-movie bucket framing the start of every run.
pub const PRELUDE_LABEL: &str = "Prelude";
/// Pseudo-movie bucket for agent-mode round markers.
pub const TICK_LABEL: &str = "Tick";
/// Pseudo-movie bucket framing the end of every run.
pub const EPILOGUE_LABEL: &str = "Epilogue";
/// Event name of the opening framing record.
pub const START_EVENT: &str = "Start";
/// Event name of the closing framing record.
pub const END_EVENT: &str = "End";

/// The three films, in release order. The wire form is the display label,
/// so serialized records read like the rendered timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Movie {
    #[serde(rename = "Matrix (1999)")]
    Matrix,
    #[serde(rename = "Matrix Reloaded (2003)")]
    Reloaded,
    #[serde(rename = "Matrix Revolutions (2003)")]
    Revolutions,
}

impl Movie {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Matrix => "Matrix (1999)",
            Self::Reloaded => "Matrix Reloaded (2003)",
            Self::Revolutions => "Matrix Revolutions (2003)",
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a character currently stands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Realm {
    Matrix,
    Real,
    /// Between-worlds, the Mobil Ave train station.
    Liminal,
}

/// Allegiance of a character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Human,
    Machine,
    Program,
}

/// Narrative tags attached to events; the closed set the whole catalog
/// draws from. `Ord` follows declaration order, wire names are uppercase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Theme {
    RealityIllusion,
    FreeWill,
    Determinism,
    ControlSystems,
    LoveSacrifice,
    HumanMachineSymbiosis,
    SmithShadow,
    MessianicGnosis,
    UnderworldPassages,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RealityIllusion => "REALITY_ILLUSION",
            Self::FreeWill => "FREE_WILL",
            Self::Determinism => "DETERMINISM",
            Self::ControlSystems => "CONTROL_SYSTEMS",
            Self::LoveSacrifice => "LOVE_SACRIFICE",
            Self::HumanMachineSymbiosis => "HUMAN_MACHINE_SYMBIOSIS",
            Self::SmithShadow => "SMITH_SHADOW",
            Self::MessianicGnosis => "MESSIANIC_GNOSIS",
            Self::UnderworldPassages => "UNDERWORLD_PASSAGES",
        }
    }

    /// Parses a wire name; input is trimmed and case-folded first.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "REALITY_ILLUSION" => Some(Self::RealityIllusion),
            "FREE_WILL" => Some(Self::FreeWill),
            "DETERMINISM" => Some(Self::Determinism),
            "CONTROL_SYSTEMS" => Some(Self::ControlSystems),
            "LOVE_SACRIFICE" => Some(Self::LoveSacrifice),
            "HUMAN_MACHINE_SYMBIOSIS" => Some(Self::HumanMachineSymbiosis),
            "SMITH_SHADOW" => Some(Self::SmithShadow),
            "MESSIANIC_GNOSIS" => Some(Self::MessianicGnosis),
            "UNDERWORLD_PASSAGES" => Some(Self::UnderworldPassages),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The Architect's terms: sacrifice the cycle for Trinity, or reset it
/// for Zion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArchitectChoice {
    Trinity,
    Zion,
}

impl ArchitectChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trinity => "TRINITY",
            Self::Zion => "ZION",
        }
    }

    /// Parses the uppercase wire name; input is trimmed and case-folded.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "TRINITY" => Some(Self::Trinity),
            "ZION" => Some(Self::Zion),
            _ => None,
        }
    }
}

impl fmt::Display for ArchitectChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named participant tracked by the world registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub faction: Faction,
    pub realm: Realm,
    pub alive: bool,
    pub power: i64,
}

impl Character {
    /// New living character; power is an abstract 0-100-ish scale.
    pub fn new(name: impl Into<String>, faction: Faction, realm: Realm, power: i64) -> Self {
        Self {
            name: name.into(),
            faction,
            realm,
            alive: true,
            power,
        }
    }
}

/// Value copy of the world's scalar state, captured once per log record.
///
/// Field order is the wire order. The three continuous metrics are rounded
/// to 3 decimals at capture time so logs stay readable and comparable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub matrix_control: f64,
    pub zion_defense: f64,
    pub smith_factor: f64,
    pub humans_free: i64,
    pub humans_enslaved: i64,
    pub neo_awake: bool,
    pub neo_alive: bool,
    pub trinity_alive: bool,
    pub zion_alive: bool,
    pub peace: bool,
    pub prophecy_valid: bool,
}

impl fmt::Display for WorldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// One append-only log entry: event identity, narrative metadata, and the
/// snapshot taken at the moment of recording.
///
/// The movie field is a plain label rather than [`Movie`] because framing
/// records use the pseudo-buckets (`Prelude`, `Tick`, `Epilogue`) alongside
/// the three film labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    pub movie: String,
    pub event: String,
    pub desc: String,
    pub themes: Vec<Theme>,
    pub myth: Vec<String>,
    pub snapshot: WorldSnapshot,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let themes: Vec<&str> = self.themes.iter().map(|theme| theme.as_str()).collect();
        write!(
            f,
            "- {}: {} | themes={:?} myth={:?} | snapshot={}",
            self.event, self.desc, themes, self.myth, self.snapshot
        )
    }
}

/// Knobs that parameterize catalog construction for a timeline run.
/// `Default` is the canon scenario; named presets live with the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub architect_choice: ArchitectChoice,
    pub smith_rate: f64,
    pub zion_intensity: f64,
    pub final_bonus: i64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            architect_choice: ArchitectChoice::Trinity,
            smith_rate: 0.30,
            zion_intensity: 0.25,
            final_bonus: 8,
        }
    }
}
