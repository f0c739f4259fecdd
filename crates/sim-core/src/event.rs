//! The event abstraction: a named, optionally guarded, state-mutating unit
//! with narrative metadata. Running an event against a world appends exactly
//! one log record, whether it applies or skips.

use std::collections::BTreeSet;
use std::fmt;

use contracts::{Movie, Theme};

use crate::world::{World, WorldError};

/// Marker prefixed to the event name on the skip record.
pub const SKIP_PREFIX: &str = "[SKIP] ";

/// Applicability check evaluated against the world before the effect.
pub type Precondition = Box<dyn Fn(&World) -> bool>;
/// State mutation applied when the precondition holds. Effects are the only
/// place world state changes during a run.
pub type Effect = Box<dyn Fn(&mut World) -> Result<(), WorldError>>;

/// A plot beat: identity and metadata plus the guard/effect pair baked in by
/// its catalog constructor.
pub struct Event {
    pub movie: Movie,
    pub name: &'static str,
    pub desc: String,
    pub themes: BTreeSet<Theme>,
    pub myth: Vec<String>,
    pub pre: Option<Precondition>,
    pub effect: Option<Effect>,
}

impl Event {
    /// Executes the event against the world.
    ///
    /// A failed precondition logs the skip record and returns `Ok(false)`
    /// without touching state. Otherwise the effect (if any) runs first,
    /// then the event record is logged, so its snapshot reflects the
    /// mutation. Returns `Ok(true)` when the event applied.
    pub fn run(&self, world: &mut World) -> Result<bool, WorldError> {
        if let Some(pre) = &self.pre {
            if !pre(world) {
                world.log_event(
                    self.movie.as_str(),
                    &format!("{SKIP_PREFIX}{}", self.name),
                    "Precondition failed",
                    self.theme_list(),
                    self.myth.clone(),
                );
                return Ok(false);
            }
        }
        if let Some(effect) = &self.effect {
            effect(world)?;
        }
        world.log_event(
            self.movie.as_str(),
            self.name,
            &self.desc,
            self.theme_list(),
            self.myth.clone(),
        );
        Ok(true)
    }

    fn theme_list(&self) -> Vec<Theme> {
        self.themes.iter().copied().collect()
    }
}

// Closures block a derive; keep Debug usable for test output.
impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("movie", &self.movie)
            .field("name", &self.name)
            .field("desc", &self.desc)
            .field("themes", &self.themes)
            .field("myth", &self.myth)
            .field("pre", &self.pre.is_some())
            .field("effect", &self.effect.is_some())
            .finish()
    }
}
