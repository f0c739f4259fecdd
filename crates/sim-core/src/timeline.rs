//! Script-driven replay: a prelude record, the ordered catalog events, and
//! an epilogue record, with every appended record forwarded to the optional
//! sink as soon as it lands in the log.

use std::fmt;

use contracts::{Theme, END_EVENT, EPILOGUE_LABEL, PRELUDE_LABEL, START_EVENT};

use crate::event::Event;
use crate::sink::{JsonlSink, SinkError};
use crate::world::{World, WorldError};

/// Failure surfaced by a timeline run: a character lookup inside an effect,
/// or a sink append.
#[derive(Debug)]
pub enum RunError {
    World(WorldError),
    Sink(SinkError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::World(err) => write!(f, "world error: {err}"),
            Self::Sink(err) => write!(f, "sink error: {err}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<WorldError> for RunError {
    fn from(value: WorldError) -> Self {
        Self::World(value)
    }
}

impl From<SinkError> for RunError {
    fn from(value: SinkError) -> Self {
        Self::Sink(value)
    }
}

/// Replays a fixed script against an owned world. The runner is oblivious
/// to event outcomes; skips and applications both leave a record, and the
/// script order never changes.
#[derive(Debug)]
pub struct TimelineRunner {
    world: World,
    sink: Option<JsonlSink>,
}

impl TimelineRunner {
    pub fn new(world: World) -> Self {
        Self { world, sink: None }
    }

    pub fn with_sink(world: World, sink: JsonlSink) -> Self {
        Self {
            world,
            sink: Some(sink),
        }
    }

    /// Runs prelude, script, epilogue and returns the mutated world with
    /// its accumulated log.
    pub fn run(mut self, script: &[Event]) -> Result<World, RunError> {
        self.world.log_event(
            PRELUDE_LABEL,
            START_EVENT,
            "Matrix exists; Neo asleep; Machines rule.",
            vec![Theme::ControlSystems],
            Vec::new(),
        );
        self.forward_newest()?;

        for event in script {
            let recorded = self.world.log().len();
            event.run(&mut self.world)?;
            // every run appends exactly one record today; the length check
            // keeps forwarding honest if that ever loosens
            if self.world.log().len() > recorded {
                self.forward_newest()?;
            }
        }

        self.world.log_event(
            EPILOGUE_LABEL,
            END_EVENT,
            "Simulation finished.",
            vec![Theme::HumanMachineSymbiosis],
            Vec::new(),
        );
        self.forward_newest()?;
        Ok(self.world)
    }

    fn forward_newest(&self) -> Result<(), SinkError> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };
        if let Some(record) = self.world.log().last() {
            sink.append(record)?;
        }
        Ok(())
    }
}
