//! Trilogy simulation engine: world state, the fixed event catalog, and the
//! two runners that drive it.
//!
//! Data flows one way: catalog constructors build [`Event`]s, a runner
//! executes them against a [`World`], every execution appends a log record,
//! and the sink/report layers consume the log without touching state.

pub mod agents;
pub mod catalog;
pub mod event;
pub mod report;
pub mod sink;
pub mod timeline;
pub mod world;

pub use agents::{Agent, AgentKind, AgentRng, AgentRunner, DEFAULT_MAX_TICKS};
pub use event::{Effect, Event, Precondition, SKIP_PREFIX};
pub use sink::{JsonlSink, SinkError};
pub use timeline::{RunError, TimelineRunner};
pub use world::{World, WorldError};
