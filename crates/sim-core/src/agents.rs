//! Per-round decision loop. Three scripted decision-makers propose catalog
//! events against the live world; proposals are collected first, then
//! applied in collection order, with one intra-round chain (an applied
//! negotiation forces an immediate final fight while Smith saturation is
//! high) and a peace check closing every round.

use contracts::{END_EVENT, EPILOGUE_LABEL, PRELUDE_LABEL, START_EVENT, TICK_LABEL};

use crate::catalog;
use crate::event::Event;
use crate::world::{World, WorldError};

/// Round cap when the caller does not override it.
pub const DEFAULT_MAX_TICKS: u64 = 12;
/// Bonus for the fight chained off an accepted negotiation.
const NEGOTIATED_FIGHT_BONUS: i64 = 8;
/// Smith saturation at which an applied negotiation forces the fight.
const NEGOTIATION_FIGHT_THRESHOLD: f64 = 0.6;

fn mix_seed(seed: u64, salt: u64) -> u64 {
    let mut value = seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    value ^= value.rotate_left(29);
    value = value.wrapping_mul(0x517C_C1B7_2722_0A95);
    value ^ (value >> 31)
}

/// Deterministic decision stream in the splitmix style. The built-in
/// policies never draw from it; the stream exists so randomized policies
/// can slot in without changing agent construction.
#[derive(Debug, Clone)]
pub struct AgentRng {
    state: u64,
}

impl AgentRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut mixed = self.state;
        mixed ^= mixed >> 30;
        mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
        mixed ^= mixed >> 27;
        mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
        mixed ^ (mixed >> 31)
    }
}

/// Which fixed policy drives a decision-maker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Neo,
    Smith,
    Machines,
}

/// A scripted decision-maker: a display name, a fixed policy, and a held
/// random stream.
#[derive(Debug)]
pub struct Agent {
    pub name: String,
    pub rng: AgentRng,
    kind: AgentKind,
}

impl Agent {
    pub fn new(name: impl Into<String>, kind: AgentKind, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: AgentRng::new(mix_seed(seed, kind as u64)),
            kind,
        }
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    /// Proposes at most one catalog event for this round. Policies are pure
    /// functions of the observed world; the rng stays untouched.
    pub fn propose(&mut self, world: &World) -> Result<Option<Event>, WorldError> {
        match self.kind {
            AgentKind::Neo => Self::neo_policy(world),
            AgentKind::Smith => Ok(Some(Self::smith_policy(world))),
            AgentKind::Machines => Ok(Self::machines_policy(world)),
        }
    }

    /// Wake up, get strong, then either force the endgame or keep bending
    /// the rules.
    fn neo_policy(world: &World) -> Result<Option<Event>, WorldError> {
        if !world.neo_awake {
            return Ok(Some(catalog::awaken_neo()));
        }
        if world.character("Neo")?.power < 60 {
            return Ok(Some(catalog::train_neo()));
        }
        if world.smith_factor > 0.6 {
            return Ok(Some(catalog::machines_negotiate()));
        }
        Ok(Some(catalog::neo_ascends()))
    }

    /// Replicate until saturated, then go for the Oracle.
    fn smith_policy(world: &World) -> Event {
        if world.smith_factor < 0.6 {
            catalog::smith_spreads(0.25)
        } else {
            catalog::smith_copies_oracle()
        }
    }

    /// Negotiate once Smith is the bigger threat; otherwise grind Zion
    /// down, or stand down when nothing is left to besiege.
    fn machines_policy(world: &World) -> Option<Event> {
        if world.smith_factor >= 0.75 {
            return Some(catalog::machines_negotiate());
        }
        if world.zion_alive && world.zion_defense > 0.0 {
            return Some(catalog::zion_assault(0.2));
        }
        None
    }
}

/// Drives rounds of propose/apply until peace, Zion's fall, or the cap.
#[derive(Debug)]
pub struct AgentRunner {
    world: World,
    pub rng: AgentRng,
    max_ticks: u64,
}

impl AgentRunner {
    pub fn new(world: World, seed: u64, max_ticks: u64) -> Self {
        Self {
            world,
            rng: AgentRng::new(seed),
            max_ticks,
        }
    }

    /// Runs up to `max_ticks` rounds and returns the mutated world.
    pub fn run(mut self, agents: &mut [Agent]) -> Result<World, WorldError> {
        self.world.log_event(
            PRELUDE_LABEL,
            START_EVENT,
            "Agent mode: Neo, Smith, Machines act per tick.",
            Vec::new(),
            Vec::new(),
        );

        for tick in 1..=self.max_ticks {
            if !self.step(tick, agents)? {
                break;
            }
        }

        self.world.log_event(
            EPILOGUE_LABEL,
            END_EVENT,
            "Agent simulation finished.",
            Vec::new(),
            Vec::new(),
        );
        Ok(self.world)
    }

    /// One decision round. Returns false once a terminal condition holds.
    fn step(&mut self, tick: u64, agents: &mut [Agent]) -> Result<bool, WorldError> {
        self.world.log_event(
            TICK_LABEL,
            &format!("T{tick}"),
            "Decision phase.",
            Vec::new(),
            Vec::new(),
        );

        // 1. Collect proposals against the round's starting state; agents
        // that decline occupy no slot.
        let mut proposals: Vec<Event> = Vec::new();
        for agent in agents.iter_mut() {
            if let Some(event) = agent.propose(&self.world)? {
                proposals.push(event);
            }
        }

        // 2. Apply in collection order. An applied negotiation chains into
        // an immediate fight while Smith saturation is still high.
        for event in &proposals {
            event.run(&mut self.world)?;
            if event.name.starts_with("Machines negotiate")
                && self.world.smith_factor >= NEGOTIATION_FIGHT_THRESHOLD
            {
                catalog::final_fight(NEGOTIATED_FIGHT_BONUS).run(&mut self.world)?;
            }
        }

        // 3. The peace check closes every round.
        catalog::peace_accord().run(&mut self.world)?;

        Ok(!(self.world.peace || !self.world.zion_alive))
    }
}
