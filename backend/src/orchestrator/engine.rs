//! Simulation Engine
//!
//! Main round loop integrating all components:
//! - Actor turns (inspection, worry relief, divisibility test)
//! - Item delivery (immediate, inside the same round)
//! - Event logging (optional, complete run history)
//!
//! # Architecture
//!
//! ```text
//! For each round r:
//!   For each actor a, in ascending id order:
//!     1. a.take_turn()         -> throws (one per queued item)
//!     2. deliver every throw   -> target queues, before the next actor
//!   Advance round counter
//! ```
//!
//! Delivery order is load-bearing: an item thrown to a higher id is inspected
//! again in the same round, an item thrown to a lower (or the same) id waits
//! for the next round.
//!
//! # Example
//!
//! ```rust
//! use monkey_business_core::orchestrator::{ActorConfig, Simulation, SimulationConfig, WorryMode};
//! use monkey_business_core::models::OperationConfig;
//!
//! let config = SimulationConfig {
//!     worry_mode: WorryMode::Bounded,
//!     rounds: Some(3),
//!     record_events: false,
//!     actors: vec![
//!         ActorConfig {
//!             items: vec![4, 9],
//!             operation: OperationConfig::new("old", "*", "old"),
//!             divisor: 3,
//!             if_true: 1,
//!             if_false: 1,
//!         },
//!         ActorConfig {
//!             items: vec![],
//!             operation: OperationConfig::new("old", "+", "1"),
//!             divisor: 5,
//!             if_true: 0,
//!             if_false: 0,
//!         },
//!     ],
//! };
//!
//! let mut sim = Simulation::new(config).unwrap();
//! sim.run_configured();
//! assert_eq!(sim.rounds_completed(), 3);
//! assert_eq!(sim.monkey_business().unwrap(), 36);
//! ```

use crate::core::round::RoundCounter;
use crate::models::actor::{Actor, WorryRelief, DAMPENING_FACTOR};
use crate::models::event::{Event, EventLog};
use crate::models::operation::{OperationConfig, OperationError, WorryLevel};
use crate::orchestrator::snapshot::{ActorSnapshot, SimulationSnapshot};
use crate::parser::{self, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, trace};

// ============================================================================
// Configuration Types
// ============================================================================

/// Worry-reduction policy for a whole run
///
/// The two modes are different puzzles, not two implementations of one:
/// dampening changes which divisibility tests pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorryMode {
    /// Reduce modulo the product of all divisors after every operation
    Bounded,
    /// Integer-divide by three after every operation
    Dampened,
}

impl WorryMode {
    /// Conventional round count for the mode
    pub fn default_rounds(&self) -> usize {
        match self {
            WorryMode::Bounded => 10_000,
            WorryMode::Dampened => 20,
        }
    }
}

impl fmt::Display for WorryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorryMode::Bounded => write!(f, "bounded"),
            WorryMode::Dampened => write!(f, "dampened"),
        }
    }
}

impl FromStr for WorryMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bounded" => Ok(WorryMode::Bounded),
            "dampened" => Ok(WorryMode::Dampened),
            other => Err(SimulationError::InvalidConfig(format!(
                "unknown worry mode '{}' (expected 'bounded' or 'dampened')",
                other
            ))),
        }
    }
}

/// Complete simulation configuration
///
/// # Fields
///
/// * `actors` - Roster, in visitation order
/// * `worry_mode` - Worry-reduction policy for the run
/// * `rounds` - Round count for `run_configured` (mode default if `None`)
/// * `record_events` - Keep a full event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub actors: Vec<ActorConfig>,

    pub worry_mode: WorryMode,

    #[serde(default)]
    pub rounds: Option<usize>,

    #[serde(default)]
    pub record_events: bool,
}

impl SimulationConfig {
    /// Build a configuration from a parsed roster
    pub fn new(actors: Vec<ActorConfig>, worry_mode: WorryMode) -> Self {
        Self {
            actors,
            worry_mode,
            rounds: None,
            record_events: false,
        }
    }

    /// Load a configuration from its JSON form
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::InvalidConfig(e.to_string()))
    }

    /// Build a configuration from puzzle notes
    pub fn from_notes(notes: &str, worry_mode: WorryMode) -> Result<Self, ParseError> {
        Ok(Self::new(parser::parse_notes(notes)?, worry_mode))
    }

    /// Rounds `run_configured` will execute
    pub fn effective_rounds(&self) -> usize {
        self.rounds.unwrap_or_else(|| self.worry_mode.default_rounds())
    }
}

/// Per-actor configuration
///
/// Raw descriptor as produced by the notes parser or JSON; validated in
/// [`Simulation::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Initial queue, oldest first
    #[serde(default)]
    pub items: Vec<WorryLevel>,

    /// Operation tokens
    pub operation: OperationConfig,

    /// Divisibility test; signed so non-positive values can be reported
    pub divisor: i64,

    /// Target id when divisible
    pub if_true: usize,

    /// Target id when not divisible
    pub if_false: usize,
}

/// Result of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// 1-based round number
    pub round: usize,

    /// Items inspected during this round, across all actors
    pub inspections: u64,
}

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Actor {actor}: {source}")]
    InvalidOperation {
        actor: usize,
        #[source]
        source: OperationError,
    },

    #[error("Actor {actor}: divisor must be positive, got {divisor}")]
    NonPositiveDivisor { actor: usize, divisor: i64 },

    #[error("Actor {actor}: target {target} outside roster of {roster_size} actors")]
    TargetOutOfRange {
        actor: usize,
        target: usize,
        roster_size: usize,
    },

    #[error("Bounded mode needs the product of all divisors to fit in a u64")]
    ModulusOverflow,

    #[error("Monkey business needs at least two actors, roster has {found}")]
    InsufficientActors { found: usize },

    #[error("Monkey business overflowed u64")]
    MetricOverflow,
}

// ============================================================================
// Simulation
// ============================================================================

/// Main simulation driving the round loop
///
/// The Simulation owns the roster and is the only code that touches a queue
/// other than during the owning actor's own turn.
///
/// # Determinism
///
/// There is no randomness and no concurrency. Same config = identical
/// results.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Roster in visitation order; `roster[i].id() == i`
    roster: Vec<Actor>,

    /// Product of all divisors; `None` if it overflows (dampened mode only)
    modulus: Option<WorryLevel>,

    /// Worry-reduction policy
    worry_mode: WorryMode,

    /// Reduction handed to every turn, fixed by the mode
    relief: WorryRelief,

    /// Round bookkeeping
    rounds: RoundCounter,

    /// Rounds executed by `run_configured`
    configured_rounds: usize,

    /// Event log, when recording is enabled
    event_log: Option<EventLog>,
}

impl Simulation {
    /// Create a simulation from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Simulation)` - Roster validated and built
    /// * `Err(SimulationError)` - First invalid descriptor found, in roster order,
    ///   or `ModulusOverflow` for a bounded roster whose divisor product does
    ///   not fit in a `u64`
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let roster_size = config.actors.len();
        let configured_rounds = config.effective_rounds();

        let mut roster = Vec::with_capacity(roster_size);
        for (id, actor_config) in config.actors.into_iter().enumerate() {
            roster.push(Self::build_actor(id, actor_config, roster_size)?);
        }

        let modulus = roster
            .iter()
            .try_fold(1 as WorryLevel, |acc, actor| acc.checked_mul(actor.divisor()));

        let relief = match config.worry_mode {
            WorryMode::Bounded => WorryRelief::Modulo(modulus.ok_or(SimulationError::ModulusOverflow)?),
            WorryMode::Dampened => WorryRelief::Dampen(DAMPENING_FACTOR),
        };

        info!(
            actors = roster_size,
            modulus = ?modulus,
            mode = %config.worry_mode,
            rounds = configured_rounds,
            "simulation initialized"
        );

        Ok(Self {
            roster,
            modulus,
            worry_mode: config.worry_mode,
            relief,
            rounds: RoundCounter::new(),
            configured_rounds,
            event_log: config.record_events.then(EventLog::new),
        })
    }

    fn build_actor(id: usize, config: ActorConfig, roster_size: usize) -> Result<Actor, SimulationError> {
        let operation = config
            .operation
            .validate()
            .map_err(|source| SimulationError::InvalidOperation { actor: id, source })?;

        if config.divisor <= 0 {
            return Err(SimulationError::NonPositiveDivisor {
                actor: id,
                divisor: config.divisor,
            });
        }

        for target in [config.if_true, config.if_false] {
            if target >= roster_size {
                return Err(SimulationError::TargetOutOfRange {
                    actor: id,
                    target,
                    roster_size,
                });
            }
        }

        Ok(Actor::new(
            id,
            config.items,
            operation,
            config.divisor as WorryLevel,
            config.if_true,
            config.if_false,
        ))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn actors(&self) -> &[Actor] {
        &self.roster
    }

    pub fn actor(&self, id: usize) -> Option<&Actor> {
        self.roster.get(id)
    }

    pub fn num_actors(&self) -> usize {
        self.roster.len()
    }

    /// Bounding modulus (product of all divisors)
    ///
    /// Always `Some` in bounded mode. A dampened roster never reduces by the
    /// modulus, so there it is `None` when the product overflows a `u64`.
    pub fn modulus(&self) -> Option<WorryLevel> {
        self.modulus
    }

    pub fn worry_mode(&self) -> WorryMode {
        self.worry_mode
    }

    pub fn rounds_completed(&self) -> usize {
        self.rounds.completed()
    }

    /// True until the first round has run
    pub fn is_ready(&self) -> bool {
        self.rounds.is_ready()
    }

    pub fn configured_rounds(&self) -> usize {
        self.configured_rounds
    }

    /// Inspection counts in roster order
    pub fn inspection_counts(&self) -> Vec<u64> {
        self.roster.iter().map(Actor::inspection_count).collect()
    }

    /// Items currently queued across the roster
    pub fn total_items(&self) -> usize {
        self.roster.iter().map(|a| a.items().len()).sum()
    }

    /// Event log, if recording was enabled
    pub fn event_log(&self) -> Option<&EventLog> {
        self.event_log.as_ref()
    }

    /// Read-only copy of the current state
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            rounds_completed: self.rounds.completed(),
            worry_mode: self.worry_mode,
            modulus: self.modulus,
            actors: self.roster.iter().map(ActorSnapshot::from).collect(),
        }
    }

    // ========================================================================
    // Round Loop
    // ========================================================================

    /// Execute one round
    ///
    /// Visits actors in ascending id order. Every throw of a turn is delivered
    /// before the next actor is visited.
    ///
    /// # Panics
    ///
    /// In dampened mode, if an operation drives a worry level past `u64::MAX`
    /// even after dampening (for example `old * old` applied to the same item
    /// round after round). Bounded mode cannot overflow.
    pub fn run_round(&mut self) -> RoundResult {
        let round = self.rounds.current_round();
        let relief = self.relief;
        let mut inspections = 0;

        for id in 0..self.roster.len() {
            let throws = self.roster[id].take_turn(relief);
            inspections += throws.len() as u64;

            for throw in throws {
                trace!(
                    round,
                    from = throw.from,
                    to = throw.target,
                    worry = throw.worry,
                    "item thrown"
                );
                self.roster[throw.target].catch_item(throw.worry);

                if let Some(log) = self.event_log.as_mut() {
                    log.log(Event::Throw {
                        round,
                        from: throw.from,
                        to: throw.target,
                        worry: throw.worry,
                        divisible: throw.divisible,
                    });
                }
            }
        }

        if let Some(log) = self.event_log.as_mut() {
            log.log(Event::RoundComplete { round, inspections });
        }
        self.rounds.advance();

        debug!(round, inspections, "round complete");

        RoundResult { round, inspections }
    }

    /// Execute exactly `total_rounds` rounds
    ///
    /// Returns the number of inspections performed across those rounds.
    ///
    /// # Panics
    ///
    /// Under the same dampened-mode overflow as [`Simulation::run_round`].
    pub fn run(&mut self, total_rounds: usize) -> u64 {
        (0..total_rounds).map(|_| self.run_round().inspections).sum()
    }

    /// Execute the configured number of rounds
    ///
    /// # Panics
    ///
    /// See [`Simulation::run_round`].
    pub fn run_configured(&mut self) -> u64 {
        self.run(self.configured_rounds)
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Product of the two largest inspection counts
    pub fn monkey_business(&self) -> Result<u64, SimulationError> {
        let (first, second) = self.top_two_counts()?;
        first
            .checked_mul(second)
            .ok_or(SimulationError::MetricOverflow)
    }

    fn top_two_counts(&self) -> Result<(u64, u64), SimulationError> {
        if self.roster.len() < 2 {
            return Err(SimulationError::InsufficientActors {
                found: self.roster.len(),
            });
        }

        let mut first = 0;
        let mut second = 0;
        for count in self.roster.iter().map(Actor::inspection_count) {
            if count > first {
                second = first;
                first = count;
            } else if count > second {
                second = count;
            }
        }
        Ok((first, second))
    }
}
