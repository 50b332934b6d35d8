//! Monkey Business Core - Rust Engine
//!
//! Round-based item-routing simulator with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Round bookkeeping
//! - **models**: Domain types (Actor, Operation, Event)
//! - **orchestrator**: Configuration, round loop and snapshots
//! - **parser**: Text notes to configuration
//!
//! # Critical Invariants
//!
//! 1. Actors take turns strictly in roster order; throws are delivered
//!    before the next actor moves
//! 2. The bounding modulus is a multiple of every divisor, so bounded
//!    reduction never changes a routing decision
//! 3. No randomness: same configuration, same result

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod parser;

// Re-exports for convenience
pub use crate::core::round::RoundCounter;
pub use models::{
    actor::{Actor, Throw, WorryRelief},
    event::{Event, EventLog},
    operation::{Operation, OperationConfig, OperationError, WorryLevel},
};
pub use orchestrator::{
    ActorConfig, ActorSnapshot, RoundResult, Simulation, SimulationConfig, SimulationError,
    SimulationSnapshot, WorryMode,
};
pub use parser::{parse_notes, ParseError};
