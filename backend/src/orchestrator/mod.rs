//! Orchestrator - main simulation loop
//!
//! See `engine.rs` for the round loop and `snapshot.rs` for read-only views.

pub mod engine;
pub mod snapshot;

// Re-export main types for convenience
pub use engine::{
    ActorConfig, RoundResult, Simulation, SimulationConfig, SimulationError, WorryMode,
};
pub use snapshot::{ActorSnapshot, SimulationSnapshot};
