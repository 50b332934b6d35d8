//! Snapshot - read-only view of simulation state
//!
//! Reporting layers get a plain, serializable copy of the roster instead of
//! references into the running simulation. Snapshots are one-way: there is
//! no way to turn one back into a simulation.

use crate::models::actor::Actor;
use crate::models::operation::WorryLevel;
use crate::orchestrator::engine::WorryMode;
use serde::Serialize;

/// Complete simulation snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationSnapshot {
    pub rounds_completed: usize,
    pub worry_mode: WorryMode,
    pub modulus: Option<WorryLevel>,
    pub actors: Vec<ActorSnapshot>,
}

impl SimulationSnapshot {
    /// Inspection counts in roster order
    pub fn inspection_counts(&self) -> Vec<u64> {
        self.actors.iter().map(|a| a.inspection_count).collect()
    }
}

/// Actor state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorSnapshot {
    pub id: usize,
    pub items: Vec<WorryLevel>,
    pub operation: String,
    pub divisor: WorryLevel,
    pub if_true: usize,
    pub if_false: usize,
    pub inspection_count: u64,
}

impl From<&Actor> for ActorSnapshot {
    fn from(actor: &Actor) -> Self {
        ActorSnapshot {
            id: actor.id(),
            items: actor.items().to_vec(),
            operation: actor.operation().to_string(),
            divisor: actor.divisor(),
            if_true: actor.if_true(),
            if_false: actor.if_false(),
            inspection_count: actor.inspection_count(),
        }
    }
}
