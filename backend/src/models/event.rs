//! Event logging for simulation replay and auditing.
//!
//! Captures every inspection and every delivery made during a run, tagged
//! with the (1-based) round in which it happened. Events enable:
//! - Determinism checks (two runs must produce identical logs)
//! - Debugging (follow a single item around the roster)
//! - Conservation checks (one throw per inspection)
//!
//! Recording is opt-in: a 10,000-round run produces millions of events.
//!
//! # Example
//!
//! ```rust
//! use monkey_business_core::models::event::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::Throw { round: 1, from: 0, to: 3, worry: 500, divisible: false });
//! log.log(Event::RoundComplete { round: 1, inspections: 1 });
//!
//! assert_eq!(log.events_at_round(1).len(), 2);
//! assert_eq!(log.events_for_actor(3).len(), 1);
//! ```

use crate::models::operation::WorryLevel;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Item inspected and delivered to its target queue
    Throw {
        round: usize,
        from: usize,
        to: usize,
        worry: WorryLevel,
        divisible: bool,
    },

    /// All actors have taken their turn
    RoundComplete { round: usize, inspections: u64 },
}

impl Event {
    /// Round this event belongs to
    pub fn round(&self) -> usize {
        match self {
            Event::Throw { round, .. } => *round,
            Event::RoundComplete { round, .. } => *round,
        }
    }

    /// Event type as string (for filtering)
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Throw { .. } => "throw",
            Event::RoundComplete { .. } => "round_complete",
        }
    }

    /// True if the actor threw or received the item
    pub fn involves_actor(&self, actor: usize) -> bool {
        match self {
            Event::Throw { from, to, .. } => *from == actor || *to == actor,
            Event::RoundComplete { .. } => false,
        }
    }
}

/// Append-only log of simulation events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific round
    pub fn events_at_round(&self, round: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.round() == round).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events in which an actor threw or caught an item
    pub fn events_for_actor(&self, actor: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.involves_actor(actor))
            .collect()
    }

    /// Throws made by one actor, in order
    pub fn throws_from(&self, actor: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Throw { from, .. } if *from == actor))
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
