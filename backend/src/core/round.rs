//! Round bookkeeping for the simulation
//!
//! The simulation advances in discrete rounds. A round is one pass over the
//! whole roster in id order. This module only counts them; it never decides
//! when a round happens.

use serde::{Deserialize, Serialize};

/// Counts completed rounds
///
/// # Example
/// ```
/// use monkey_business_core::RoundCounter;
///
/// let mut rounds = RoundCounter::new();
/// assert_eq!(rounds.completed(), 0);
/// assert!(rounds.is_ready());
///
/// rounds.advance();
/// assert_eq!(rounds.completed(), 1);
/// assert_eq!(rounds.current_round(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCounter {
    /// Rounds fully executed since construction
    completed: usize,
}

impl RoundCounter {
    /// Create a counter with no completed rounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one more round as completed
    pub fn advance(&mut self) {
        self.completed += 1;
    }

    /// Number of rounds completed so far
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// 1-based number of the round that would run next
    ///
    /// Used for event tagging and log output, matching how rounds are
    /// usually reported ("Round 1", "Round 2", ...).
    pub fn current_round(&self) -> usize {
        self.completed + 1
    }

    /// True until the first round has been executed
    pub fn is_ready(&self) -> bool {
        self.completed == 0
    }
}
