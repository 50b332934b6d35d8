//! Actor (Monkey) model
//!
//! Represents one participant in the item-routing simulation.
//! Each actor has:
//! - An ordered queue of items (worry levels), drained in FIFO order
//! - An operation applied to every item it inspects
//! - A divisibility test choosing between two target actors
//! - An inspection counter
//!
//! # Turn Semantics
//!
//! A turn drains the *whole* queue. Every item is inspected, relieved and
//! tested, and one [`Throw`] is emitted per item. The actor never delivers
//! anything itself; the simulation owns delivery, so a self-targeted throw
//! lands back in this queue only after the turn has finished.
//!
//! Actors refer to each other only by roster id.

use crate::models::operation::{Operation, WorryLevel};

/// Divisor used by [`WorryRelief::Dampen`] in the dampened worry mode
pub const DAMPENING_FACTOR: WorryLevel = 3;

/// Reduction applied to every worry level after the operation and before the
/// divisibility test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorryRelief {
    /// Reduce modulo the product of all divisors; preserves every test outcome
    Modulo(WorryLevel),
    /// Integer-divide by a fixed factor
    Dampen(WorryLevel),
}

impl WorryRelief {
    /// Apply the reduction to a freshly transformed worry level
    pub fn relieve(&self, worry: u128) -> u128 {
        match *self {
            WorryRelief::Modulo(modulus) => worry % modulus as u128,
            WorryRelief::Dampen(factor) => worry / factor as u128,
        }
    }
}

/// Routing decision produced for one inspected item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throw {
    /// Actor that inspected the item
    pub from: usize,
    /// Actor that receives the item
    pub target: usize,
    /// Worry level after operation and relief
    pub worry: WorryLevel,
    /// Outcome of the divisibility test
    pub divisible: bool,
}

/// Represents a single actor in the roster
///
/// # Example
/// ```
/// use monkey_business_core::models::actor::{Actor, WorryRelief};
/// use monkey_business_core::models::operation::Operation;
///
/// let op = Operation::from_tokens("old", "*", "19").unwrap();
/// let mut actor = Actor::new(0, vec![79, 98], op, 23, 2, 3);
///
/// let throws = actor.take_turn(WorryRelief::Dampen(3));
/// assert_eq!(throws.len(), 2);
/// assert_eq!(throws[0].target, 3);
/// assert_eq!(throws[0].worry, 500);
/// assert!(actor.items().is_empty());
/// assert_eq!(actor.inspection_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Actor {
    /// Roster position; doubles as routing address and visitation order
    id: usize,

    /// Items awaiting inspection, oldest first
    items: Vec<WorryLevel>,

    /// Transformation applied on inspection
    operation: Operation,

    /// Routing test: `worry % divisor == 0`
    divisor: WorryLevel,

    /// Target when the test passes
    if_true: usize,

    /// Target when the test fails
    if_false: usize,

    /// Items inspected over the whole run, never reset
    inspection_count: u64,
}

impl Actor {
    /// Create a new actor
    ///
    /// Targets are expected to be validated by the caller; see
    /// `Simulation::new`, which also rejects non-positive divisors before
    /// building any actor.
    ///
    /// # Panics
    ///
    /// If `divisor` is zero.
    pub fn new(
        id: usize,
        items: Vec<WorryLevel>,
        operation: Operation,
        divisor: WorryLevel,
        if_true: usize,
        if_false: usize,
    ) -> Self {
        assert!(divisor > 0, "divisor must be positive");
        Self {
            id,
            items,
            operation,
            divisor,
            if_true,
            if_false,
            inspection_count: 0,
        }
    }

    /// Inspect and route every item currently queued
    ///
    /// Returns one [`Throw`] per item, in the order the items were queued.
    /// The queue is empty afterwards.
    ///
    /// # Panics
    ///
    /// Only under [`WorryRelief::Dampen`], if a relieved worry level no longer
    /// fits in a `u64`. Bounded relief keeps values below the modulus.
    pub fn take_turn(&mut self, relief: WorryRelief) -> Vec<Throw> {
        let items = std::mem::take(&mut self.items);
        let mut throws = Vec::with_capacity(items.len());

        for old in items {
            self.inspection_count += 1;

            let worry = self.relieved_worry(old, relief);
            let divisible = worry % self.divisor == 0;
            let target = if divisible { self.if_true } else { self.if_false };

            throws.push(Throw {
                from: self.id,
                target,
                worry,
                divisible,
            });
        }

        throws
    }

    fn relieved_worry(&self, old: WorryLevel, relief: WorryRelief) -> WorryLevel {
        let relieved = relief.relieve(self.operation.apply(old));
        WorryLevel::try_from(relieved).unwrap_or_else(|_| {
            panic!(
                "worry level {} overflowed u64 at actor {} (operation `{}`, relief {:?})",
                relieved, self.id, self.operation, relief
            )
        })
    }

    /// Append an item to the back of the queue
    pub fn catch_item(&mut self, worry: WorryLevel) {
        self.items.push(worry);
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Items currently queued, oldest first
    pub fn items(&self) -> &[WorryLevel] {
        &self.items
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn divisor(&self) -> WorryLevel {
        self.divisor
    }

    pub fn if_true(&self) -> usize {
        self.if_true
    }

    pub fn if_false(&self) -> usize {
        self.if_false
    }

    pub fn inspection_count(&self) -> u64 {
        self.inspection_count
    }

    /// True if either target routes back to this actor
    pub fn routes_to_self(&self) -> bool {
        self.if_true == self.id || self.if_false == self.id
    }
}
