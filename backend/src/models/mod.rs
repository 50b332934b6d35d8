//! Domain models for the routing simulation

pub mod actor;
pub mod event;
pub mod operation;

// Re-exports
pub use actor::{Actor, Throw, WorryRelief, DAMPENING_FACTOR};
pub use event::{Event, EventLog};
pub use operation::{Operand, Operation, OperationConfig, OperationError, Operator, WorryLevel};
