//! Worry-level operations
//!
//! Every actor transforms the items it inspects with a tiny binary expression:
//! two operands and one operator. Operands are either the item's current
//! worry level (`old`) or a non-negative constant; the operator is `+` or `*`.
//!
//! Operations arrive as raw tokens (from JSON or the notes grammar) and are
//! validated once, when the simulation is built. After that `apply` cannot
//! fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single worry level carried by an item
pub type WorryLevel = u64;

/// Errors raised while validating operation tokens
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("Unrecognized operator '{0}' (expected '*' or '+')")]
    UnrecognizedOperator(String),

    #[error("Unrecognized operand '{0}' (expected 'old' or a non-negative integer)")]
    UnrecognizedOperand(String),
}

/// One side of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The worry level of the item being inspected
    Old,
    /// A fixed constant
    Constant(WorryLevel),
}

impl Operand {
    fn resolve(self, old: WorryLevel) -> u128 {
        match self {
            Operand::Old => old as u128,
            Operand::Constant(value) => value as u128,
        }
    }
}

impl FromStr for Operand {
    type Err = OperationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token == "old" {
            return Ok(Operand::Old);
        }
        token
            .parse::<WorryLevel>()
            .map(Operand::Constant)
            .map_err(|_| OperationError::UnrecognizedOperand(token.to_string()))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Old => write!(f, "old"),
            Operand::Constant(value) => write!(f, "{}", value),
        }
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
}

impl FromStr for Operator {
    type Err = OperationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim() {
            "+" => Ok(Operator::Add),
            "*" => Ok(Operator::Multiply),
            other => Err(OperationError::UnrecognizedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Multiply => write!(f, "*"),
        }
    }
}

/// Raw, unvalidated operation tokens as they appear in configuration
///
/// # Example
/// ```
/// use monkey_business_core::models::operation::OperationConfig;
///
/// let raw = OperationConfig::new("old", "*", "19");
/// let op = raw.validate().unwrap();
/// assert_eq!(op.to_string(), "old * 19");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationConfig {
    pub left: String,
    pub operator: String,
    pub right: String,
}

impl OperationConfig {
    pub fn new(left: impl Into<String>, operator: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            operator: operator.into(),
            right: right.into(),
        }
    }

    /// Validate the tokens into an [`Operation`]
    pub fn validate(&self) -> Result<Operation, OperationError> {
        Operation::from_tokens(&self.left, &self.operator, &self.right)
    }
}

/// A validated worry-level transformation
///
/// # Example
/// ```
/// use monkey_business_core::models::operation::{Operand, Operation, Operator};
///
/// let square = Operation::new(Operand::Old, Operator::Multiply, Operand::Old);
/// assert_eq!(square.apply(79), 6241);
///
/// let add_six = Operation::from_tokens("old", "+", "6").unwrap();
/// assert_eq!(add_six.apply(54), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    left: Operand,
    operator: Operator,
    right: Operand,
}

impl Operation {
    pub fn new(left: Operand, operator: Operator, right: Operand) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }

    /// Build an operation from its three tokens
    ///
    /// The operator is checked first so `old / 2` reports the operator, not
    /// the operands.
    pub fn from_tokens(left: &str, operator: &str, right: &str) -> Result<Self, OperationError> {
        let operator = operator.parse()?;
        Ok(Self {
            left: left.parse()?,
            operator,
            right: right.parse()?,
        })
    }

    /// Apply the operation to a worry level
    ///
    /// Evaluated in `u128`: any two `u64` operands multiply without overflow.
    pub fn apply(&self, old: WorryLevel) -> u128 {
        let left = self.left.resolve(old);
        let right = self.right.resolve(old);
        match self.operator {
            Operator::Add => left + right,
            Operator::Multiply => left * right,
        }
    }

    pub fn left(&self) -> Operand {
        self.left
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn right(&self) -> Operand {
        self.right
    }

    /// True when the operation multiplies the item by itself
    pub fn is_square(&self) -> bool {
        self.operator == Operator::Multiply && self.left == Operand::Old && self.right == Operand::Old
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}
