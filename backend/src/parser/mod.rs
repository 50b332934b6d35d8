//! Notes Parser
//!
//! Reads the textual roster description into [`ActorConfig`]s:
//!
//! ```text
//! Monkey 0:
//!   Starting items: 79, 98
//!   Operation: new = old * 19
//!   Test: divisible by 23
//!     If true: throw to monkey 2
//!     If false: throw to monkey 3
//! ```
//!
//! Blocks are separated by blank lines and must appear in id order.
//!
//! The parser checks layout and numbers only. Operation tokens are passed
//! through unvalidated so an unknown operator is reported by
//! `Simulation::new`, like any other configuration error.

use crate::orchestrator::engine::ActorConfig;
use crate::models::operation::{OperationConfig, WorryLevel};
use std::iter::{Enumerate, Peekable};
use std::str::Lines;
use thiserror::Error;

/// Errors raised while reading notes
///
/// Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEnd { line: usize, expected: &'static str },

    #[error("line {line}: expected {expected}, found '{found}'")]
    ExpectedLine {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: operation must look like 'new = <operand> <operator> <operand>', found '{found}'")]
    MalformedOperation { line: usize, found: String },

    #[error("line {line}: expected monkey {expected}, found monkey {found}")]
    ActorOutOfOrder {
        line: usize,
        expected: usize,
        found: usize,
    },
}

const HEADER: &str = "Monkey ";
const ITEMS: &str = "Starting items:";
const OPERATION: &str = "Operation:";
const TEST: &str = "Test: divisible by ";
const IF_TRUE: &str = "If true: throw to monkey ";
const IF_FALSE: &str = "If false: throw to monkey ";

/// Parse a complete set of notes
///
/// # Example
/// ```
/// use monkey_business_core::parser::parse_notes;
///
/// let notes = "\
/// Monkey 0:
///   Starting items: 79, 98
///   Operation: new = old * 19
///   Test: divisible by 23
///     If true: throw to monkey 2
///     If false: throw to monkey 3
/// ";
/// let actors = parse_notes(notes).unwrap();
/// assert_eq!(actors.len(), 1);
/// assert_eq!(actors[0].items, vec![79, 98]);
/// assert_eq!(actors[0].divisor, 23);
/// ```
pub fn parse_notes(notes: &str) -> Result<Vec<ActorConfig>, ParseError> {
    let mut cursor = Cursor::new(notes);
    let mut actors = Vec::new();

    while cursor.skip_blank() {
        actors.push(parse_block(&mut cursor, actors.len())?);
    }

    Ok(actors)
}

fn parse_block(cursor: &mut Cursor<'_>, expected_id: usize) -> Result<ActorConfig, ParseError> {
    let (line, header) = cursor.field(HEADER, "'Monkey <id>:'")?;
    let id_token = header.strip_suffix(':').ok_or_else(|| ParseError::ExpectedLine {
        line,
        expected: "':' after monkey id",
        found: header.to_string(),
    })?;
    let id: usize = number(line, id_token)?;
    if id != expected_id {
        return Err(ParseError::ActorOutOfOrder {
            line,
            expected: expected_id,
            found: id,
        });
    }

    let (line, items) = cursor.field(ITEMS, "'Starting items:'")?;
    let items = items
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| number::<WorryLevel>(line, token))
        .collect::<Result<Vec<_>, _>>()?;

    let (line, operation) = cursor.field(OPERATION, "'Operation:'")?;
    let operation = parse_operation(line, operation)?;

    let (line, divisor) = cursor.field(TEST, "'Test: divisible by <n>'")?;
    let divisor = number(line, divisor)?;

    let (line, if_true) = cursor.field(IF_TRUE, "'If true: throw to monkey <id>'")?;
    let if_true = number(line, if_true)?;

    let (line, if_false) = cursor.field(IF_FALSE, "'If false: throw to monkey <id>'")?;
    let if_false = number(line, if_false)?;

    Ok(ActorConfig {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

fn parse_operation(line: usize, text: &str) -> Result<OperationConfig, ParseError> {
    let malformed = || ParseError::MalformedOperation {
        line,
        found: text.to_string(),
    };

    let expression = text
        .trim()
        .strip_prefix("new")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(malformed)?;

    match expression.split_whitespace().collect::<Vec<_>>().as_slice() {
        [left, operator, right] => Ok(OperationConfig::new(*left, *operator, *right)),
        _ => Err(malformed()),
    }
}

fn number<T: std::str::FromStr>(line: usize, token: &str) -> Result<T, ParseError> {
    let token = token.trim();
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Line cursor with 1-based numbering
struct Cursor<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    last_line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            last_line: 0,
        }
    }

    /// Skip blank lines; false once input is exhausted
    fn skip_blank(&mut self) -> bool {
        while let Some((_, line)) = self.lines.peek() {
            if !line.trim().is_empty() {
                return true;
            }
            self.lines.next();
        }
        false
    }

    /// Next line, which must start with `prefix` once trimmed
    ///
    /// Returns the line number and the text after the prefix.
    fn field(&mut self, prefix: &str, expected: &'static str) -> Result<(usize, &'a str), ParseError> {
        let (index, text) = self.lines.next().ok_or(ParseError::UnexpectedEnd {
            line: self.last_line + 1,
            expected,
        })?;
        let line = index + 1;
        self.last_line = line;

        text.trim()
            .strip_prefix(prefix)
            .map(|rest| (line, rest))
            .ok_or_else(|| ParseError::ExpectedLine {
                line,
                expected,
                found: text.trim().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MONKEYS: &str = "\
Monkey 0:
  Starting items: 79, 98
  Operation: new = old * 19
  Test: divisible by 23
    If true: throw to monkey 1
    If false: throw to monkey 1

Monkey 1:
  Starting items:
  Operation: new = old * old
  Test: divisible by 13
    If true: throw to monkey 0
    If false: throw to monkey 0
";

    #[test]
    fn test_parse_two_blocks() {
        let actors = parse_notes(TWO_MONKEYS).unwrap();
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].operation, OperationConfig::new("old", "*", "19"));
        assert!(actors[1].items.is_empty());
        assert_eq!(actors[1].operation, OperationConfig::new("old", "*", "old"));
        assert_eq!(actors[1].if_true, 0);
    }

    #[test]
    fn test_empty_notes_give_empty_roster() {
        assert!(parse_notes("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_truncated_block() {
        let notes = "Monkey 0:\n  Starting items: 1\n";
        assert_eq!(
            parse_notes(notes).unwrap_err(),
            ParseError::UnexpectedEnd {
                line: 3,
                expected: "'Operation:'"
            }
        );
    }

    #[test]
    fn test_out_of_order_header() {
        let notes = TWO_MONKEYS.replace("Monkey 1:", "Monkey 5:");
        assert_eq!(
            parse_notes(&notes).unwrap_err(),
            ParseError::ActorOutOfOrder {
                line: 8,
                expected: 1,
                found: 5
            }
        );
    }

    #[test]
    fn test_bad_item_reports_line() {
        let notes = TWO_MONKEYS.replace("79, 98", "79, x");
        assert_eq!(
            parse_notes(&notes).unwrap_err(),
            ParseError::InvalidNumber {
                line: 2,
                token: "x".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_operator_passes_through() {
        let notes = TWO_MONKEYS.replace("old * 19", "old / 19");
        let actors = parse_notes(&notes).unwrap();
        assert_eq!(actors[0].operation.operator, "/");
    }

    #[test]
    fn test_malformed_operation() {
        let notes = TWO_MONKEYS.replace("new = old * 19", "old * 19");
        assert!(matches!(
            parse_notes(&notes).unwrap_err(),
            ParseError::MalformedOperation { line: 3, .. }
        ));
    }

    #[test]
    fn test_negative_divisor_is_kept_for_validation() {
        let notes = TWO_MONKEYS.replace("divisible by 23", "divisible by -23");
        let actors = parse_notes(&notes).unwrap();
        assert_eq!(actors[0].divisor, -23);
    }
}
