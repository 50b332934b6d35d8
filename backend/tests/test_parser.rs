//! Tests for the notes parser and its hand-off to the simulation

use monkey_business_core::{
    parse_notes, OperationConfig, OperationError, ParseError, Simulation, SimulationConfig,
    SimulationError, WorryMode,
};

const NOTES: &str = "\
Monkey 0:
  Starting items: 79, 98
  Operation: new = old * 19
  Test: divisible by 23
    If true: throw to monkey 2
    If false: throw to monkey 3

Monkey 1:
  Starting items: 54, 65, 75, 74
  Operation: new = old + 6
  Test: divisible by 19
    If true: throw to monkey 2
    If false: throw to monkey 0

Monkey 2:
  Starting items: 79, 60, 97
  Operation: new = old * old
  Test: divisible by 13
    If true: throw to monkey 1
    If false: throw to monkey 3

Monkey 3:
  Starting items: 74
  Operation: new = old + 3
  Test: divisible by 17
    If true: throw to monkey 0
    If false: throw to monkey 1
";

#[test]
fn test_parse_reference_notes() {
    let actors = parse_notes(NOTES).unwrap();
    assert_eq!(actors.len(), 4);

    assert_eq!(actors[1].items, vec![54, 65, 75, 74]);
    assert_eq!(actors[1].operation, OperationConfig::new("old", "+", "6"));
    assert_eq!(actors[1].divisor, 19);
    assert_eq!((actors[1].if_true, actors[1].if_false), (2, 0));

    let divisors: Vec<i64> = actors.iter().map(|a| a.divisor).collect();
    assert_eq!(divisors, vec![23, 19, 13, 17]);
}

#[test]
fn test_windows_line_endings() {
    let crlf = NOTES.replace('\n', "\r\n");
    assert_eq!(parse_notes(&crlf).unwrap(), parse_notes(NOTES).unwrap());
}

#[test]
fn test_extra_blank_lines_between_blocks() {
    let spaced = NOTES.replace("\n\nMonkey", "\n\n\n\nMonkey");
    assert_eq!(parse_notes(&spaced).unwrap().len(), 4);
}

#[test]
fn test_from_notes_uses_mode_default_rounds() {
    let config = SimulationConfig::from_notes(NOTES, WorryMode::Dampened).unwrap();
    assert_eq!(config.worry_mode, WorryMode::Dampened);
    assert_eq!(config.effective_rounds(), 20);
}

#[test]
fn test_unknown_operator_surfaces_at_construction() {
    let notes = NOTES.replace("old + 6", "old ^ 6");
    let config = SimulationConfig::from_notes(&notes, WorryMode::Bounded).unwrap();

    assert_eq!(
        Simulation::new(config).unwrap_err(),
        SimulationError::InvalidOperation {
            actor: 1,
            source: OperationError::UnrecognizedOperator("^".to_string()),
        }
    );
}

#[test]
fn test_target_outside_roster_surfaces_at_construction() {
    let notes = NOTES.replace("If false: throw to monkey 1\n", "If false: throw to monkey 4\n");
    let config = SimulationConfig::from_notes(&notes, WorryMode::Bounded).unwrap();

    assert!(matches!(
        Simulation::new(config),
        Err(SimulationError::TargetOutOfRange { actor: 3, target: 4, .. })
    ));
}

#[test]
fn test_missing_test_line() {
    let notes = NOTES.replacen("  Test: divisible by 23\n", "", 1);
    match parse_notes(&notes).unwrap_err() {
        ParseError::ExpectedLine { line, found, .. } => {
            assert_eq!(line, 4);
            assert_eq!(found, "If true: throw to monkey 2");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_error_display() {
    let err = parse_notes("Monkey zero:\n").unwrap_err();
    assert_eq!(err.to_string(), "line 1: invalid number 'zero'");
}
