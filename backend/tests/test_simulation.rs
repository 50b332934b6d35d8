//! Integration tests for the round loop
//!
//! Covers delivery ordering, conservation of items, self-routing and
//! determinism.

use monkey_business_core::{
    ActorConfig, Event, OperationConfig, Simulation, SimulationConfig, SimulationError, WorryMode,
};

fn actor(items: Vec<u64>, operation: (&str, &str, &str), divisor: i64, if_true: usize, if_false: usize) -> ActorConfig {
    ActorConfig {
        items,
        operation: OperationConfig::new(operation.0, operation.1, operation.2),
        divisor,
        if_true,
        if_false,
    }
}

/// A(0) always throws to B(1), B always throws back to A
fn relay_config() -> SimulationConfig {
    SimulationConfig::new(
        vec![
            actor(vec![5], ("old", "+", "0"), 2, 1, 1),
            actor(vec![], ("old", "+", "0"), 3, 0, 0),
        ],
        WorryMode::Bounded,
    )
}

/// Three actors with crossing routes, used for conservation checks
fn mixed_config() -> SimulationConfig {
    let mut config = SimulationConfig::new(
        vec![
            actor(vec![3, 8, 12], ("old", "*", "7"), 3, 2, 1),
            actor(vec![1, 4], ("old", "+", "5"), 5, 0, 2),
            actor(vec![9], ("old", "*", "old"), 7, 1, 0),
        ],
        WorryMode::Bounded,
    );
    config.record_events = true;
    config
}

#[test]
fn test_delivery_to_higher_id_is_inspected_same_round() {
    let mut sim = Simulation::new(relay_config()).unwrap();
    let result = sim.run_round();

    assert_eq!(result.inspections, 2);
    assert_eq!(sim.actor(0).unwrap().inspection_count(), 1);
    assert_eq!(sim.actor(1).unwrap().inspection_count(), 1);
}

#[test]
fn test_delivery_to_lower_id_waits_for_next_round() {
    let mut sim = Simulation::new(relay_config()).unwrap();
    sim.run_round();

    // B threw the item back to A after A had already moved
    assert_eq!(sim.actor(0).unwrap().items(), &[5]);
    assert!(sim.actor(1).unwrap().items().is_empty());

    sim.run_round();
    assert_eq!(sim.inspection_counts(), vec![2, 2]);
}

#[test]
fn test_zero_rounds_is_a_no_op() {
    let mut sim = Simulation::new(mixed_config()).unwrap();
    let before = sim.snapshot();

    assert_eq!(sim.run(0), 0);
    assert!(sim.is_ready());
    assert_eq!(sim.snapshot(), before);
    assert_eq!(sim.monkey_business().unwrap(), 0);
}

#[test]
fn test_run_counts_rounds_and_inspections() {
    let mut sim = Simulation::new(mixed_config()).unwrap();
    let inspections = sim.run(25);

    assert_eq!(sim.rounds_completed(), 25);
    assert!(!sim.is_ready());
    assert_eq!(inspections, sim.inspection_counts().iter().sum::<u64>());
}

#[test]
fn test_items_are_conserved() {
    let mut sim = Simulation::new(mixed_config()).unwrap();
    let total = sim.total_items();
    assert_eq!(total, 6);

    for _ in 0..100 {
        sim.run_round();
        assert_eq!(sim.total_items(), total);
    }
}

#[test]
fn test_every_inspection_emits_one_throw() {
    let mut sim = Simulation::new(mixed_config()).unwrap();
    sim.run(30);

    let log = sim.event_log().expect("recording enabled");
    let throws = log.events_of_type("throw").len() as u64;
    assert_eq!(throws, sim.inspection_counts().iter().sum::<u64>());
    assert_eq!(log.events_of_type("round_complete").len(), 30);

    for (id, count) in sim.inspection_counts().into_iter().enumerate() {
        assert_eq!(log.throws_from(id).len() as u64, count);
    }
}

#[test]
fn test_throws_follow_divisibility_test() {
    let mut sim = Simulation::new(mixed_config()).unwrap();
    sim.run(10);

    let snapshot = sim.snapshot();
    let modulus = sim.modulus().unwrap();
    for event in sim.event_log().unwrap().events_of_type("throw") {
        if let Event::Throw { from, to, worry, divisible, .. } = event {
            let actor = &snapshot.actors[*from];
            assert_eq!(*divisible, worry % actor.divisor == 0);
            let expected = if *divisible { actor.if_true } else { actor.if_false };
            assert_eq!(*to, expected);
            assert!(*worry < modulus);
        }
    }
}

#[test]
fn test_identical_runs_are_identical() {
    let mut first = Simulation::new(mixed_config()).unwrap();
    let mut second = Simulation::new(mixed_config()).unwrap();

    first.run(500);
    second.run(500);

    assert_eq!(first.inspection_counts(), second.inspection_counts());
    assert_eq!(first.snapshot(), second.snapshot());
    assert_eq!(first.event_log(), second.event_log());
    assert_eq!(first.monkey_business(), second.monkey_business());
}

#[test]
fn test_self_routing_is_delivered_after_turn() {
    let config = SimulationConfig::new(
        vec![
            actor(vec![1, 2], ("old", "+", "1"), 2, 0, 0),
            actor(vec![], ("old", "*", "2"), 3, 0, 0),
        ],
        WorryMode::Bounded,
    );
    let mut sim = Simulation::new(config).unwrap();
    assert!(sim.actor(0).unwrap().routes_to_self());

    sim.run_round();
    assert_eq!(sim.actor(0).unwrap().inspection_count(), 2);
    assert_eq!(sim.actor(0).unwrap().items(), &[2, 3]);

    sim.run_round();
    assert_eq!(sim.actor(0).unwrap().inspection_count(), 4);
    assert_eq!(sim.actor(0).unwrap().items(), &[3, 4]);
    assert_eq!(sim.actor(1).unwrap().inspection_count(), 0);
}

#[test]
fn test_monkey_business_needs_two_actors() {
    let single = SimulationConfig::new(
        vec![actor(vec![1], ("old", "+", "1"), 2, 0, 0)],
        WorryMode::Dampened,
    );
    let mut sim = Simulation::new(single).unwrap();
    sim.run(3);
    assert_eq!(
        sim.monkey_business(),
        Err(SimulationError::InsufficientActors { found: 1 })
    );

    let empty = Simulation::new(SimulationConfig::new(vec![], WorryMode::Bounded)).unwrap();
    assert_eq!(empty.modulus(), Some(1));
    assert_eq!(
        empty.monkey_business(),
        Err(SimulationError::InsufficientActors { found: 0 })
    );
}

#[test]
fn test_snapshot_reports_initial_state() {
    let sim = Simulation::new(mixed_config()).unwrap();
    let snapshot = sim.snapshot();

    assert_eq!(snapshot.rounds_completed, 0);
    assert_eq!(snapshot.modulus, Some(105));
    assert_eq!(snapshot.actors[0].items, vec![3, 8, 12]);
    assert_eq!(snapshot.actors[2].operation, "old * old");
    assert_eq!(snapshot.inspection_counts(), vec![0, 0, 0]);
}

#[test]
#[should_panic(expected = "overflowed u64")]
fn test_dampened_squaring_overflow_panics() {
    // 10 squared and dampened twice per round outgrows u64 within a few rounds
    let config = SimulationConfig::new(
        vec![
            actor(vec![10], ("old", "*", "old"), 2, 1, 1),
            actor(vec![], ("old", "*", "old"), 3, 0, 0),
        ],
        WorryMode::Dampened,
    );
    let mut sim = Simulation::new(config).unwrap();
    sim.run(20);
}
