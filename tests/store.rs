mod common;

use std::time::Duration;

use common::*;
use pokit::environment::Environment;
use pokit::runtime::{Action, Category, Effect, Reducer, State, Store};
use pokit::shutdown::ShutdownCoordinator;

#[derive(Debug, Clone, PartialEq, Default)]
struct TraceState {
    seen: Vec<Step>,
}

impl State for TraceState {}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    A,
    B,
    C,
    D,
}

impl Action for Step {
    fn category(&self) -> Category {
        match self {
            Step::A => Category::View,
            Step::B | Step::C | Step::D => Category::Inner,
        }
    }
}

/// `A` emits `B` and `C`; `B` emits `D`.
struct TraceReducer;

impl Reducer for TraceReducer {
    type State = TraceState;
    type Action = Step;

    fn reduce(&self, state: &mut TraceState, action: Step) -> Effect<Step> {
        state.seen.push(action);
        match action {
            Step::A => Effect::send(Step::B).and(Effect::send(Step::C)),
            Step::B => Effect::send(Step::D),
            Step::C | Step::D => Effect::none(),
        }
    }
}

#[test]
fn test_synchronous_follow_ups_apply_in_fifo_order() {
    let mut store = Store::new(TraceState::default(), TraceReducer, Environment::unimplemented());

    store.send(Step::A);

    assert_eq!(store.state().seen, vec![Step::A, Step::B, Step::C, Step::D]);
}

#[test]
fn test_observers_see_one_snapshot_per_dispatch() {
    let mut store = Store::new(TraceState::default(), TraceReducer, Environment::unimplemented());
    let mut updates = store.subscribe();

    store.send(Step::A);

    assert!(updates.has_changed().unwrap_or(false));
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.seen.len(), 4);
    assert!(!updates.has_changed().unwrap_or(true));
}

#[test]
fn test_replaying_actions_is_deterministic() {
    let actions = [
        CounterAction::Increment,
        CounterAction::Add(5),
        CounterAction::Increment,
    ];
    let replay = || {
        actions
            .iter()
            .cloned()
            .fold(CounterState::default(), |state, action| {
                CounterReducer.run(state, action).0
            })
    };

    assert_eq!(replay(), replay());
    assert_eq!(replay().count, 7);
}

#[tokio::test]
async fn test_run_applies_external_actions_until_shutdown() {
    let store = Store::new(CounterState::default(), CounterReducer, Environment::unimplemented());
    let handle = store.handle();
    let mut updates = store.subscribe();
    let coordinator = ShutdownCoordinator::new();
    let task = tokio::spawn(store.run(coordinator.handle()));

    assert!(handle.send(CounterAction::Increment));
    assert!(handle.send(CounterAction::Add(4)));
    tokio::time::timeout(Duration::from_secs(1), updates.wait_for(|state| state.count == 5))
        .await
        .expect("store never applied the actions")
        .expect("store dropped");

    coordinator.signal();
    let state = tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("store loop did not stop")
        .expect("store loop panicked");

    assert_eq!(state.count, 5);
    assert!(!handle.send(CounterAction::Increment));
}

#[tokio::test]
async fn test_shutdown_cancels_running_effects() {
    let mut store = Store::new(CounterState::default(), CounterReducer, Environment::unimplemented());
    store.send(CounterAction::StartTimer { millis: 60_000 });
    assert_eq!(store.in_flight(), 1);

    let coordinator = ShutdownCoordinator::new();
    coordinator.signal();
    let state = tokio::time::timeout(Duration::from_secs(1), store.run(coordinator.handle()))
        .await
        .expect("store loop did not stop");

    assert_eq!(state.count, 0);
}
