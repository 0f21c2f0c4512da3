mod common;

use common::*;
use pokit::environment::Environment;
use pokit::runtime::{Reducer, ScopePath, Segment, StackAction, StackElementId, Store};

fn push(id: u64) -> ParentAction {
    ParentAction::Stack(StackAction::Push {
        state: CounterState::with_id(id),
    })
}

fn element(id: StackElementId, action: CounterAction) -> ParentAction {
    ParentAction::Stack(StackAction::Element { id, action })
}

fn element_scope(id: &StackElementId) -> ScopePath {
    ScopePath::root().child(Segment::element("stack", id))
}

#[test]
fn test_push_then_element_action() {
    let (state, _) = parent().run(ParentState::default(), push(1));
    let id = state.stack.last_id().expect("pushed");

    let (state, _) = parent().run(state, element(id, CounterAction::Add(2)));

    assert_eq!(state.stack.get(&id).map(|screen| screen.count), Some(2));
}

#[test]
fn test_action_for_popped_element_is_dropped() {
    let (state, _) = parent().run(ParentState::default(), push(1));
    let id = state.stack.last_id().expect("pushed");
    let (state, _) = parent().run(state, ParentAction::Stack(StackAction::PopFrom { id }));

    let (after, effect) = parent().run(state.clone(), element(id, CounterAction::Increment));

    assert!(effect.is_none());
    assert_eq!(after, state);
}

#[test]
fn test_parent_reacts_to_live_element_only() {
    let (state, _) = parent().run(ParentState::default(), push(1));
    let id = state.stack.last_id().expect("pushed");

    let (state, effect) = parent().run(state, element(id, CounterAction::Increment));
    assert_eq!(state.tally, 1);
    assert_eq!(
        effect.actions(),
        vec![&ParentAction::Left(CounterAction::Add(1))]
    );

    let (state, _) = parent().run(state, ParentAction::Stack(StackAction::PopFrom { id }));
    let (after, effect) = parent().run(state.clone(), element(id, CounterAction::Increment));
    assert_eq!(after.tally, 1);
    assert_eq!(after, state);
    assert!(effect.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_pop_cancels_effects_of_popped_elements() {
    let mut store = Store::new(ParentState::default(), parent(), Environment::unimplemented());
    store.send(push(1));
    store.send(push(2));
    let ids = store.state().stack.ids();
    let (bottom, top) = (ids[0], ids[1]);

    store.send(element(bottom, CounterAction::StartTimer { millis: 10_000 }));
    store.send(element(top, CounterAction::StartTimer { millis: 10_000 }));
    assert_eq!(store.in_flight(), 2);

    store.send(ParentAction::Stack(StackAction::PopFrom { id: top }));
    assert_eq!(store.in_flight_under(&element_scope(&top)), 0);
    assert_eq!(store.in_flight_under(&element_scope(&bottom)), 1);

    store.settle().await;
    assert_eq!(store.state().stack.len(), 1);
    assert_eq!(store.state().stack.get(&bottom).map(|screen| screen.count), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_child_dismiss_pops_itself_and_everything_above() {
    let mut store = Store::new(ParentState::default(), parent(), Environment::unimplemented());
    store.send(push(1));
    store.send(push(2));
    store.send(push(3));
    let ids = store.state().stack.ids();

    store.send(element(ids[2], CounterAction::StartTimer { millis: 10_000 }));
    store.send(element(ids[1], CounterAction::Close));

    assert_eq!(store.state().stack.ids(), vec![ids[0]]);
    assert_eq!(store.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_pop_drops_output_already_queued_by_popped_element() {
    let mut store = Store::new(ParentState::default(), parent(), Environment::unimplemented());
    store.send(push(1));
    store.send(push(2));
    let ids = store.state().stack.ids();

    store.send(element(ids[1], CounterAction::Burst));
    // The operation emits, then blocks.
    tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    store.send(ParentAction::Stack(StackAction::PopFrom { id: ids[1] }));
    store.send(push(3));

    store.settle().await;
    assert!(store.state().stack.iter().all(|(_, screen)| screen.count == 0));
    assert_eq!(store.in_flight(), 0);
}
