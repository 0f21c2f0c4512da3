mod common;

use std::time::Duration;

use common::*;
use pokit::environment::Environment;
use pokit::runtime::Store;

fn counter_store() -> Store<CounterReducer> {
    Store::new(CounterState::default(), CounterReducer, Environment::unimplemented())
}

/// Three requests inside the window run once, with the last value.
#[tokio::test(start_paused = true)]
async fn test_debounce_runs_last_request_once() {
    let mut store = counter_store();

    store.send(CounterAction::Debounced(1));
    tokio::time::advance(Duration::from_millis(100)).await;
    store.send(CounterAction::Debounced(2));
    tokio::time::advance(Duration::from_millis(100)).await;
    store.send(CounterAction::Debounced(3));
    assert_eq!(store.in_flight(), 1);

    store.settle().await;
    assert_eq!(store.state().count, 3);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_waits_for_quiet_window() {
    let mut store = counter_store();

    store.send(CounterAction::Debounced(7));
    let early = tokio::time::timeout(WINDOW / 2, store.settle()).await;
    assert!(early.is_err());
    assert_eq!(store.state().count, 0);

    store.settle().await;
    assert_eq!(store.state().count, 7);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_requests_apart_both_run() {
    let mut store = counter_store();

    store.send(CounterAction::Debounced(1));
    store.settle().await;
    store.send(CounterAction::Debounced(2));
    store.settle().await;

    assert_eq!(store.state().count, 3);
}

#[tokio::test(start_paused = true)]
async fn test_throttle_drops_requests_inside_window() {
    let mut store = counter_store();

    for amount in [1, 10, 100] {
        store.send(CounterAction::Throttled {
            amount,
            latest: false,
        });
    }
    store.settle().await;
    assert_eq!(store.state().count, 1);

    tokio::time::advance(WINDOW).await;
    store.send(CounterAction::Throttled {
        amount: 1_000,
        latest: false,
    });
    store.settle().await;
    assert_eq!(store.state().count, 1_001);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_resets_throttle_window() {
    let mut store = counter_store();

    store.send(CounterAction::Throttled {
        amount: 1,
        latest: false,
    });
    store.settle().await;
    assert_eq!(store.state().count, 1);

    store.send(CounterAction::CancelThrottle);
    store.send(CounterAction::Throttled {
        amount: 10,
        latest: false,
    });
    store.settle().await;

    assert_eq!(store.state().count, 11);
}

#[tokio::test(start_paused = true)]
async fn test_throttle_latest_delivers_trailing_request() {
    let mut store = counter_store();

    for amount in [1, 10, 100] {
        store.send(CounterAction::Throttled {
            amount,
            latest: true,
        });
    }
    store.settle().await;

    // Leading request plus the last one at the end of the window.
    assert_eq!(store.state().count, 101);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_action_already_sent() {
    let mut store = counter_store();

    store.send(CounterAction::Burst);
    // Let the operation emit before the cancel is applied.
    tokio::time::sleep(Duration::from_millis(1)).await;
    store.send(CounterAction::CancelTimer);

    store.settle().await;
    assert_eq!(store.state().count, 0);
    assert_eq!(store.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_restarting_cancellable_effect_replaces_running_one() {
    let mut store = counter_store();

    store.send(CounterAction::StartTimer { millis: 1_000 });
    store.send(CounterAction::StartTimer { millis: 1_000 });
    assert_eq!(store.in_flight(), 1);

    store.settle().await;
    assert_eq!(store.state().count, 1);
}
