//! Runs effects on the tokio runtime and tracks their cancellation groups.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, Notify};
use tokio::task::AbortHandle;
use tokio::time::{Duration, Instant};

use crate::environment::Environment;

use super::action::Action;
use super::effect::{Effect, EffectKey, Operation, Policy, Sender, Task, Work};
use super::scope::ScopePath;

/// Absolute cancellation group: a key qualified by the scope that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CancelId {
    scope: ScopePath,
    key: EffectKey,
}

/// Action on its way from an operation back into the store.
pub(crate) struct Envelope<A> {
    pub(crate) action: A,
    cancelled: Option<Arc<AtomicBool>>,
}

impl<A> Envelope<A> {
    pub(crate) fn external(action: A) -> Self {
        Self {
            action,
            cancelled: None,
        }
    }

    /// Sent by an operation that has since been cancelled.
    pub(crate) fn is_stale(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|cancelled| cancelled.load(Ordering::Acquire))
    }
}

struct Running {
    scope: ScopePath,
    id: Option<CancelId>,
    cancelled: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
}

impl Running {
    fn cancel(self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(abort) = self.abort {
            abort.abort();
        }
    }
}

struct Throttle {
    window_start: Instant,
    pending: Option<u64>,
}

pub(crate) struct Scheduler<A> {
    env: Environment,
    outbox: mpsc::UnboundedSender<Envelope<A>>,
    running: Arc<Mutex<HashMap<u64, Running>>>,
    finished: Arc<Notify>,
    throttles: HashMap<CancelId, Throttle>,
    next_task: u64,
}

impl<A: Action> Scheduler<A> {
    pub(crate) fn new(env: Environment, outbox: mpsc::UnboundedSender<Envelope<A>>) -> Self {
        Self {
            env,
            outbox,
            running: Arc::new(Mutex::new(HashMap::new())),
            finished: Arc::new(Notify::new()),
            throttles: HashMap::new(),
            next_task: 0,
        }
    }

    /// Start or cancel everything `effect` describes, returning the actions
    /// to dispatch synchronously, in order.
    pub(crate) fn schedule(&mut self, effect: Effect<A>) -> Vec<A> {
        let mut immediate = Vec::new();
        for task in effect.into_tasks() {
            let Task {
                scope,
                key,
                cancel_in_flight,
                policy,
                work,
            } = task;
            match work {
                Work::Send(action) => immediate.push(action),
                Work::Dismiss => {
                    tracing::warn!(%scope, "dismiss reached a scope with no presenter; ignoring")
                }
                Work::Cancel(target) => self.cancel(&CancelId { scope, key: target }),
                Work::CancelSubtree => self.cancel_subtree(&scope),
                Work::Run(operation) => {
                    self.start(scope, key, cancel_in_flight, policy, operation)
                }
            }
        }
        immediate
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.running.lock().len()
    }

    /// Operations running at or below `scope`.
    pub(crate) fn in_flight_under(&self, scope: &ScopePath) -> usize {
        self.running
            .lock()
            .values()
            .filter(|running| running.scope.starts_with(scope))
            .count()
    }

    /// Notified whenever an operation finishes or is cancelled.
    pub(crate) fn finished(&self) -> Arc<Notify> {
        Arc::clone(&self.finished)
    }

    pub(crate) fn cancel_all(&mut self) {
        let cancelled = self.take_where(|_| true);
        self.throttles.clear();
        if cancelled > 0 {
            tracing::debug!(cancelled, "cancelled all effects");
        }
    }

    fn start(
        &mut self,
        scope: ScopePath,
        key: Option<EffectKey>,
        cancel_in_flight: bool,
        policy: Policy,
        operation: Operation<A>,
    ) {
        let id = key.map(|key| CancelId {
            scope: scope.clone(),
            key,
        });
        match (policy, id) {
            (Policy::Immediate, id) => {
                if let (true, Some(id)) = (cancel_in_flight, &id) {
                    self.cancel(id);
                }
                self.spawn(scope, id, None, operation);
            }
            (Policy::Debounce(delay), Some(id)) => {
                self.cancel(&id);
                self.spawn(scope, Some(id), Some(delay), operation);
            }
            (Policy::Throttle { window, latest }, Some(id)) => {
                self.throttle(scope, id, window, latest, operation)
            }
            (policy, None) => {
                tracing::warn!(?policy, %scope, "timing policy without an effect key; running now");
                self.spawn(scope, None, None, operation);
            }
        }
    }

    fn throttle(
        &mut self,
        scope: ScopePath,
        id: CancelId,
        window: Duration,
        latest: bool,
        operation: Operation<A>,
    ) {
        let now = Instant::now();
        let current = self
            .throttles
            .get(&id)
            .filter(|throttle| now.saturating_duration_since(throttle.window_start) < window)
            .map(|throttle| (throttle.window_start, throttle.pending));

        let Some((window_start, pending)) = current else {
            self.throttles.insert(
                id.clone(),
                Throttle {
                    window_start: now,
                    pending: None,
                },
            );
            self.spawn(scope, Some(id), None, operation);
            return;
        };

        if !latest {
            tracing::trace!(scope = %id.scope, key = %id.key, "throttled");
            return;
        }
        if let Some(task) = pending {
            self.cancel_task(task);
        }
        let delay = (window_start + window).saturating_duration_since(now);
        let task = self.spawn(scope, Some(id.clone()), Some(delay), operation);
        if let Some(throttle) = self.throttles.get_mut(&id) {
            throttle.pending = Some(task);
        }
    }

    fn spawn(
        &mut self,
        scope: ScopePath,
        id: Option<CancelId>,
        delay: Option<Duration>,
        operation: Operation<A>,
    ) -> u64 {
        let task = self.next_task;
        self.next_task += 1;

        let cancelled = Arc::new(AtomicBool::new(false));
        let sender = {
            let outbox = self.outbox.clone();
            let cancelled = Arc::clone(&cancelled);
            Sender::new(move |action: A| {
                if cancelled.load(Ordering::Acquire) {
                    tracing::trace!("discarding action from cancelled effect");
                    return;
                }
                let envelope = Envelope {
                    action,
                    cancelled: Some(Arc::clone(&cancelled)),
                };
                if outbox.send(envelope).is_err() {
                    tracing::trace!("store dropped; discarding effect action");
                }
            })
        };

        tracing::trace!(task, %scope, ?delay, "starting effect");
        self.running.lock().insert(
            task,
            Running {
                scope,
                id,
                cancelled,
                abort: None,
            },
        );

        let env = self.env.clone();
        let running = Arc::clone(&self.running);
        let finished = Arc::clone(&self.finished);
        let handle = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            operation(env, sender).await;
            running.lock().remove(&task);
            finished.notify_one();
        });

        if let Some(entry) = self.running.lock().get_mut(&task) {
            entry.abort = Some(handle.abort_handle());
        }
        task
    }

    fn cancel(&mut self, id: &CancelId) {
        self.throttles.remove(id);
        let cancelled = self.take_where(|running| running.id.as_ref() == Some(id));
        if cancelled > 0 {
            tracing::debug!(scope = %id.scope, key = %id.key, cancelled, "cancelled effects");
        }
    }

    fn cancel_subtree(&mut self, prefix: &ScopePath) {
        let cancelled = self.take_where(|running| running.scope.starts_with(prefix));
        self.throttles.retain(|id, _| !id.scope.starts_with(prefix));
        if cancelled > 0 {
            tracing::debug!(scope = %prefix, cancelled, "cancelled effects under scope");
        }
    }

    fn cancel_task(&mut self, task: u64) {
        let removed = self.running.lock().remove(&task);
        if let Some(running) = removed {
            running.cancel();
            self.finished.notify_one();
        }
    }

    fn take_where(&mut self, predicate: impl Fn(&Running) -> bool) -> usize {
        let taken: Vec<Running> = {
            let mut running = self.running.lock();
            let tasks: Vec<u64> = running
                .iter()
                .filter(|(_, entry)| predicate(entry))
                .map(|(task, _)| *task)
                .collect();
            tasks
                .iter()
                .filter_map(|task| running.remove(task))
                .collect()
        };
        let count = taken.len();
        for running in taken {
            running.cancel();
        }
        if count > 0 {
            self.finished.notify_one();
        }
        count
    }
}
