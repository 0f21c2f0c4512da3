//! Single serialization point of the runtime.

use std::collections::VecDeque;

use tokio::sync::{mpsc, watch};

use crate::environment::Environment;
use crate::shutdown::ShutdownHandle;

use super::action::Action;
use super::reducer::Reducer;
use super::scheduler::{Envelope, Scheduler};
use super::scope::ScopePath;

/// Owns the root state and applies one action at a time.
///
/// Actions emitted synchronously while an action is being reduced are
/// queued and applied, in order, before [`Store::send`] returns. Only then
/// is the new state published to subscribers, once per `send`. Actions
/// produced by running effects arrive through a channel and are applied by
/// [`Store::settle`] or [`Store::run`].
pub struct Store<R: Reducer> {
    reducer: R,
    state: R::State,
    queue: VecDeque<R::Action>,
    scheduler: Scheduler<R::Action>,
    inbox: mpsc::UnboundedReceiver<Envelope<R::Action>>,
    outbox: mpsc::UnboundedSender<Envelope<R::Action>>,
    observers: watch::Sender<R::State>,
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State, reducer: R, env: Environment) -> Self {
        let (outbox, inbox) = mpsc::unbounded_channel();
        let (observers, _) = watch::channel(initial.clone());
        Self {
            reducer,
            state: initial,
            queue: VecDeque::new(),
            scheduler: Scheduler::new(env, outbox.clone()),
            inbox,
            outbox,
            observers,
        }
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// Receiver notified with a snapshot after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.observers.subscribe()
    }

    /// Cloneable entry point for actions coming from other tasks.
    pub fn handle(&self) -> StoreHandle<R::Action> {
        StoreHandle {
            outbox: self.outbox.clone(),
        }
    }

    /// Number of effects currently running or waiting on a timer.
    pub fn in_flight(&self) -> usize {
        self.scheduler.in_flight()
    }

    pub fn in_flight_under(&self, scope: &ScopePath) -> usize {
        self.scheduler.in_flight_under(scope)
    }

    /// Apply `action` and every action it synchronously leads to.
    pub fn send(&mut self, action: R::Action) {
        self.queue.push_back(action);
        while let Some(action) = self.queue.pop_front() {
            let category = action.category();
            let _span = tracing::debug_span!("dispatch", ?category).entered();
            tracing::trace!(?action, "reducing");
            let effect = self.reducer.reduce(&mut self.state, action);
            let follow_ups = self.scheduler.schedule(effect);
            self.queue.extend(follow_ups);
        }
        self.observers.send_replace(self.state.clone());
    }

    /// Apply effect output until no effect is running and nothing is queued.
    ///
    /// Never returns while an effect keeps running, so it is meant for
    /// scripted flows and tests rather than for the application loop.
    pub async fn settle(&mut self) {
        let finished = self.scheduler.finished();
        loop {
            while let Ok(envelope) = self.inbox.try_recv() {
                self.accept(envelope);
            }
            if self.scheduler.in_flight() == 0 {
                // Operations enqueue their last action before deregistering.
                match self.inbox.try_recv() {
                    Ok(envelope) => {
                        self.accept(envelope);
                        continue;
                    }
                    Err(_) => break,
                }
            }
            let next = tokio::select! {
                envelope = self.inbox.recv() => envelope,
                _ = finished.notified() => None,
            };
            if let Some(envelope) = next {
                self.accept(envelope);
            }
        }
    }

    /// Apply actions as they arrive until `shutdown` is signalled, then
    /// cancel every running effect and hand back the final state.
    pub async fn run(mut self, shutdown: ShutdownHandle) -> R::State {
        tracing::info!("store loop started");
        loop {
            let next = tokio::select! {
                _ = shutdown.wait() => None,
                envelope = self.inbox.recv() => envelope,
            };
            match next {
                Some(envelope) => self.accept(envelope),
                None => break,
            }
        }
        self.scheduler.cancel_all();
        tracing::info!("store loop stopped");
        self.state
    }

    fn accept(&mut self, envelope: Envelope<R::Action>) {
        if envelope.is_stale() {
            tracing::trace!(action = ?envelope.action, "dropping action from cancelled effect");
            return;
        }
        self.send(envelope.action);
    }
}

/// Sends actions into a [`Store`] from outside its owner.
pub struct StoreHandle<A> {
    outbox: mpsc::UnboundedSender<Envelope<A>>,
}

impl<A> Clone for StoreHandle<A> {
    fn clone(&self) -> Self {
        Self {
            outbox: self.outbox.clone(),
        }
    }
}

impl<A: Action> StoreHandle<A> {
    /// Queue `action`; returns `false` once the store is gone.
    pub fn send(&self, action: A) -> bool {
        self.outbox.send(Envelope::external(action)).is_ok()
    }
}
