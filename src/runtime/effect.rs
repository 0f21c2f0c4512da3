//! Deferred side effects returned by reducers.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::environment::{ClientError, Environment};

use super::action::Action;
use super::scope::{ScopePath, Segment};

/// Name of a cancellation group.
///
/// Keys are local to the scope that issues them: the same key used by two
/// stack elements names two independent groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectKey(Cow<'static, str>);

impl EffectKey {
    pub const fn new(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    pub fn dynamic(key: impl Into<String>) -> Self {
        Self(Cow::Owned(key.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When a keyed operation is allowed to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Immediate,
    /// Start after `Duration` without another request under the same key.
    Debounce(Duration),
    /// Start the first request of each window; later requests are dropped,
    /// or deferred to the end of the window when `latest` is set.
    Throttle { window: Duration, latest: bool },
}

/// Handle through which a running operation feeds actions back.
pub struct Sender<A> {
    emit: Arc<dyn Fn(A) + Send + Sync>,
    dismiss: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl<A> Clone for Sender<A> {
    fn clone(&self) -> Self {
        Self {
            emit: Arc::clone(&self.emit),
            dismiss: self.dismiss.clone(),
        }
    }
}

impl<A: Action> Sender<A> {
    pub(crate) fn new(emit: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self {
            emit: Arc::new(emit),
            dismiss: None,
        }
    }

    /// Deliver `action` to the scope that started the operation.
    pub fn send(&self, action: A) {
        (self.emit)(action)
    }

    /// Ask the nearest presenting scope to detach the sender's screen.
    pub fn dismiss(&self) {
        match &self.dismiss {
            Some(dismiss) => dismiss(),
            None => tracing::warn!("dismiss requested outside of a dismissable scope"),
        }
    }

    fn scoped<C: Action>(
        &self,
        embed: Arc<dyn Fn(C) -> A + Send + Sync>,
        dismiss: Option<A>,
    ) -> Sender<C> {
        let emit = Arc::clone(&self.emit);
        let dismiss: Option<Arc<dyn Fn() + Send + Sync>> = match dismiss {
            Some(action) => {
                let emit = Arc::clone(&self.emit);
                Some(Arc::new(move || emit(action.clone())))
            }
            None => self.dismiss.clone(),
        };
        Sender {
            emit: Arc::new(move |action: C| emit(embed(action))),
            dismiss,
        }
    }
}

pub(crate) type Operation<A> =
    Box<dyn FnOnce(Environment, Sender<A>) -> BoxFuture<'static, ()> + Send>;

pub(crate) enum Work<A> {
    Send(A),
    Run(Operation<A>),
    Dismiss,
    Cancel(EffectKey),
    CancelSubtree,
}

pub(crate) struct Task<A> {
    pub(crate) scope: ScopePath,
    pub(crate) key: Option<EffectKey>,
    pub(crate) cancel_in_flight: bool,
    pub(crate) policy: Policy,
    pub(crate) work: Work<A>,
}

/// Work a reducer asks the store to perform after the current reduce.
///
/// Effects are values: a reducer returns them, combinators lift them into
/// the parent's action space, and the store schedules them. Nothing runs
/// until the store has finished the reduce that produced them.
#[must_use = "effects do nothing unless returned to the store"]
pub struct Effect<A> {
    tasks: Vec<Task<A>>,
}

impl<A: Action> Effect<A> {
    pub fn none() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Dispatch `action` right after the current one, before any action
    /// produced by a running operation.
    pub fn send(action: A) -> Self {
        Self::single(Work::Send(action))
    }

    /// Start an asynchronous operation that may send any number of actions.
    pub fn run<F, Fut>(operation: F) -> Self
    where
        F: FnOnce(Environment, Sender<A>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::single(Work::Run(Box::new(
            move |env: Environment, send: Sender<A>| -> BoxFuture<'static, ()> {
                operation(env, send).boxed()
            },
        )))
    }

    /// Like [`Effect::run`], mapping a failure into an action with `catch`.
    pub fn try_run<F, Fut, C>(operation: F, catch: C) -> Self
    where
        F: FnOnce(Environment, Sender<A>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ClientError>> + Send + 'static,
        C: FnOnce(ClientError) -> A + Send + 'static,
    {
        Self::run(move |env, send: Sender<A>| async move {
            if let Err(error) = operation(env, send.clone()).await {
                tracing::debug!(%error, "effect failed");
                send.send(catch(error));
            }
        })
    }

    /// Single request whose outcome becomes exactly one action.
    pub fn task<F, Fut, C>(operation: F, catch: C) -> Self
    where
        F: FnOnce(Environment) -> Fut + Send + 'static,
        Fut: Future<Output = Result<A, ClientError>> + Send + 'static,
        C: FnOnce(ClientError) -> A + Send + 'static,
    {
        Self::run(move |env, send: Sender<A>| async move {
            match operation(env).await {
                Ok(action) => send.send(action),
                Err(error) => {
                    tracing::debug!(%error, "effect failed");
                    send.send(catch(error));
                }
            }
        })
    }

    /// Detach the current screen from whoever presented it.
    pub fn dismiss() -> Self {
        Self::single(Work::Dismiss)
    }

    /// Cancel every operation started under `key` in the current scope.
    pub fn cancel(key: EffectKey) -> Self {
        Self::single(Work::Cancel(key))
    }

    pub(crate) fn cancel_subtree() -> Self {
        Self::single(Work::CancelSubtree)
    }

    pub fn merge(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        Self {
            tasks: effects.into_iter().flat_map(|effect| effect.tasks).collect(),
        }
    }

    pub fn and(mut self, other: Effect<A>) -> Self {
        self.tasks.extend(other.tasks);
        self
    }

    /// Cancel any operation still running under `key` before starting.
    pub fn cancellable(self, key: EffectKey) -> Self {
        self.identify(key, true, None)
    }

    /// Group under `key` for cancellation while allowing overlap.
    pub fn cancellable_overlapping(self, key: EffectKey) -> Self {
        self.identify(key, false, None)
    }

    pub fn debounce(self, key: EffectKey, delay: Duration) -> Self {
        self.identify(key, true, Some(Policy::Debounce(delay)))
    }

    pub fn throttle(self, key: EffectKey, window: Duration, latest: bool) -> Self {
        self.identify(key, false, Some(Policy::Throttle { window, latest }))
    }

    /// Re-address this effect from a child scope into its parent.
    pub fn scoped<P: Action>(
        self,
        segment: Segment,
        embed: impl Fn(A) -> P + Send + Sync + 'static,
    ) -> Effect<P> {
        self.lift(segment, Arc::new(embed), None)
    }

    /// Same as [`Effect::scoped`]; a dismiss request becomes `dismiss`.
    pub(crate) fn lift<P: Action>(
        self,
        segment: Segment,
        embed: Arc<dyn Fn(A) -> P + Send + Sync>,
        dismiss: Option<P>,
    ) -> Effect<P> {
        let tasks = self
            .tasks
            .into_iter()
            .map(|task| {
                let work = match task.work {
                    Work::Send(action) => Work::Send(embed(action)),
                    Work::Run(operation) => {
                        let embed = Arc::clone(&embed);
                        let dismiss = dismiss.clone();
                        Work::Run(Box::new(
                            move |env: Environment, parent: Sender<P>| -> BoxFuture<'static, ()> {
                                operation(env, parent.scoped(embed, dismiss))
                            },
                        ))
                    }
                    Work::Dismiss => match &dismiss {
                        Some(action) => Work::Send(action.clone()),
                        None => Work::Dismiss,
                    },
                    Work::Cancel(key) => Work::Cancel(key),
                    Work::CancelSubtree => Work::CancelSubtree,
                };
                Task {
                    scope: task.scope.within(segment.clone()),
                    key: task.key,
                    cancel_in_flight: task.cancel_in_flight,
                    policy: task.policy,
                    work,
                }
            })
            .collect();
        Effect { tasks }
    }

    pub fn is_none(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Actions this effect dispatches synchronously, in order.
    pub fn actions(&self) -> Vec<&A> {
        self.tasks
            .iter()
            .filter_map(|task| match &task.work {
                Work::Send(action) => Some(action),
                _ => None,
            })
            .collect()
    }

    /// Number of asynchronous operations this effect starts.
    pub fn operations(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| matches!(task.work, Work::Run(_)))
            .count()
    }

    pub fn requests_dismiss(&self) -> bool {
        self.tasks
            .iter()
            .any(|task| matches!(task.work, Work::Dismiss))
    }

    /// Whether an operation of this effect is keyed by `key`.
    pub fn is_keyed(&self, key: &EffectKey) -> bool {
        self.tasks
            .iter()
            .any(|task| matches!(task.work, Work::Run(_)) && task.key.as_ref() == Some(key))
    }

    pub(crate) fn into_tasks(self) -> Vec<Task<A>> {
        self.tasks
    }

    fn single(work: Work<A>) -> Self {
        Self {
            tasks: vec![Task {
                scope: ScopePath::root(),
                key: None,
                cancel_in_flight: false,
                policy: Policy::Immediate,
                work,
            }],
        }
    }

    fn identify(self, key: EffectKey, cancel_in_flight: bool, policy: Option<Policy>) -> Self {
        let tasks = self
            .tasks
            .into_iter()
            .map(|task| {
                let work = match task.work {
                    Work::Send(action) if policy.is_some() => Work::Run(deferred_send(action)),
                    work => work,
                };
                if !matches!(work, Work::Run(_)) {
                    return Task { work, ..task };
                }
                Task {
                    scope: task.scope,
                    key: Some(key.clone()),
                    cancel_in_flight,
                    policy: policy.unwrap_or(task.policy),
                    work,
                }
            })
            .collect();
        Self { tasks }
    }
}

impl<A: Action> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for task in &self.tasks {
            match &task.work {
                Work::Send(action) => list.entry(&format_args!("send({action:?})")),
                Work::Run(_) => match &task.key {
                    Some(key) => list.entry(&format_args!("run[{key}] {:?}", task.policy)),
                    None => list.entry(&format_args!("run")),
                },
                Work::Dismiss => list.entry(&format_args!("dismiss")),
                Work::Cancel(key) => list.entry(&format_args!("cancel({key})")),
                Work::CancelSubtree => list.entry(&format_args!("cancel({})", task.scope)),
            };
        }
        list.finish()
    }
}

fn deferred_send<A: Action>(action: A) -> Operation<A> {
    Box::new(
        move |_env: Environment, send: Sender<A>| -> BoxFuture<'static, ()> {
            async move { send.send(action) }.boxed()
        },
    )
}
