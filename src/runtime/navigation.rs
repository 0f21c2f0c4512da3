//! Navigation stack of heterogeneous screen states.

use std::fmt;
use std::sync::Arc;

use super::effect::Effect;
use super::identified::IdentifiedVec;
use super::reducer::Reducer;
use super::scope::Segment;

/// Identity of a pushed screen.
///
/// The slot is the depth the element was pushed at; the generation is unique
/// for the lifetime of the stack, so an id never refers to a later element
/// that happens to occupy the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackElementId {
    slot: usize,
    generation: u64,
}

impl StackElementId {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for StackElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.slot, self.generation)
    }
}

/// Ordered stack of screen states.
#[derive(Debug, Clone, PartialEq)]
pub struct StackState<S> {
    elements: IdentifiedVec<StackElementId, S>,
    next_generation: u64,
}

impl<S> Default for StackState<S> {
    fn default() -> Self {
        Self {
            elements: IdentifiedVec::default(),
            next_generation: 0,
        }
    }
}

impl<S> StackState<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: S) -> StackElementId {
        let id = StackElementId {
            slot: self.elements.len(),
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.elements.insert(id, state);
        id
    }

    pub fn pop_last(&mut self) -> Option<S> {
        self.elements.pop_last().map(|(_, state)| state)
    }

    /// Remove `id` and everything pushed above it.
    pub fn pop_from(&mut self, id: &StackElementId) -> Vec<S> {
        match self.elements.position(id) {
            Some(index) => self
                .elements
                .split_off(index)
                .into_iter()
                .map(|(_, state)| state)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn pop_to_root(&mut self) -> Vec<S> {
        self.elements
            .split_off(0)
            .into_iter()
            .map(|(_, state)| state)
            .collect()
    }

    /// Remove only `id`, leaving elements above it in place.
    pub fn remove(&mut self, id: &StackElementId) -> Option<S> {
        self.elements.remove(id)
    }

    pub fn remove_all(&mut self, predicate: impl FnMut(&S) -> bool) -> usize {
        self.elements.remove_where(predicate)
    }

    pub fn get(&self, id: &StackElementId) -> Option<&S> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &StackElementId) -> Option<&mut S> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: &StackElementId) -> bool {
        self.elements.contains(id)
    }

    pub fn ids(&self) -> Vec<StackElementId> {
        self.elements.ids()
    }

    pub fn last(&self) -> Option<&S> {
        self.elements.last().map(|(_, state)| state)
    }

    pub fn last_id(&self) -> Option<StackElementId> {
        self.elements.last().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StackElementId, &S)> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Action addressed to a navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub enum StackAction<S, A> {
    Element { id: StackElementId, action: A },
    PopFrom { id: StackElementId },
    Push { state: S },
}

/// Lens onto a navigation stack inside the parent state.
pub struct Stack<PS, PA, CS, CA> {
    pub name: &'static str,
    pub state: fn(&mut PS) -> &mut StackState<CS>,
    pub action: fn(&PA) -> Option<&StackAction<CS, CA>>,
    pub embed: fn(StackAction<CS, CA>) -> PA,
}

/// Runs `child` on the element an action addresses and keeps the stack's
/// effects in step with its elements.
///
/// A child asking to be dismissed is turned into `PopFrom` for its own id.
/// Every element that disappears during a dispatch, whoever removed it, has
/// its effects cancelled in that same dispatch.
pub struct ForEachStack<P: Reducer, C: Reducer> {
    parent: P,
    child: C,
    stack: Stack<P::State, P::Action, C::State, C::Action>,
}

impl<P: Reducer, C: Reducer> ForEachStack<P, C> {
    pub fn new(parent: P, stack: Stack<P::State, P::Action, C::State, C::Action>, child: C) -> Self {
        Self {
            parent,
            child,
            stack,
        }
    }
}

impl<P: Reducer, C: Reducer> Reducer for ForEachStack<P, C> {
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, state: &mut P::State, action: P::Action) -> Effect<P::Action> {
        let name = self.stack.name;
        let embed = self.stack.embed;
        let before = (self.stack.state)(state).ids();

        let child = match (self.stack.action)(&action) {
            Some(StackAction::Element {
                id,
                action: child_action,
            }) => {
                let id = *id;
                match (self.stack.state)(state).get_mut(&id) {
                    Some(element) => self.child.reduce(element, child_action.clone()).lift(
                        Segment::element(name, &id),
                        Arc::new(move |action| embed(StackAction::Element { id, action })),
                        Some(embed(StackAction::PopFrom { id })),
                    ),
                    None => {
                        tracing::trace!(stack = name, %id, "dropped action for popped element");
                        return Effect::none();
                    }
                }
            }
            Some(StackAction::PopFrom { id }) => {
                let popped = (self.stack.state)(state).pop_from(id);
                if popped.is_empty() {
                    tracing::trace!(stack = name, %id, "pop from unknown element");
                }
                Effect::none()
            }
            Some(StackAction::Push { state: element }) => {
                let element = element.clone();
                let id = (self.stack.state)(state).push(element);
                tracing::debug!(stack = name, %id, "pushed element");
                Effect::none()
            }
            None => Effect::none(),
        };

        let parent = self.parent.reduce(state, action);

        let elements = (self.stack.state)(state);
        let teardown = Effect::merge(
            before
                .into_iter()
                .filter(|id| !elements.contains(id))
                .map(|id| {
                    tracing::debug!(stack = name, %id, "element popped, cancelling its effects");
                    Effect::<C::Action>::cancel_subtree().scoped(
                        Segment::element(name, &id),
                        move |action| embed(StackAction::Element { id, action }),
                    )
                }),
        );

        child.and(parent).and(teardown)
    }
}
