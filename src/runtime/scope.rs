//! Combinators that lift child reducers into a parent's state and actions.
//!
//! Every combinator runs the child before the parent, tags the child's
//! effects with the child's [`Segment`], and drops actions addressed to a
//! child that is not currently attached before the parent sees them.

use std::fmt;
use std::sync::Arc;

use super::effect::Effect;
use super::identified::{IdentifiedVec, Identity};
use super::reducer::Reducer;

/// One step of a [`ScopePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(&'static str),
    Case(&'static str),
    Element { collection: &'static str, id: String },
}

impl Segment {
    pub fn element(collection: &'static str, id: &impl Identity) -> Self {
        Segment::Element {
            collection,
            id: id.to_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) | Segment::Case(name) => f.write_str(name),
            Segment::Element { collection, id } => write!(f, "{collection}[{id}]"),
        }
    }
}

/// Structural address of a scope, from the root down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopePath(Vec<Segment>);

impl ScopePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Append `segment` below the current path.
    pub fn child(mut self, segment: Segment) -> Self {
        self.0.push(segment);
        self
    }

    /// Nest the current path under `segment`.
    pub(crate) fn within(mut self, segment: Segment) -> Self {
        self.0.insert(0, segment);
        self
    }

    pub fn starts_with(&self, prefix: &ScopePath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

// -- Field ---------------------------------------------------------------

/// Lens onto a field of the parent state that is always present.
pub struct Field<PS, PA, CS, CA> {
    pub name: &'static str,
    pub state: fn(&mut PS) -> &mut CS,
    pub action: fn(&PA) -> Option<&CA>,
    pub embed: fn(CA) -> PA,
}

pub struct FieldScope<P: Reducer, C: Reducer> {
    parent: P,
    child: C,
    field: Field<P::State, P::Action, C::State, C::Action>,
}

impl<P: Reducer, C: Reducer> FieldScope<P, C> {
    pub fn new(parent: P, field: Field<P::State, P::Action, C::State, C::Action>, child: C) -> Self {
        Self {
            parent,
            child,
            field,
        }
    }
}

impl<P: Reducer, C: Reducer> Reducer for FieldScope<P, C> {
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, state: &mut P::State, action: P::Action) -> Effect<P::Action> {
        let child = match (self.field.action)(&action) {
            Some(child_action) => self
                .child
                .reduce((self.field.state)(state), child_action.clone())
                .scoped(Segment::Field(self.field.name), self.field.embed),
            None => Effect::none(),
        };
        child.and(self.parent.reduce(state, action))
    }
}

// -- Case ----------------------------------------------------------------

/// Lens onto one variant of an enum-shaped parent state.
pub struct Case<PS, PA, CS, CA> {
    pub name: &'static str,
    pub state: fn(&mut PS) -> Option<&mut CS>,
    pub action: fn(&PA) -> Option<&CA>,
    pub embed: fn(CA) -> PA,
}

pub struct IfCaseLet<P: Reducer, C: Reducer> {
    parent: P,
    child: C,
    case: Case<P::State, P::Action, C::State, C::Action>,
}

impl<P: Reducer, C: Reducer> IfCaseLet<P, C> {
    pub fn new(parent: P, case: Case<P::State, P::Action, C::State, C::Action>, child: C) -> Self {
        Self {
            parent,
            child,
            case,
        }
    }
}

impl<P: Reducer, C: Reducer> Reducer for IfCaseLet<P, C> {
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, state: &mut P::State, action: P::Action) -> Effect<P::Action> {
        let name = self.case.name;
        let was_active = (self.case.state)(state).is_some();

        let child = match (self.case.action)(&action) {
            Some(child_action) => match (self.case.state)(state) {
                Some(child_state) => self
                    .child
                    .reduce(child_state, child_action.clone())
                    .scoped(Segment::Case(name), self.case.embed),
                None => {
                    tracing::trace!(case = name, ?action, "dropped action for inactive case");
                    return Effect::none();
                }
            },
            None => Effect::none(),
        };

        let parent = self.parent.reduce(state, action);

        let teardown = if was_active && (self.case.state)(state).is_none() {
            tracing::debug!(case = name, "case detached, cancelling its effects");
            Effect::<C::Action>::cancel_subtree().scoped(Segment::Case(name), self.case.embed)
        } else {
            Effect::none()
        };

        child.and(parent).and(teardown)
    }
}

// -- Presentation --------------------------------------------------------

/// Action addressed to an optional, presented child.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationAction<A> {
    Presented(A),
    Dismiss,
}

/// Optional child state whose identity changes on every presentation.
///
/// Presenting over an existing child replaces it; the replaced child counts
/// as dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationState<S> {
    current: Option<(u64, S)>,
    next_generation: u64,
}

impl<S> Default for PresentationState<S> {
    fn default() -> Self {
        Self {
            current: None,
            next_generation: 0,
        }
    }
}

impl<S> PresentationState<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present `state`, returning its generation.
    pub fn present(&mut self, state: S) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.current = Some((generation, state));
        generation
    }

    pub fn dismiss(&mut self) -> Option<S> {
        self.current.take().map(|(_, state)| state)
    }

    pub fn get(&self) -> Option<&S> {
        self.current.as_ref().map(|(_, state)| state)
    }

    pub fn get_mut(&mut self) -> Option<&mut S> {
        self.current.as_mut().map(|(_, state)| state)
    }

    pub fn is_presented(&self) -> bool {
        self.current.is_some()
    }

    /// Generation of the presented child, if any.
    pub fn generation(&self) -> Option<u64> {
        self.current.as_ref().map(|(generation, _)| *generation)
    }

    fn current_mut(&mut self) -> Option<(u64, &mut S)> {
        self.current
            .as_mut()
            .map(|(generation, state)| (*generation, state))
    }
}

/// Lens onto an optional, presented child, usually a sheet.
pub struct Presented<PS, PA, CS, CA> {
    pub name: &'static str,
    pub state: fn(&mut PS) -> &mut PresentationState<CS>,
    pub action: fn(&PA) -> Option<&PresentationAction<CA>>,
    pub embed: fn(PresentationAction<CA>) -> PA,
}

pub struct IfLet<P: Reducer, C: Reducer> {
    parent: P,
    child: C,
    presented: Presented<P::State, P::Action, C::State, C::Action>,
}

impl<P: Reducer, C: Reducer> IfLet<P, C> {
    pub fn new(
        parent: P,
        presented: Presented<P::State, P::Action, C::State, C::Action>,
        child: C,
    ) -> Self {
        Self {
            parent,
            child,
            presented,
        }
    }
}

impl<P: Reducer, C: Reducer> Reducer for IfLet<P, C> {
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, state: &mut P::State, action: P::Action) -> Effect<P::Action> {
        let name = self.presented.name;
        let embed = self.presented.embed;
        let before = (self.presented.state)(state).generation();

        let child = match (self.presented.action)(&action) {
            Some(PresentationAction::Presented(child_action)) => {
                match (self.presented.state)(state).current_mut() {
                    Some((generation, child_state)) => {
                        self.child.reduce(child_state, child_action.clone()).lift(
                            Segment::element(name, &generation),
                            Arc::new(move |action| embed(PresentationAction::Presented(action))),
                            Some(embed(PresentationAction::Dismiss)),
                        )
                    }
                    None => {
                        tracing::trace!(presentation = name, "dropped action for dismissed child");
                        return Effect::none();
                    }
                }
            }
            Some(PresentationAction::Dismiss) => {
                if (self.presented.state)(state).dismiss().is_none() {
                    tracing::trace!(presentation = name, "dismiss with nothing presented");
                    return Effect::none();
                }
                Effect::none()
            }
            None => Effect::none(),
        };

        let parent = self.parent.reduce(state, action);

        let after = (self.presented.state)(state).generation();
        let teardown = match before {
            Some(generation) if after != Some(generation) => {
                tracing::debug!(presentation = name, generation, "child dismissed, cancelling its effects");
                Effect::<C::Action>::cancel_subtree().scoped(
                    Segment::element(name, &generation),
                    move |action| embed(PresentationAction::Presented(action)),
                )
            }
            _ => Effect::none(),
        };

        child.and(parent).and(teardown)
    }
}

// -- Collection ----------------------------------------------------------

/// Lens onto an identified collection of child states.
pub struct Each<PS, PA, K, CS, CA> {
    pub name: &'static str,
    pub state: fn(&mut PS) -> &mut IdentifiedVec<K, CS>,
    pub action: fn(&PA) -> Option<(&K, &CA)>,
    pub embed: fn(K, CA) -> PA,
}

pub struct ForEach<P: Reducer, C: Reducer, K: Identity> {
    parent: P,
    child: C,
    each: Each<P::State, P::Action, K, C::State, C::Action>,
}

impl<P: Reducer, C: Reducer, K: Identity> ForEach<P, C, K> {
    pub fn new(parent: P, each: Each<P::State, P::Action, K, C::State, C::Action>, child: C) -> Self {
        Self {
            parent,
            child,
            each,
        }
    }
}

impl<P: Reducer, C: Reducer, K: Identity> Reducer for ForEach<P, C, K> {
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, state: &mut P::State, action: P::Action) -> Effect<P::Action> {
        let name = self.each.name;
        let embed = self.each.embed;
        let before = (self.each.state)(state).ids();

        let child = match (self.each.action)(&action) {
            Some((id, child_action)) => {
                let id = id.clone();
                match (self.each.state)(state).get_mut(&id) {
                    Some(element) => {
                        let segment = Segment::element(name, &id);
                        self.child
                            .reduce(element, child_action.clone())
                            .scoped(segment, move |action| embed(id.clone(), action))
                    }
                    None => {
                        tracing::trace!(collection = name, %id, "dropped action for missing element");
                        return Effect::none();
                    }
                }
            }
            None => Effect::none(),
        };

        let parent = self.parent.reduce(state, action);

        let elements = (self.each.state)(state);
        let teardown = Effect::merge(
            before
                .into_iter()
                .filter(|id| !elements.contains(id))
                .map(|id| {
                    tracing::debug!(collection = name, %id, "element removed, cancelling its effects");
                    let segment = Segment::element(name, &id);
                    Effect::<C::Action>::cancel_subtree()
                        .scoped(segment, move |action| embed(id.clone(), action))
                }),
        );

        child.and(parent).and(teardown)
    }
}
