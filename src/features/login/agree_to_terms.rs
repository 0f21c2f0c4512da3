//! Terms agreement screen, first step of sign up.

use crate::runtime::{Action, BindableAction, Binding, Category, Effect, Reducer, State};

/// Terms document the user can open from the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsDocument {
    PersonalAndUsage,
    Service,
    Marketing,
}

impl TermsDocument {
    pub fn url(self) -> &'static str {
        match self {
            TermsDocument::PersonalAndUsage => "https://pokit.app/terms/privacy",
            TermsDocument::Service => "https://pokit.app/terms/service",
            TermsDocument::Marketing => "https://pokit.app/terms/marketing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgreeToTermsState {
    pub all_terms: bool,
    pub personal_and_usage: bool,
    pub service: bool,
    pub marketing: bool,
    pub web_view: Option<TermsDocument>,
}

impl AgreeToTermsState {
    /// Both mandatory terms are agreed.
    pub fn can_proceed(&self) -> bool {
        self.personal_and_usage && self.service
    }
}

impl State for AgreeToTermsState {}

#[derive(Debug, Clone, PartialEq)]
pub enum AgreeToTermsBinding {
    AllTerms(bool),
    PersonalAndUsage(bool),
    Service(bool),
    Marketing(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreeToTermsField {
    AllTerms,
    PersonalAndUsage,
    Service,
    Marketing,
}

impl Binding for AgreeToTermsBinding {
    type State = AgreeToTermsState;
    type Field = AgreeToTermsField;

    fn field(&self) -> AgreeToTermsField {
        match self {
            AgreeToTermsBinding::AllTerms(_) => AgreeToTermsField::AllTerms,
            AgreeToTermsBinding::PersonalAndUsage(_) => AgreeToTermsField::PersonalAndUsage,
            AgreeToTermsBinding::Service(_) => AgreeToTermsField::Service,
            AgreeToTermsBinding::Marketing(_) => AgreeToTermsField::Marketing,
        }
    }

    fn apply(&self, state: &mut AgreeToTermsState) {
        match *self {
            AgreeToTermsBinding::AllTerms(value) => state.all_terms = value,
            AgreeToTermsBinding::PersonalAndUsage(value) => state.personal_and_usage = value,
            AgreeToTermsBinding::Service(value) => state.service = value,
            AgreeToTermsBinding::Marketing(value) => state.marketing = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgreeToTermsAction {
    View(AgreeToTermsView),
    Inner(AgreeToTermsInner),
    Delegate(AgreeToTermsDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgreeToTermsView {
    Binding(AgreeToTermsBinding),
    DocumentTapped(TermsDocument),
    WebViewDismissed,
    NextTapped,
    BackTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgreeToTermsInner {
    /// Recompute the all-terms box from the individual ones.
    CheckAgreements,
    /// Copy the all-terms box into every individual one.
    AllAgreementSelected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgreeToTermsDelegate {
    PushRegisterNicknameView,
}

impl Action for AgreeToTermsAction {
    fn category(&self) -> Category {
        match self {
            AgreeToTermsAction::View(_) => Category::View,
            AgreeToTermsAction::Inner(_) => Category::Inner,
            AgreeToTermsAction::Delegate(_) => Category::Delegate,
        }
    }
}

impl BindableAction for AgreeToTermsAction {
    type Binding = AgreeToTermsBinding;

    fn binding(&self) -> Option<&AgreeToTermsBinding> {
        match self {
            AgreeToTermsAction::View(AgreeToTermsView::Binding(binding)) => Some(binding),
            _ => None,
        }
    }
}

/// Feature logic; compose with `.with_bindings()` so checkbox values are
/// written before the reactions run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgreeToTermsReducer;

impl Reducer for AgreeToTermsReducer {
    type State = AgreeToTermsState;
    type Action = AgreeToTermsAction;

    fn reduce(
        &self,
        state: &mut AgreeToTermsState,
        action: AgreeToTermsAction,
    ) -> Effect<AgreeToTermsAction> {
        match action {
            AgreeToTermsAction::View(view) => self.handle_view(view, state),
            AgreeToTermsAction::Inner(inner) => self.handle_inner(inner, state),
            AgreeToTermsAction::Delegate(_) => Effect::none(),
        }
    }
}

impl AgreeToTermsReducer {
    fn handle_view(
        &self,
        action: AgreeToTermsView,
        state: &mut AgreeToTermsState,
    ) -> Effect<AgreeToTermsAction> {
        match action {
            AgreeToTermsView::Binding(binding) => {
                let reaction = match binding.field() {
                    AgreeToTermsField::AllTerms => AgreeToTermsInner::AllAgreementSelected,
                    AgreeToTermsField::PersonalAndUsage
                    | AgreeToTermsField::Service
                    | AgreeToTermsField::Marketing => AgreeToTermsInner::CheckAgreements,
                };
                Effect::send(AgreeToTermsAction::Inner(reaction))
            }
            AgreeToTermsView::DocumentTapped(document) => {
                state.web_view = Some(document);
                Effect::none()
            }
            AgreeToTermsView::WebViewDismissed => {
                state.web_view = None;
                Effect::none()
            }
            AgreeToTermsView::NextTapped => {
                if !state.can_proceed() {
                    tracing::trace!("mandatory terms not agreed");
                    return Effect::none();
                }
                Effect::send(AgreeToTermsAction::Delegate(
                    AgreeToTermsDelegate::PushRegisterNicknameView,
                ))
            }
            AgreeToTermsView::BackTapped => Effect::dismiss(),
        }
    }

    fn handle_inner(
        &self,
        action: AgreeToTermsInner,
        state: &mut AgreeToTermsState,
    ) -> Effect<AgreeToTermsAction> {
        match action {
            AgreeToTermsInner::CheckAgreements => {
                state.all_terms = state.personal_and_usage && state.service && state.marketing;
            }
            AgreeToTermsInner::AllAgreementSelected => {
                state.personal_and_usage = state.all_terms;
                state.service = state.all_terms;
                state.marketing = state.all_terms;
            }
        }
        Effect::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::BindingReducer;

    fn reducer() -> BindingReducer<AgreeToTermsReducer> {
        AgreeToTermsReducer.with_bindings()
    }

    fn bind(binding: AgreeToTermsBinding) -> AgreeToTermsAction {
        AgreeToTermsAction::View(AgreeToTermsView::Binding(binding))
    }

    #[test]
    fn binding_writes_value_then_reacts() {
        let (state, effect) = reducer().run(
            AgreeToTermsState::default(),
            bind(AgreeToTermsBinding::AllTerms(true)),
        );
        assert!(state.all_terms);
        assert!(!state.service);
        assert_eq!(
            effect.actions(),
            vec![&AgreeToTermsAction::Inner(
                AgreeToTermsInner::AllAgreementSelected
            )]
        );
    }

    #[test]
    fn all_agreement_copies_into_every_box() {
        let state = AgreeToTermsState {
            all_terms: true,
            ..AgreeToTermsState::default()
        };
        let (state, _) = reducer().run(
            state,
            AgreeToTermsAction::Inner(AgreeToTermsInner::AllAgreementSelected),
        );
        assert!(state.personal_and_usage && state.service && state.marketing);
    }

    #[test]
    fn check_agreements_requires_every_box() {
        let state = AgreeToTermsState {
            personal_and_usage: true,
            service: true,
            ..AgreeToTermsState::default()
        };
        let (state, _) = reducer().run(
            state,
            AgreeToTermsAction::Inner(AgreeToTermsInner::CheckAgreements),
        );
        assert!(!state.all_terms);
    }

    #[test]
    fn next_requires_mandatory_terms() {
        let (_, effect) = reducer().run(
            AgreeToTermsState {
                service: true,
                ..AgreeToTermsState::default()
            },
            AgreeToTermsAction::View(AgreeToTermsView::NextTapped),
        );
        assert!(effect.is_none());

        let (_, effect) = reducer().run(
            AgreeToTermsState {
                service: true,
                personal_and_usage: true,
                ..AgreeToTermsState::default()
            },
            AgreeToTermsAction::View(AgreeToTermsView::NextTapped),
        );
        assert_eq!(
            effect.actions(),
            vec![&AgreeToTermsAction::Delegate(
                AgreeToTermsDelegate::PushRegisterNicknameView
            )]
        );
    }

    #[test]
    fn back_requests_dismiss() {
        let (_, effect) = reducer().run(
            AgreeToTermsState::default(),
            AgreeToTermsAction::View(AgreeToTermsView::BackTapped),
        );
        assert!(effect.requests_dismiss());
    }
}
