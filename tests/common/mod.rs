//! Shared test features, lenses and mock collaborators.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use pokit::domain::{Category, ContentPage, Pageable, SocialLoginInfo, SocialProvider, SignUpRequest, User};
use pokit::environment::{AuthClient, CategoryClient, ClientError, Environment, UserClient};
use pokit::runtime::{
    Action, Case, Category as ActionCategory, Each, Effect, EffectKey, Field, Identifiable,
    IdentifiedVec, PresentationAction, PresentationState, Presented, Reducer, Stack, StackAction,
    StackState, State,
};

pub const TIMER: EffectKey = EffectKey::new("counter.timer");
pub const DEBOUNCE: EffectKey = EffectKey::new("counter.debounce");
pub const THROTTLE: EffectKey = EffectKey::new("counter.throttle");

/// Window used by the debounced and throttled counter actions.
pub const WINDOW: Duration = Duration::from_millis(300);

// -- Counter feature -------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CounterState {
    pub id: u64,
    pub count: i64,
}

impl CounterState {
    pub fn with_id(id: u64) -> Self {
        Self { id, count: 0 }
    }
}

impl State for CounterState {}

impl Identifiable for CounterState {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CounterAction {
    Increment,
    Add(i64),
    /// Adds one after `millis`, keyed by [`TIMER`].
    StartTimer { millis: u64 },
    /// Adds one right away, then keeps running.
    Burst,
    CancelTimer,
    CancelThrottle,
    Debounced(i64),
    Throttled { amount: i64, latest: bool },
    Close,
}

impl Action for CounterAction {
    fn category(&self) -> ActionCategory {
        match self {
            CounterAction::Add(_) => ActionCategory::Inner,
            CounterAction::StartTimer { .. }
            | CounterAction::Burst
            | CounterAction::Debounced(_)
            | CounterAction::Throttled { .. } => ActionCategory::Async,
            CounterAction::Increment
            | CounterAction::CancelTimer
            | CounterAction::CancelThrottle
            | CounterAction::Close => ActionCategory::View,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(&self, state: &mut CounterState, action: CounterAction) -> Effect<CounterAction> {
        match action {
            CounterAction::Increment => {
                state.count += 1;
                Effect::none()
            }
            CounterAction::Add(amount) => {
                state.count += amount;
                Effect::none()
            }
            CounterAction::StartTimer { millis } => Effect::run(move |_env, send| async move {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                send.send(CounterAction::Add(1));
            })
            .cancellable(TIMER),
            CounterAction::Burst => Effect::run(|_env, send| async move {
                send.send(CounterAction::Add(1));
                tokio::time::sleep(Duration::from_secs(3600)).await;
            })
            .cancellable(TIMER),
            CounterAction::CancelTimer => Effect::cancel(TIMER),
            CounterAction::CancelThrottle => Effect::cancel(THROTTLE),
            CounterAction::Debounced(amount) => {
                Effect::send(CounterAction::Add(amount)).debounce(DEBOUNCE, WINDOW)
            }
            CounterAction::Throttled { amount, latest } => {
                Effect::send(CounterAction::Add(amount)).throttle(THROTTLE, WINDOW, latest)
            }
            CounterAction::Close => Effect::dismiss(),
        }
    }
}

// -- Parent with one child per combinator ----------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParentState {
    pub left: CounterState,
    pub right: CounterState,
    pub sheet: PresentationState<CounterState>,
    pub rows: IdentifiedVec<u64, CounterState>,
    pub stack: StackState<CounterState>,
    pub log: Vec<String>,
    /// Child increments the parent has reacted to.
    pub tally: u32,
}

impl State for ParentState {}

#[derive(Debug, Clone, PartialEq)]
pub enum ParentAction {
    Left(CounterAction),
    Right(CounterAction),
    Sheet(PresentationAction<CounterAction>),
    Row(u64, CounterAction),
    Stack(StackAction<CounterState, CounterAction>),
    OpenSheet,
    RemoveRow(u64),
}

impl Action for ParentAction {
    fn category(&self) -> ActionCategory {
        match self {
            ParentAction::OpenSheet | ParentAction::RemoveRow(_) => ActionCategory::View,
            _ => ActionCategory::Child,
        }
    }
}

/// Parent logic: records what it saw, owns sheet and row lifetimes, and
/// answers every increment from a sheet, row or stack element by adding
/// one to `left`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentCore;

impl Reducer for ParentCore {
    type State = ParentState;
    type Action = ParentAction;

    fn reduce(&self, state: &mut ParentState, action: ParentAction) -> Effect<ParentAction> {
        state.log.push(format!("{action:?}"));
        match action {
            ParentAction::OpenSheet => {
                state.sheet.present(CounterState::default());
                Effect::none()
            }
            ParentAction::RemoveRow(id) => {
                state.rows.remove(&id);
                Effect::none()
            }
            ParentAction::Sheet(PresentationAction::Presented(CounterAction::Increment))
            | ParentAction::Row(_, CounterAction::Increment)
            | ParentAction::Stack(StackAction::Element {
                action: CounterAction::Increment,
                ..
            }) => {
                state.tally += 1;
                Effect::send(ParentAction::Left(CounterAction::Add(1)))
            }
            _ => Effect::none(),
        }
    }
}

fn left_state(state: &mut ParentState) -> &mut CounterState {
    &mut state.left
}

fn left_action(action: &ParentAction) -> Option<&CounterAction> {
    match action {
        ParentAction::Left(action) => Some(action),
        _ => None,
    }
}

fn right_state(state: &mut ParentState) -> &mut CounterState {
    &mut state.right
}

fn right_action(action: &ParentAction) -> Option<&CounterAction> {
    match action {
        ParentAction::Right(action) => Some(action),
        _ => None,
    }
}

fn sheet_state(state: &mut ParentState) -> &mut PresentationState<CounterState> {
    &mut state.sheet
}

fn sheet_action(action: &ParentAction) -> Option<&PresentationAction<CounterAction>> {
    match action {
        ParentAction::Sheet(action) => Some(action),
        _ => None,
    }
}

fn rows_state(state: &mut ParentState) -> &mut IdentifiedVec<u64, CounterState> {
    &mut state.rows
}

fn row_action(action: &ParentAction) -> Option<(&u64, &CounterAction)> {
    match action {
        ParentAction::Row(id, action) => Some((id, action)),
        _ => None,
    }
}

fn stack_state(state: &mut ParentState) -> &mut StackState<CounterState> {
    &mut state.stack
}

fn stack_action(action: &ParentAction) -> Option<&StackAction<CounterState, CounterAction>> {
    match action {
        ParentAction::Stack(action) => Some(action),
        _ => None,
    }
}

pub fn left() -> Field<ParentState, ParentAction, CounterState, CounterAction> {
    Field {
        name: "left",
        state: left_state,
        action: left_action,
        embed: ParentAction::Left,
    }
}

pub fn right() -> Field<ParentState, ParentAction, CounterState, CounterAction> {
    Field {
        name: "right",
        state: right_state,
        action: right_action,
        embed: ParentAction::Right,
    }
}

pub fn sheet() -> Presented<ParentState, ParentAction, CounterState, CounterAction> {
    Presented {
        name: "sheet",
        state: sheet_state,
        action: sheet_action,
        embed: ParentAction::Sheet,
    }
}

pub fn rows() -> Each<ParentState, ParentAction, u64, CounterState, CounterAction> {
    Each {
        name: "rows",
        state: rows_state,
        action: row_action,
        embed: ParentAction::Row,
    }
}

pub fn stack() -> Stack<ParentState, ParentAction, CounterState, CounterAction> {
    Stack {
        name: "stack",
        state: stack_state,
        action: stack_action,
        embed: ParentAction::Stack,
    }
}

/// Every combinator stacked on [`ParentCore`].
pub fn parent() -> impl Reducer<State = ParentState, Action = ParentAction> {
    ParentCore
        .scope(left(), CounterReducer)
        .scope(right(), CounterReducer)
        .if_let(sheet(), CounterReducer)
        .for_each(rows(), CounterReducer)
        .for_each_stack(stack(), CounterReducer)
}

// -- Enum-shaped parent ----------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ModeState {
    First(CounterState),
    Second(CounterState),
}

impl State for ModeState {}

#[derive(Debug, Clone, PartialEq)]
pub enum ModeAction {
    First(CounterAction),
    Second(CounterAction),
    SwitchToSecond,
}

impl Action for ModeAction {
    fn category(&self) -> ActionCategory {
        match self {
            ModeAction::SwitchToSecond => ActionCategory::View,
            ModeAction::First(_) | ModeAction::Second(_) => ActionCategory::Child,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModeCore;

impl Reducer for ModeCore {
    type State = ModeState;
    type Action = ModeAction;

    fn reduce(&self, state: &mut ModeState, action: ModeAction) -> Effect<ModeAction> {
        match action {
            ModeAction::SwitchToSecond => *state = ModeState::Second(CounterState::default()),
            // An increment in the second mode falls back to a fresh first mode.
            ModeAction::Second(CounterAction::Increment) => {
                *state = ModeState::First(CounterState::default())
            }
            _ => {}
        }
        Effect::none()
    }
}

fn first_state(state: &mut ModeState) -> Option<&mut CounterState> {
    match state {
        ModeState::First(counter) => Some(counter),
        ModeState::Second(_) => None,
    }
}

fn first_action(action: &ModeAction) -> Option<&CounterAction> {
    match action {
        ModeAction::First(action) => Some(action),
        _ => None,
    }
}

fn second_state(state: &mut ModeState) -> Option<&mut CounterState> {
    match state {
        ModeState::Second(counter) => Some(counter),
        ModeState::First(_) => None,
    }
}

fn second_action(action: &ModeAction) -> Option<&CounterAction> {
    match action {
        ModeAction::Second(action) => Some(action),
        _ => None,
    }
}

pub fn mode() -> impl Reducer<State = ModeState, Action = ModeAction> {
    ModeCore
        .if_case_let(
            Case {
                name: "first",
                state: first_state,
                action: first_action,
                embed: ModeAction::First,
            },
            CounterReducer,
        )
        .if_case_let(
            Case {
                name: "second",
                state: second_state,
                action: second_action,
                embed: ModeAction::Second,
            },
            CounterReducer,
        )
}

// -- Mock collaborators ------------------------------------------------------

/// Auth client answering from fixed values.
pub struct MockAuth {
    pub auto_login: Result<bool, ClientError>,
    pub registered: bool,
    pub sign_ups: Mutex<Vec<SignUpRequest>>,
}

impl MockAuth {
    pub fn new(auto_login: Result<bool, ClientError>) -> Self {
        Self {
            auto_login,
            registered: false,
            sign_ups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuthClient for MockAuth {
    async fn social_login(&self, provider: SocialProvider) -> Result<SocialLoginInfo, ClientError> {
        Ok(SocialLoginInfo {
            provider,
            id_token: "id-token".to_string(),
            auth_code: None,
            registered: self.registered,
        })
    }

    async fn auto_login(&self) -> Result<bool, ClientError> {
        self.auto_login.clone()
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<User, ClientError> {
        let user = User {
            id: 1,
            email: "test@pokit.app".to_string(),
            nickname: request.nickname.clone(),
        };
        self.sign_ups.lock().push(request);
        Ok(user)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        Ok(())
    }

    async fn withdraw(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

/// User client treating a fixed set of nicknames as taken.
pub struct MockUser {
    pub taken: Vec<String>,
    pub checks: Mutex<Vec<String>>,
}

impl MockUser {
    pub fn new(taken: &[&str]) -> Self {
        Self {
            taken: taken.iter().map(|name| name.to_string()).collect(),
            checks: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserClient for MockUser {
    async fn fetch_user(&self) -> Result<User, ClientError> {
        Err(ClientError::Unauthorized)
    }

    async fn is_nickname_duplicated(&self, nickname: &str) -> Result<bool, ClientError> {
        self.checks.lock().push(nickname.to_string());
        Ok(self.taken.iter().any(|taken| taken == nickname))
    }

    async fn update_nickname(&self, _nickname: &str) -> Result<User, ClientError> {
        Err(ClientError::Unauthorized)
    }
}

/// Category client recording deletions; content pages take `delay`.
pub struct MockCategory {
    pub categories: Vec<Category>,
    pub delay: Duration,
    pub deleted: Mutex<Vec<u64>>,
}

impl MockCategory {
    pub fn new(categories: Vec<Category>, delay: Duration) -> Self {
        Self {
            categories,
            delay,
            deleted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CategoryClient for MockCategory {
    async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        Ok(self.categories.clone())
    }

    async fn category_contents(
        &self,
        _category_id: u64,
        page: Pageable,
    ) -> Result<ContentPage, ClientError> {
        tokio::time::sleep(self.delay).await;
        Ok(ContentPage {
            items: Vec::new(),
            page: page.page,
            has_next: false,
        })
    }

    async fn delete_category(&self, category_id: u64) -> Result<(), ClientError> {
        self.deleted.lock().push(category_id);
        Ok(())
    }
}

pub fn category(id: u64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        image_url: None,
        content_count: 0,
    }
}

/// Environment refusing everything except the given auth client.
pub fn env_with_auth(auth: MockAuth) -> Environment {
    Environment::unimplemented().with_auth(Arc::new(auth))
}
