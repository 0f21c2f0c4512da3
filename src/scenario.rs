//! Scripted walks through the feature tree for the demo binary.
//!
//! A step looks at the settled state and produces the next action, so steps
//! can address screens by the stack ids they were given at runtime.

use clap::ValueEnum;

use pokit::features::category_detail::{CategoryDetailAction, CategoryDetailView};
use pokit::features::intro::{IntroAction, IntroState};
use pokit::features::login::agree_to_terms::{
    AgreeToTermsAction, AgreeToTermsBinding, AgreeToTermsView,
};
use pokit::features::login::register_nickname::{
    RegisterNicknameAction, RegisterNicknameBinding, RegisterNicknameView,
};
use pokit::features::login::select_field::{SelectFieldAction, SelectFieldView};
use pokit::features::login::sign_up_done::{SignUpDoneAction, SignUpDoneView};
use pokit::features::login::{LoginPathAction, LoginRootAction, LoginRootView};
use pokit::features::main_tab::{MainTabAction, MainTabPath, MainTabPathAction, MainTabState};
use pokit::features::pokit_root::{PokitRootAction, PokitRootView};
use pokit::features::remind::{RemindAction, RemindView};
use pokit::features::splash::{SplashAction, SplashView};
use pokit::features::{RootAction, RootState};
use pokit::runtime::StackAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Launch, then browse the first category when signed in.
    Launch,
    /// Sign up a new account through every sign up screen.
    SignUp,
}

/// Produces the next action from the settled state, or `None` when the
/// screen it needs is not showing.
pub type Step = fn(&RootState) -> Option<RootAction>;

impl Scenario {
    pub fn steps(self) -> Vec<(&'static str, Step)> {
        match self {
            Scenario::Launch => vec![
                ("splash appears", splash_appear),
                ("pokit tab appears", pokit_appear),
                ("remind tab appears", remind_appear),
                ("open first category", open_first_category),
                ("category appears", category_appear),
            ],
            Scenario::SignUp => vec![
                ("splash appears", splash_appear),
                ("google login", google_login),
                ("agree to every term", agree_all),
                ("terms next", terms_next),
                ("type nickname", type_nickname),
                ("nickname next", nickname_next),
                ("pick an interest", pick_interest),
                ("interests next", interests_next),
                ("start", start),
                ("pokit tab appears", pokit_appear),
            ],
        }
    }
}

/// One line describing where the app is.
pub fn summarize(state: &RootState) -> String {
    match state {
        RootState::Intro(IntroState::Splash(splash)) => {
            format!("splash (checking: {})", splash.checking)
        }
        RootState::Intro(IntroState::Login(login)) => format!(
            "login (stack depth: {}, nickname: {:?}, interests: {:?}, alert: {:?})",
            login.path.len(),
            login.nickname,
            login.interests,
            login.alert
        ),
        RootState::MainTab(main_tab) => format!(
            "main tab {:?} (categories: {}, today: {}, unread: {}, stack: [{}])",
            main_tab.selected_tab,
            main_tab.pokit.categories.len(),
            main_tab.remind.today.len(),
            main_tab.remind.unread.len(),
            main_tab
                .path
                .iter()
                .map(|(id, screen)| format!("{id} {}", screen_name(screen)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn screen_name(screen: &MainTabPath) -> &'static str {
    match screen {
        MainTabPath::CategoryDetail(_) => "category detail",
        MainTabPath::ContentList(_) => "content list",
        MainTabPath::ContentSetting(_) => "content setting",
        MainTabPath::Setting(_) => "setting",
        MainTabPath::NicknameSetting(_) => "nickname setting",
    }
}

fn splash_appear(_: &RootState) -> Option<RootAction> {
    Some(RootAction::Intro(IntroAction::Splash(SplashAction::View(
        SplashView::OnAppear,
    ))))
}

fn google_login(_: &RootState) -> Option<RootAction> {
    Some(login(LoginRootAction::View(LoginRootView::GoogleLoginTapped)))
}

fn agree_all(state: &RootState) -> Option<RootAction> {
    on_top_login_screen(
        state,
        LoginPathAction::AgreeToTerms(AgreeToTermsAction::View(AgreeToTermsView::Binding(
            AgreeToTermsBinding::AllTerms(true),
        ))),
    )
}

fn terms_next(state: &RootState) -> Option<RootAction> {
    on_top_login_screen(
        state,
        LoginPathAction::AgreeToTerms(AgreeToTermsAction::View(AgreeToTermsView::NextTapped)),
    )
}

fn type_nickname(state: &RootState) -> Option<RootAction> {
    on_top_login_screen(
        state,
        LoginPathAction::RegisterNickname(RegisterNicknameAction::View(
            RegisterNicknameView::Binding(RegisterNicknameBinding::Nickname("pokit".to_string())),
        )),
    )
}

fn nickname_next(state: &RootState) -> Option<RootAction> {
    on_top_login_screen(
        state,
        LoginPathAction::RegisterNickname(RegisterNicknameAction::View(
            RegisterNicknameView::NextTapped,
        )),
    )
}

fn pick_interest(state: &RootState) -> Option<RootAction> {
    on_top_login_screen(
        state,
        LoginPathAction::SelectField(SelectFieldAction::View(SelectFieldView::FieldTapped(
            "IT".to_string(),
        ))),
    )
}

fn interests_next(state: &RootState) -> Option<RootAction> {
    on_top_login_screen(
        state,
        LoginPathAction::SelectField(SelectFieldAction::View(SelectFieldView::NextTapped)),
    )
}

fn start(state: &RootState) -> Option<RootAction> {
    on_top_login_screen(
        state,
        LoginPathAction::SignUpDone(SignUpDoneAction::View(SignUpDoneView::StartTapped)),
    )
}

fn pokit_appear(state: &RootState) -> Option<RootAction> {
    main_tab(state)?;
    Some(RootAction::MainTab(MainTabAction::Pokit(
        PokitRootAction::View(PokitRootView::OnAppear),
    )))
}

fn remind_appear(state: &RootState) -> Option<RootAction> {
    main_tab(state)?;
    Some(RootAction::MainTab(MainTabAction::Remind(RemindAction::View(
        RemindView::OnAppear,
    ))))
}

fn open_first_category(state: &RootState) -> Option<RootAction> {
    let (id, _) = main_tab(state)?.pokit.categories.first()?;
    Some(RootAction::MainTab(MainTabAction::Pokit(
        PokitRootAction::View(PokitRootView::CategoryTapped(*id)),
    )))
}

fn category_appear(state: &RootState) -> Option<RootAction> {
    let main_tab = main_tab(state)?;
    let id = main_tab.path.last_id()?;
    Some(RootAction::MainTab(MainTabAction::Path(StackAction::Element {
        id,
        action: MainTabPathAction::CategoryDetail(CategoryDetailAction::View(
            CategoryDetailView::OnAppear,
        )),
    })))
}

fn login(action: LoginRootAction) -> RootAction {
    RootAction::Intro(IntroAction::Login(action))
}

fn on_top_login_screen(state: &RootState, action: LoginPathAction) -> Option<RootAction> {
    let RootState::Intro(IntroState::Login(login_root)) = state else {
        return None;
    };
    let id = login_root.path.last_id()?;
    Some(login(LoginRootAction::Path(StackAction::Element { id, action })))
}

fn main_tab(state: &RootState) -> Option<&MainTabState> {
    match state {
        RootState::MainTab(main_tab) => Some(main_tab),
        RootState::Intro(_) => None,
    }
}
