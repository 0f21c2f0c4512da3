//! Form field state shared by the nickname screens.

use crate::domain::{validate_nickname, NicknameError};
use crate::environment::ClientError;

/// Visual state of a text field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Default,
    Active,
    Error(String),
}

impl InputState {
    pub fn error(&self) -> Option<&str> {
        match self {
            InputState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Disabled,
    Enabled,
}

impl ButtonState {
    pub fn is_enabled(self) -> bool {
        self == ButtonState::Enabled
    }
}

/// Nickname input validated locally, then checked for duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NicknameForm {
    pub text: String,
    pub input: InputState,
    pub button: ButtonState,
    pub checking: bool,
}

impl NicknameForm {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// The text changed; submitting waits for the next validation.
    pub fn edited(&mut self) {
        self.button = ButtonState::Disabled;
    }

    /// Run the local checks. Returns the nickname to check for duplicates
    /// when they pass.
    pub fn validate(&mut self) -> Option<String> {
        self.checking = false;
        self.button = ButtonState::Disabled;
        match validate_nickname(&self.text) {
            Ok(()) => {
                self.input = InputState::Active;
                self.checking = true;
                Some(self.text.clone())
            }
            Err(NicknameError::Empty) => {
                self.input = InputState::Default;
                None
            }
            Err(error) => {
                self.input = InputState::Error(error.to_string());
                None
            }
        }
    }

    /// Apply a duplicate check answer; answers for older text are ignored.
    pub fn checked(&mut self, nickname: &str, duplicated: bool) {
        if nickname != self.text {
            tracing::trace!(nickname, "ignoring duplicate check for stale text");
            return;
        }
        self.checking = false;
        if duplicated {
            self.input = InputState::Error("nickname already in use".to_string());
            self.button = ButtonState::Disabled;
        } else {
            self.input = InputState::Active;
            self.button = ButtonState::Enabled;
        }
    }

    pub fn check_failed(&mut self, error: &ClientError) {
        self.checking = false;
        self.input = InputState::Error(format!("could not check nickname: {error}"));
        self.button = ButtonState::Disabled;
    }
}
