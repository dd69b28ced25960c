//! Auth session and the three-step sign-in wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthSession` is provided as context and drives the unauthenticated
//! redirect. `AuthWizard` is owned by the login page: credentials, then
//! Telegram binding, then one-time-code confirmation. Steps only move forward;
//! a rejected step stays where it is with an error message.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

pub const MSG_CREDENTIALS_REQUIRED: &str = "Введите логин и пароль.";
pub const MSG_TELEGRAM_REQUIRED: &str = "Введите Telegram ID.";
pub const MSG_CODE_INCOMPLETE: &str = "Введите все 6 цифр кода.";

/// Browser session: the stored bearer token, if any.
#[derive(Clone, Debug, Default)]
pub struct AuthSession {
    pub token: Option<String>,
    /// `true` until the token has been read from storage on hydration.
    pub loading: bool,
}

impl AuthSession {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Wizard position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStep {
    #[default]
    Credentials,
    TelegramBind,
    CodeConfirm,
    Authenticated,
}

impl AuthStep {
    fn next(self) -> Self {
        match self {
            Self::Credentials => Self::TelegramBind,
            Self::TelegramBind => Self::CodeConfirm,
            Self::CodeConfirm | Self::Authenticated => Self::Authenticated,
        }
    }

    /// 1-based position for the step indicator; `None` once signed in.
    pub fn ordinal(self) -> Option<usize> {
        match self {
            Self::Credentials => Some(1),
            Self::TelegramBind => Some(2),
            Self::CodeConfirm => Some(3),
            Self::Authenticated => None,
        }
    }
}

/// Trim the username and require both fields.
///
/// # Errors
///
/// Returns [`MSG_CREDENTIALS_REQUIRED`] when either field is blank.
pub fn validate_credentials(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MSG_CREDENTIALS_REQUIRED);
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Require a non-blank Telegram ID. Its format is the server's concern.
///
/// # Errors
///
/// Returns [`MSG_TELEGRAM_REQUIRED`] when the value is blank.
pub fn validate_telegram_id(raw: &str) -> Result<String, &'static str> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(MSG_TELEGRAM_REQUIRED);
    }
    Ok(value.to_owned())
}

/// Linear sign-in flow state.
#[derive(Clone, Debug, Default)]
pub struct AuthWizard {
    pub step: AuthStep,
    pub username: String,
    pub password: String,
    pub telegram_id: String,
    pub busy: bool,
    pub error: Option<String>,
}

impl AuthWizard {
    /// Start the credentials check. Returns the pair to send, or `None` when
    /// busy, on the wrong step, or invalid (the message is stored in `error`).
    pub fn submit_credentials(&mut self) -> Option<(String, String)> {
        if self.busy || self.step != AuthStep::Credentials {
            return None;
        }
        match validate_credentials(&self.username, &self.password) {
            Ok(pair) => {
                self.begin();
                Some(pair)
            }
            Err(msg) => {
                self.error = Some(msg.to_owned());
                None
            }
        }
    }

    /// Start the Telegram binding. Same contract as [`Self::submit_credentials`].
    pub fn submit_telegram(&mut self) -> Option<String> {
        if self.busy || self.step != AuthStep::TelegramBind {
            return None;
        }
        match validate_telegram_id(&self.telegram_id) {
            Ok(id) => {
                self.begin();
                Some(id)
            }
            Err(msg) => {
                self.error = Some(msg.to_owned());
                None
            }
        }
    }

    /// Start verifying a complete code. Returns `false` if one is in flight.
    pub fn submit_code(&mut self, code: &str) -> bool {
        if self.busy || self.step != AuthStep::CodeConfirm {
            return false;
        }
        if code.len() != super::otp::CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
            self.error = Some(MSG_CODE_INCOMPLETE.to_owned());
            return false;
        }
        self.begin();
        true
    }

    fn begin(&mut self) {
        self.busy = true;
        self.error = None;
    }

    /// The collaborator accepted the current step.
    pub fn advance(&mut self) {
        self.busy = false;
        self.error = None;
        self.step = self.step.next();
        self.password.clear();
    }

    /// The collaborator rejected the current step.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
