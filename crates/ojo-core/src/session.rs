//! Login session state machine.
//!
//! ```text
//! AwaitingCredentials ──submit──▶ InFlight ──ok──────────────▶ Succeeded
//!         ▲                      │  │  └──two factor──▶ AwaitingTwoFactor
//!         │                      │  └──failure───────▶ Failed
//!         └──────── logout ◀─────┴── (any state)
//! ```
//!
//! The session owns the form fields and a single tagged `AuthState`.
//! Transitions are plain methods; callers (the TUI reducer, the `analyze`
//! command) perform the network call and feed the outcome back through
//! [`Session::resolve`].

use crate::analysis::{AnalysisResult, ClientError, ClientResult, Credentials};

/// Notice shown when the backend asks for a second factor.
pub const TWO_FACTOR_PROMPT: &str = "Por favor ingresa el código 2FA que recibiste.";

/// Fallback when a failure carries no message.
pub const UNKNOWN_ERROR: &str = "Error desconocido";

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    TwoFactorCode,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Usuario",
            Field::Password => "Contraseña",
            Field::TwoFactorCode => "Código 2FA",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password)
    }
}

/// Transient form input. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub two_factor_code: String,
}

impl LoginForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::TwoFactorCode => &self.two_factor_code,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::TwoFactorCode => &mut self.two_factor_code,
        }
    }
}

/// Authentication state. Exactly one variant is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    AwaitingCredentials,
    AwaitingTwoFactor,
    InFlight,
    Succeeded(AnalysisResult),
    Failed(String),
}

/// The line shown under the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice<'a> {
    TwoFactorPrompt,
    Error(&'a str),
}

impl Notice<'_> {
    pub fn text(&self) -> &str {
        match self {
            Notice::TwoFactorPrompt => TWO_FACTOR_PROMPT,
            Notice::Error(message) => message,
        }
    }
}

/// One login session: form input plus authentication state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    form: LoginForm,
    state: AuthState,
    /// Set once the backend asked for a second factor; cleared on success
    /// and logout. Controls whether the code is sent and shown.
    two_factor_requested: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    /// Whether the two-factor field is visible and sent on submit.
    pub fn requires_two_factor(&self) -> bool {
        self.two_factor_requested
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, AuthState::InFlight)
    }

    pub fn can_submit(&self) -> bool {
        !matches!(self.state, AuthState::InFlight | AuthState::Succeeded(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            AuthState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<Notice<'_>> {
        match &self.state {
            AuthState::AwaitingTwoFactor => Some(Notice::TwoFactorPrompt),
            AuthState::Failed(message) => Some(Notice::Error(message)),
            _ => None,
        }
    }

    /// Fields currently shown on the login form, in focus order.
    pub fn visible_fields(&self) -> &'static [Field] {
        if self.two_factor_requested {
            &[Field::Username, Field::Password, Field::TwoFactorCode]
        } else {
            &[Field::Username, Field::Password]
        }
    }

    fn is_editable(&self, field: Field) -> bool {
        let visible = field != Field::TwoFactorCode || self.two_factor_requested;
        visible && !matches!(self.state, AuthState::Succeeded(_))
    }

    /// Replaces a field's value. Returns false if the field is not editable.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !self.is_editable(field) {
            return false;
        }
        *self.form.value_mut(field) = value.into();
        true
    }

    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        if !self.is_editable(field) {
            return false;
        }
        self.form.value_mut(field).push(c);
        true
    }

    pub fn pop_char(&mut self, field: Field) -> bool {
        if !self.is_editable(field) {
            return false;
        }
        self.form.value_mut(field).pop().is_some()
    }

    pub fn clear_field(&mut self, field: Field) -> bool {
        self.set_field(field, String::new())
    }

    /// Starts a request.
    ///
    /// Returns the credentials to send, or `None` when a request is already
    /// in flight or the session already succeeded. The two-factor code is
    /// attached only after the backend has asked for one.
    pub fn submit(&mut self) -> Option<Credentials> {
        if !self.can_submit() {
            return None;
        }

        let mut credentials = Credentials::new(&self.form.username, &self.form.password);
        if self.two_factor_requested {
            credentials = credentials.with_two_factor_code(&self.form.two_factor_code);
        }
        self.state = AuthState::InFlight;
        Some(credentials)
    }

    /// Applies the outcome of the request started by [`submit`](Self::submit).
    ///
    /// Outcomes arriving when no request is in flight (e.g. after logout)
    /// are ignored; returns whether the outcome was applied.
    pub fn resolve(&mut self, outcome: ClientResult<AnalysisResult>) -> bool {
        if !self.is_in_flight() {
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                self.two_factor_requested = false;
                self.form.two_factor_code.clear();
                AuthState::Succeeded(result)
            }
            Err(ClientError::TwoFactorRequired) => {
                self.two_factor_requested = true;
                AuthState::AwaitingTwoFactor
            }
            Err(ClientError::RequestFailed(failure)) => {
                let message = failure.message.trim();
                let message = if message.is_empty() {
                    UNKNOWN_ERROR
                } else {
                    message
                };
                AuthState::Failed(format!("Error: {message}"))
            }
        };
        true
    }

    /// Discards the result and every credential field.
    ///
    /// Returns true if a request was in flight, so the caller can cancel it.
    pub fn logout(&mut self) -> bool {
        let was_in_flight = self.is_in_flight();
        *self = Self::default();
        was_in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FailureKind, RequestFailure};

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            followers_count: 10,
            following_count: 12,
            not_following_back: vec!["bob".to_string()],
            fans: vec!["carol".to_string(), "dave".to_string()],
        }
    }

    fn filled(username: &str, password: &str) -> Session {
        let mut session = Session::new();
        assert!(session.set_field(Field::Username, username));
        assert!(session.set_field(Field::Password, password));
        session
    }

    fn network_failure() -> ClientError {
        ClientError::RequestFailed(RequestFailure::new(
            FailureKind::Network,
            "connection refused",
        ))
    }

    #[test]
    fn test_first_submit_has_no_two_factor_code() {
        let mut session = filled("alice", "p1");

        let credentials = session.submit().unwrap();

        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.password, "p1");
        assert!(credentials.two_factor_code.is_none());
        assert!(session.is_in_flight());
    }

    #[test]
    fn test_submit_is_blocked_while_in_flight() {
        let mut session = filled("alice", "p1");
        assert!(session.submit().is_some());

        assert!(session.submit().is_none());
        assert!(session.is_in_flight());
    }

    #[test]
    fn test_fields_stay_editable_while_in_flight() {
        let mut session = filled("alice", "p1");
        session.submit();

        assert!(session.push_char(Field::Username, 'x'));
        assert_eq!(session.form().username, "alicex");
    }

    #[test]
    fn test_success_stores_exact_result() {
        let mut session = filled("alice", "p1");
        session.submit();

        assert!(session.resolve(Ok(sample_result())));

        assert_eq!(session.state(), &AuthState::Succeeded(sample_result()));
        assert_eq!(session.result(), Some(&sample_result()));
        assert!(session.notice().is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_two_factor_required_reveals_field_and_keeps_credentials() {
        let mut session = filled("alice", "p1");
        session.submit();

        session.resolve(Err(ClientError::TwoFactorRequired));

        assert_eq!(session.state(), &AuthState::AwaitingTwoFactor);
        assert!(session.requires_two_factor());
        assert_eq!(session.visible_fields().len(), 3);
        assert_eq!(session.notice(), Some(Notice::TwoFactorPrompt));
        assert_eq!(
            session.notice().unwrap().text(),
            "Por favor ingresa el código 2FA que recibiste."
        );
        assert_eq!(session.form().username, "alice");
        assert_eq!(session.form().password, "p1");
    }

    #[test]
    fn test_two_factor_prompt_replaces_prior_error() {
        let mut session = filled("alice", "p1");
        session.submit();
        session.resolve(Err(network_failure()));
        assert!(matches!(session.notice(), Some(Notice::Error(_))));

        session.submit();
        session.resolve(Err(ClientError::TwoFactorRequired));

        assert_eq!(session.notice(), Some(Notice::TwoFactorPrompt));
    }

    #[test]
    fn test_resubmit_after_two_factor_sends_code_then_resets_flag() {
        let mut session = filled("alice", "p1");
        session.submit();
        session.resolve(Err(ClientError::TwoFactorRequired));
        assert!(session.set_field(Field::TwoFactorCode, "000000"));

        let credentials = session.submit().unwrap();
        assert_eq!(credentials.two_factor_code.as_deref(), Some("000000"));

        session.resolve(Ok(sample_result()));
        assert!(!session.requires_two_factor());
        assert!(session.form().two_factor_code.is_empty());
    }

    #[test]
    fn test_two_factor_field_hidden_until_requested() {
        let mut session = filled("alice", "p1");

        assert!(!session.set_field(Field::TwoFactorCode, "123456"));
        assert!(!session.push_char(Field::TwoFactorCode, '1'));

        let credentials = session.submit().unwrap();
        assert!(credentials.two_factor_code.is_none());
    }

    #[test]
    fn test_failure_keeps_fields_and_allows_resubmit() {
        let mut session = filled("alice", "p1");
        session.submit();

        session.resolve(Err(network_failure()));

        assert_eq!(
            session.state(),
            &AuthState::Failed("Error: connection refused".to_string())
        );
        assert_eq!(session.form().username, "alice");
        assert_eq!(session.form().password, "p1");

        let retry = session.submit().unwrap();
        assert_eq!(retry, Credentials::new("alice", "p1"));
        assert!(session.submit().is_none());
    }

    #[test]
    fn test_failure_after_two_factor_keeps_code_on_retry() {
        let mut session = filled("alice", "p1");
        session.submit();
        session.resolve(Err(ClientError::TwoFactorRequired));
        session.set_field(Field::TwoFactorCode, "123456");
        session.submit();
        session.resolve(Err(network_failure()));

        assert!(session.requires_two_factor());
        let retry = session.submit().unwrap();
        assert_eq!(retry.two_factor_code.as_deref(), Some("123456"));
    }

    #[test]
    fn test_empty_failure_message_uses_fallback() {
        let mut session = filled("alice", "p1");
        session.submit();

        session.resolve(Err(ClientError::RequestFailed(RequestFailure::new(
            FailureKind::Network,
            "  ",
        ))));

        assert_eq!(session.notice(), Some(Notice::Error("Error: Error desconocido")));
    }

    #[test]
    fn test_resolve_ignored_when_not_in_flight() {
        let mut session = filled("alice", "p1");

        assert!(!session.resolve(Ok(sample_result())));
        assert_eq!(session.state(), &AuthState::AwaitingCredentials);
    }

    #[test]
    fn test_logout_discards_everything() {
        let mut session = filled("alice", "p1");
        session.submit();
        session.resolve(Err(ClientError::TwoFactorRequired));
        session.set_field(Field::TwoFactorCode, "1");
        session.submit();
        session.resolve(Ok(sample_result()));

        assert!(!session.logout());

        assert_eq!(session.state(), &AuthState::AwaitingCredentials);
        assert_eq!(session.form(), &LoginForm::default());
        assert!(session.result().is_none());
        assert!(!session.requires_two_factor());
    }

    #[test]
    fn test_logout_in_flight_reports_pending_request_and_drops_late_outcome() {
        let mut session = filled("alice", "p1");
        session.submit();

        assert!(session.logout());
        assert!(!session.resolve(Ok(sample_result())));
        assert_eq!(session.state(), &AuthState::AwaitingCredentials);
    }

    #[test]
    fn test_results_are_read_only() {
        let mut session = filled("alice", "p1");
        session.submit();
        session.resolve(Ok(sample_result()));

        assert!(!session.push_char(Field::Username, 'x'));
        assert!(session.submit().is_none());
    }
}
