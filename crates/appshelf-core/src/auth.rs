//! Single-administrator login gate.
//!
//! The gate is a two-state machine (`LoggedOut` / `LoggedIn`). Credential
//! checking is delegated to a [`CredentialVerifier`]; the built-in
//! [`StaticCredential`] compares against one configured username/password
//! pair. Nothing here is persisted: a restart always begins logged out.

use appshelf_schema::{Session, UserProfile};
use subtle::ConstantTimeEq;

/// Message shown under the login form after a rejected attempt.
pub const LOGIN_FAILED_MESSAGE: &str = "اسم المستخدم أو كلمة المرور غير صحيحة";

pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// One fixed username/password pair, compared case-sensitively.
#[derive(Clone)]
pub struct StaticCredential {
    username: String,
    password: String,
}

impl StaticCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialVerifier for StaticCredential {
    fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum GateState {
    LoggedOut,
    LoggedIn(UserProfile),
}

pub struct AuthGate {
    verifier: Box<dyn CredentialVerifier>,
    profile: UserProfile,
    state: GateState,
    last_error: Option<String>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("state", &self.state)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl AuthGate {
    pub fn new(verifier: Box<dyn CredentialVerifier>, profile: UserProfile) -> Self {
        Self {
            verifier,
            profile,
            state: GateState::LoggedOut,
            last_error: None,
        }
    }

    /// Attempt a login. A rejected attempt records [`LOGIN_FAILED_MESSAGE`]
    /// and leaves the current state alone.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        self.last_error = None;
        if self.verifier.verify(username, password) {
            tracing::info!(username, "admin login succeeded");
            self.state = GateState::LoggedIn(self.profile.clone());
            true
        } else {
            tracing::warn!(username, "admin login rejected");
            self.last_error = Some(LOGIN_FAILED_MESSAGE.to_string());
            false
        }
    }

    pub fn logout(&mut self) {
        if self.is_logged_in() {
            tracing::info!("admin logged out");
        }
        self.state = GateState::LoggedOut;
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, GateState::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.state {
            GateState::LoggedIn(user) => Some(user),
            GateState::LoggedOut => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn session(&self) -> Session {
        Session {
            is_logged_in: self.is_logged_in(),
            user: self.user().cloned(),
            last_error: self.last_error.clone(),
        }
    }
}
