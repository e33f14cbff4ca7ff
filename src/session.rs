//! Explicit session and theme values handed to the editor.
//!
//! Authentication is a hard-coded mock: one demo account, a fixed delay standing
//! in for the network round trip.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

pub const DEMO_EMAIL: &str = "demo@megen.io";
pub const DEMO_PASSWORD: &str = "demo123";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn demo() -> Self {
        Self {
            id: "1".to_string(),
            name: "Demo User".to_string(),
            email: DEMO_EMAIL.to_string(),
            role: "admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }
}

/// A logged-in user and the account they are working in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub theme: ThemePreference,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            account_id: None,
            theme: ThemePreference::default(),
        }
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn select_account(&mut self, account_id: impl Into<String>) {
        self.account_id = Some(account_id.into());
    }

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// Mock login against the single demo account.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Waits the configured delay, then accepts only the demo credentials.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            info!(email, "login succeeded");
            Ok(Session::new(User::demo()))
        } else {
            warn!(email, "login rejected");
            Err(SessionError::InvalidCredentials)
        }
    }

    /// Ends the session. Returns the session that was active, if any.
    pub fn logout(&self, session: &mut Option<Session>) -> Option<Session> {
        let ended = session.take();
        if let Some(s) = &ended {
            info!(email = %s.user.email, "logged out");
        }
        ended
    }
}
