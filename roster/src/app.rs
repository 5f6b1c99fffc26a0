//! Application state and the single action-processing entry point.
//!
//! [`AppState`] owns the store and the session. It is constructed by the
//! entry point (CLI or UI server) and passed to whoever needs it; there is no
//! global instance. Every mutation goes through [`AppState::dispatch`], which
//! runs one action to completion before returning.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::filter::{active_filter_count, apply_filter};
use crate::core::route::{RouteDecision, resolve_route};
use crate::core::session::{LoginOutcome, Session};
use crate::core::store::UserStore;
use crate::core::types::{FilterSpec, UserRecord, UserRecordInput};
use crate::io::config::DuplicateEmailPolicy;

/// User-facing message for a failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// Source of the registration date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Current UTC date.
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => date,
        }
    }
}

/// Discrete inputs issued by the outer layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Register(UserRecordInput),
    LoginAttempt { email: String, password: String },
    Logout,
}

/// Result of processing one [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "user", rename_all = "snake_case")]
pub enum ActionOutcome {
    Registered(UserRecord),
    /// Only produced under [`DuplicateEmailPolicy::Reject`].
    DuplicateEmail,
    LoginSucceeded(UserRecord),
    /// Credential mismatch; the session is anonymous.
    LoginFailed,
    LoggedOut,
}

/// Read-only snapshot of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView<'a> {
    pub is_authenticated: bool,
    pub current_user: Option<&'a UserRecord>,
    pub greeting: Option<String>,
}

/// Filtered listing plus the badge count for the active filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<'a> {
    pub users: Vec<&'a UserRecord>,
    pub active_filter_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    store: UserStore,
    session: Session,
    duplicate_emails: DuplicateEmailPolicy,
    clock: Clock,
}

impl AppState {
    pub fn new(duplicate_emails: DuplicateEmailPolicy) -> Self {
        Self {
            duplicate_emails,
            ..Self::default()
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Apply one action to the store and session.
    pub fn dispatch(&mut self, action: Action) -> ActionOutcome {
        match action {
            Action::Register(input) => self.register(input),
            Action::LoginAttempt { email, password } => self.login(&email, &password),
            Action::Logout => {
                debug!(was_authenticated = self.session.is_authenticated(), "logout");
                self.session.logout();
                ActionOutcome::LoggedOut
            }
        }
    }

    fn register(&mut self, input: UserRecordInput) -> ActionOutcome {
        if self.duplicate_emails == DuplicateEmailPolicy::Reject
            && self.store.contains_email(&input.email)
        {
            info!(email = %input.email, "registration rejected: duplicate email");
            return ActionOutcome::DuplicateEmail;
        }
        let today = self.clock.today();
        let record = self.store.append(input, today);
        debug!(users = self.store.len(), %today, "user registered");
        ActionOutcome::Registered(record)
    }

    fn login(&mut self, email: &str, password: &str) -> ActionOutcome {
        match self.session.login_attempt(&self.store, email, password) {
            LoginOutcome::Succeeded { id, user } => {
                debug!(user = id.0, %email, "login succeeded");
                ActionOutcome::LoginSucceeded(user.clone())
            }
            LoginOutcome::CredentialMismatch => {
                info!(%email, "login failed: credential mismatch");
                ActionOutcome::LoginFailed
            }
        }
    }

    /// Records passing `spec`, in registration order.
    pub fn list_visible(&self, spec: &FilterSpec) -> Vec<&UserRecord> {
        apply_filter(self.store.all(), spec)
    }

    pub fn listing(&self, spec: &FilterSpec) -> Listing<'_> {
        Listing {
            users: self.list_visible(spec),
            active_filter_count: active_filter_count(spec),
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        self.store.all()
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.session
            .current_user()
            .and_then(|id| self.store.get(id))
    }

    pub fn session_view(&self) -> SessionView<'_> {
        let current_user = self.current_user();
        SessionView {
            is_authenticated: self.is_authenticated(),
            current_user,
            greeting: current_user.map(UserRecord::greeting),
        }
    }

    pub fn route(&self, path: &str) -> RouteDecision {
        resolve_route(path, self.is_authenticated())
    }
}
