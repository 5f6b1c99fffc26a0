//! Session state machine: at most one authenticated identity.

use crate::core::credentials::authenticate;
use crate::core::store::UserStore;
use crate::core::types::{UserId, UserRecord};

/// Current session.
///
/// `Authenticated` holds a handle into the store rather than a copy, so the
/// displayed identity is always the stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(UserId),
}

/// Result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome<'a> {
    Succeeded { id: UserId, user: &'a UserRecord },
    /// No record matched; the session is now anonymous.
    CredentialMismatch,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<UserId> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(id) => Some(*id),
        }
    }

    /// Authenticate against `store` and transition.
    ///
    /// A mismatch also clears any previously authenticated identity.
    pub fn login_attempt<'a>(
        &mut self,
        store: &'a UserStore,
        email: &str,
        password: &str,
    ) -> LoginOutcome<'a> {
        match authenticate(store, email, password) {
            Some((id, user)) => {
                *self = Session::Authenticated(id);
                LoginOutcome::Succeeded { id, user }
            }
            None => {
                *self = Session::Anonymous;
                LoginOutcome::CredentialMismatch
            }
        }
    }

    /// Return to anonymous. Idempotent.
    pub fn logout(&mut self) {
        *self = Session::Anonymous;
    }
}
