use contracts::system::auth::{Session, SessionError, StoredUser};
use leptos::prelude::*;
use std::future::Future;

use super::storage;
use crate::shared::api_utils::ApiError;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionStatus {
    Authenticated(Session),
    Unauthenticated,
    /// Stored credentials exist but cannot be used.
    Error(String),
}

/// Session state shared by the whole app. Provided once by `App`.
#[derive(Clone, Copy)]
pub struct SessionContext {
    status: RwSignal<SessionStatus>,
}

impl SessionContext {
    /// Rebuild the session from `localStorage`.
    pub fn restore() -> Self {
        let token = storage::get_token();
        let user = storage::get_user_json();
        let status = if token.is_none() && user.is_none() {
            SessionStatus::Unauthenticated
        } else {
            match Session::restore(token.as_deref(), user.as_deref()) {
                Ok(session) => {
                    log::debug!("session restored for {} @ {}", session.user.username, session.slug);
                    SessionStatus::Authenticated(session)
                }
                Err(SessionError::MissingToken) | Err(SessionError::MissingUser) => {
                    storage::clear_session();
                    SessionStatus::Unauthenticated
                }
                Err(e) => {
                    log::error!("stored session unusable: {}", e);
                    storage::clear_session();
                    SessionStatus::Error(e.to_string())
                }
            }
        };
        Self {
            status: RwSignal::new(status),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status.get()
    }

    pub fn session(&self) -> Option<Session> {
        self.status.with(|s| match s {
            SessionStatus::Authenticated(session) => Some(session.clone()),
            _ => None,
        })
    }

    pub fn session_untracked(&self) -> Option<Session> {
        self.status.with_untracked(|s| match s {
            SessionStatus::Authenticated(session) => Some(session.clone()),
            _ => None,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.status
            .with(|s| matches!(s, SessionStatus::Authenticated(_)))
    }

    pub fn is_admin(&self) -> bool {
        self.status.with(|s| match s {
            SessionStatus::Authenticated(session) => session.is_admin(),
            _ => false,
        })
    }

    /// Current session for an API call, `NoSession` when signed out.
    pub fn require(&self) -> Result<Session, ApiError> {
        self.session_untracked().ok_or(ApiError::NoSession)
    }

    /// Store a fresh login and switch to the authenticated state.
    pub fn sign_in(&self, token: String, user: StoredUser) -> Result<Session, SessionError> {
        let session = Session::new(token, user)?;
        storage::save_token(&session.token);
        persist_user(&session.user);
        log::info!("signed in as {} @ {}", session.user.username, session.slug);
        self.status.set(SessionStatus::Authenticated(session.clone()));
        Ok(session)
    }

    /// Edit the stored user descriptor in place (e.g. after a profile or
    /// winery rename) and rewrite `vinops_user`.
    pub fn update_user(&self, f: impl FnOnce(&mut StoredUser)) {
        self.status.update(|s| {
            if let SessionStatus::Authenticated(session) = s {
                f(&mut session.user);
                persist_user(&session.user);
            }
        });
    }

    /// Single exit point for logout and rejected tokens.
    pub fn invalidate(&self) {
        storage::clear_session();
        log::info!("session invalidated");
        self.status.set(SessionStatus::Unauthenticated);
    }

    /// Run an API call with the current session and `check` its result.
    pub async fn call<T, F, Fut>(self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let session = self.require()?;
        self.check(f(session).await)
    }

    /// Pass `result` through, invalidating the session on 401/403.
    pub fn check<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(e) = &result {
            if e.is_session_error() {
                self.invalidate();
            }
        }
        result
    }
}

fn persist_user(user: &StoredUser) {
    match serde_json::to_string(user) {
        Ok(json) => storage::save_user_json(&json),
        Err(e) => log::error!("could not serialize stored user: {}", e),
    }
}

/// Hook to access the session context
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not provided")
}
