//! Process-wide session state.
//!
//! The store is split into a read-only [`SessionHandle`], which any component
//! may clone, and a single [`SessionWriter`]. Only the auth bootstrap, the
//! login/logout flows and the profile page are handed the writer.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

pub const DEFAULT_NICKNAME: &str = "학부생";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub logged_in: bool,
    pub email: Option<String>,
    pub nickname: String,
    pub profile_image: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            logged_in: false,
            email: None,
            nickname: DEFAULT_NICKNAME.to_string(),
            profile_image: None,
        }
    }
}

pub fn session_store() -> (SessionWriter, SessionHandle) {
    let inner = Arc::new(RwLock::new(Session::default()));
    (
        SessionWriter {
            inner: inner.clone(),
        },
        SessionHandle { inner },
    )
}

#[derive(Debug, Clone)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    pub fn is_logged_in(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .logged_in
    }

    pub fn snapshot(&self) -> Session {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Sole write capability for the session. Intentionally not `Clone`.
#[derive(Debug)]
pub struct SessionWriter {
    inner: Arc<RwLock<Session>>,
}

impl SessionWriter {
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            inner: self.inner.clone(),
        }
    }

    pub fn sign_in(&self, email: impl Into<String>) {
        let email = email.into();
        tracing::info!(%email, "signed in");
        self.update(|session| {
            session.logged_in = true;
            session.email = Some(email);
        });
    }

    /// Reset to the anonymous defaults.
    pub fn sign_out(&self) {
        tracing::info!("signed out");
        self.update(|session| *session = Session::default());
    }

    pub fn update_profile(&self, nickname: impl Into<String>, profile_image: Option<String>) {
        let nickname = nickname.into();
        self.update(|session| {
            session.nickname = if nickname.trim().is_empty() {
                DEFAULT_NICKNAME.to_string()
            } else {
                nickname
            };
            session.profile_image = profile_image;
        });
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut session);
    }
}
