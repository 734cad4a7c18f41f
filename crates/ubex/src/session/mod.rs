//! Explicit session container: signed-in role, current view, and the
//! student record, shared by handlers through an `Arc`.

pub mod auth;
pub mod navigation;
mod store;

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::info;

use crate::domain::{Student, UserRole};
pub use auth::{authenticate, demo_credentials, AuthUser, Credentials, LoginError};
pub use navigation::{default_view, navigation, resolve_screen, NavItem, Screen, View};
pub use store::StudentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SessionState {
    role: Option<UserRole>,
    view: View,
}

/// Serializable picture of the session for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub role: Option<UserRole>,
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<Screen>,
    pub navigation: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Login(#[from] LoginError),
    #[error("no user is signed in")]
    SignedOut,
    #[error("view {view:?} is not available to {role:?}")]
    ViewUnavailable { role: UserRole, view: View },
}

#[derive(Debug)]
pub struct AppSession {
    state: RwLock<SessionState>,
    users: Vec<AuthUser>,
    student: Arc<StudentStore>,
}

impl AppSession {
    pub fn new(users: Vec<AuthUser>, student: Student) -> Self {
        Self {
            state: RwLock::new(SessionState {
                role: None,
                view: View::Dashboard,
            }),
            users,
            student: Arc::new(StudentStore::new(student)),
        }
    }

    pub fn student(&self) -> &Arc<StudentStore> {
        &self.student
    }

    pub fn role(&self) -> Option<UserRole> {
        self.read_state().role
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read_state();
        SessionSnapshot {
            role: state.role,
            view: state.view,
            screen: state.role.map(|role| resolve_screen(role, state.view)),
            navigation: state
                .role
                .map(|role| navigation(role).to_vec())
                .unwrap_or_default(),
        }
    }

    pub fn login(&self, credentials: &Credentials) -> Result<SessionSnapshot, SessionError> {
        let role = authenticate(credentials, &self.users)?;
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.role = Some(role);
            state.view = default_view(role);
        }
        info!(?role, "session signed in");
        Ok(self.snapshot())
    }

    pub fn demo_credentials(&self, role: UserRole) -> Option<Credentials> {
        demo_credentials(role, &self.users)
    }

    pub fn logout(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(role) = state.role.take() {
            info!(?role, "session signed out");
        }
        state.view = View::Dashboard;
    }

    pub fn navigate(&self, view: View) -> Result<SessionSnapshot, SessionError> {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let role = state.role.ok_or(SessionError::SignedOut)?;
            if !navigation::is_reachable(role, view) {
                return Err(SessionError::ViewUnavailable { role, view });
            }
            state.view = view;
        }
        Ok(self.snapshot())
    }

    /// Signed-in role, provided it may open `view`.
    pub fn require(&self, view: View) -> Result<UserRole, SessionError> {
        let role = self.role().ok_or(SessionError::SignedOut)?;
        if navigation::is_reachable(role, view) {
            Ok(role)
        } else {
            Err(SessionError::ViewUnavailable { role, view })
        }
    }

    fn read_state(&self) -> SessionState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}
