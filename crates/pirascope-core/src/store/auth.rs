// ── Auth store ──

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use pirascope_api::ApiClient;

use super::cell::StateCell;
use super::{begin, fail, impl_loadable};
use crate::error::CoreError;
use crate::model::SessionUser;
use crate::notify::{NoticeLevel, Notifier};
use crate::session::{PersistedSession, SessionStore};
use crate::stream::StateStream;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub error: Option<String>,
}

impl_loadable!(AuthState);

/// Who is signed in, and how that survives restarts.
pub struct AuthStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    sessions: Arc<dyn SessionStore>,
    state: StateCell<AuthState>,
}

impl AuthStore {
    /// Build the store, rehydrating from `sessions` when a saved session exists.
    pub fn new(
        api: Arc<ApiClient>,
        notifier: Arc<dyn Notifier>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let mut initial = AuthState::default();
        match sessions.load() {
            Ok(Some(saved)) => {
                if let Some(cookies) = saved.cookies.as_deref() {
                    api.restore_cookies(cookies);
                }
                initial.user = saved.user;
                initial.is_authenticated = saved.is_authenticated;
                debug!(authenticated = initial.is_authenticated, "restored saved session");
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "ignoring unreadable saved session"),
        }
        Self {
            api,
            notifier,
            sessions,
            state: StateCell::new(initial),
        }
    }

    pub fn state(&self) -> Arc<AuthState> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> StateStream<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read(|s| s.is_authenticated)
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.state.read(|s| s.user.clone())
    }

    /// The signed-in user, or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<SessionUser, CoreError> {
        self.state
            .read(|s| s.is_authenticated.then(|| s.user.clone()).flatten())
            .ok_or(CoreError::NotAuthenticated)
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), CoreError> {
        begin(&self.state);
        match self.api.login(email, password).await {
            Ok(user) => {
                let user = SessionUser::from(user);
                info!(email = %user.email, "logged in");
                self.state.update(|s| {
                    s.user = Some(user);
                    s.is_authenticated = true;
                    s.is_loading = false;
                });
                self.persist();
                self.notifier.notify(NoticeLevel::Success, "Login successful");
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                fail(&self.state, self.notifier.as_ref(), &err, "Login failed");
                Err(err)
            }
        }
    }

    /// Forget the session locally. The backend has no logout endpoint.
    pub fn logout(&self) {
        self.state.update(|s| {
            s.user = None;
            s.is_authenticated = false;
            s.error = None;
        });
        if let Err(e) = self.sessions.clear() {
            warn!(error = %e, "failed to clear saved session");
        }
        self.notifier.notify(NoticeLevel::Info, "Logged out successfully");
    }

    /// Ask the server whether the current cookie is still good. Any failure
    /// leaves the store signed out.
    pub async fn fetch_auth_status(&self) {
        let user = match self.api.check_session().await {
            Ok(user) => user.map(SessionUser::from),
            Err(e) => {
                debug!(error = %e, "session check failed");
                None
            }
        };
        self.state.update(|s| {
            s.is_authenticated = user.is_some();
            s.user = user;
        });
        if self.is_authenticated() {
            self.persist();
        } else if let Err(e) = self.sessions.clear() {
            warn!(error = %e, "failed to clear saved session");
        }
    }

    fn persist(&self) {
        let session = self.state.read(|s| PersistedSession {
            user: s.user.clone(),
            is_authenticated: s.is_authenticated,
            cookies: self.api.cookie_header(),
        });
        if let Err(e) = self.sessions.save(&session) {
            warn!(error = %e, "failed to save session");
        }
    }
}
