// ── Dashboard facade ──
//
// Bundles the four stores around one shared API client. Nothing here is
// global: every `Dashboard` is an isolated instance, which is what tests
// rely on.

use std::sync::Arc;

use tracing::debug;

use pirascope_api::transport::{TlsMode, TransportConfig};
use pirascope_api::ApiClient;

use crate::config::{ClientConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::SessionUser;
use crate::notify::Notifier;
use crate::session::SessionStore;
use crate::store::{AssetStore, AuthStore, EmployeeStore, ReportStore};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<DashboardInner>`.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    api: Arc<ApiClient>,
    auth: AuthStore,
    assets: AssetStore,
    employees: EmployeeStore,
    reports: ReportStore,
}

impl Dashboard {
    /// Build the HTTP client from `config` and wire up the stores.
    /// A saved session, if any, is restored immediately.
    pub fn new(
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let api = ApiClient::new(config.api_url.clone(), &transport)?;
        debug!(api_url = %config.api_url, "dashboard client ready");
        Ok(Self::with_api(api, notifier, sessions))
    }

    /// Wire the stores around an already-built client.
    pub fn with_api(
        api: ApiClient,
        notifier: Arc<dyn Notifier>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let api = Arc::new(api);
        Self {
            inner: Arc::new(DashboardInner {
                auth: AuthStore::new(Arc::clone(&api), Arc::clone(&notifier), sessions),
                assets: AssetStore::new(Arc::clone(&api), Arc::clone(&notifier)),
                employees: EmployeeStore::new(Arc::clone(&api), Arc::clone(&notifier)),
                reports: ReportStore::new(Arc::clone(&api), notifier),
                api,
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    pub fn assets(&self) -> &AssetStore {
        &self.inner.assets
    }

    pub fn employees(&self) -> &EmployeeStore {
        &self.inner.employees
    }

    pub fn reports(&self) -> &ReportStore {
        &self.inner.reports
    }

    /// Gate for protected views: the signed-in user or `NotAuthenticated`.
    pub fn require_session(&self) -> Result<SessionUser, CoreError> {
        self.inner.auth.require_user()
    }
}

/// Build a `TransportConfig` from the dashboard config.
fn build_transport(config: &ClientConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig::default()
        .with_tls(tls)
        .with_timeout(config.timeout)
        .with_cookie_jar()
}
