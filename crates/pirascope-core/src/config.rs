// ── Runtime connection configuration ──
//
// These types describe *how* to reach the API. They never touch disk:
// the CLI (via pirascope-config) constructs a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Production API root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://antipiracy.whyxpose.com/api";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (staging servers with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one API deployment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root including the `/api` prefix.
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
