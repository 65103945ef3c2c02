//! CLI configuration: a thin wrapper around `pirascope_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--profile, --api-url, --insecure, --timeout).

use std::sync::Arc;

use pirascope_core::{ClientConfig, Dashboard, FileSessionStore, Notifier};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use pirascope_config::{
    Config, Defaults, Profile, config_path, load_config, load_config_or_default,
    resolve_password, save_config, session_store, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// The profile a command runs against.
///
/// An explicitly requested profile must exist. The implicit default may
/// be absent, in which case the production API and built-in defaults apply.
pub fn select_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    match config.profiles.get(&name) {
        Some(profile) => Ok((name, profile.clone())),
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            available: available_profiles(config),
            name,
        }),
        None => Ok((name, Profile::default())),
    }
}

/// Apply flag overrides to `profile`, then translate to a `ClientConfig`.
pub fn resolve_profile(
    profile: &Profile,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut merged = profile.clone();
    if let Some(ref url) = global.api_url {
        merged.api_url = Some(url.clone());
    }
    if global.insecure {
        merged.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        merged.timeout = Some(timeout);
    }
    Ok(pirascope_config::profile_to_client_config(&merged, defaults)?)
}

/// Everything a session-bound command needs.
pub struct Session {
    pub profile_name: String,
    pub profile: Profile,
    pub dashboard: Dashboard,
}

/// Load config, pick the profile, and build a `Dashboard` wired to that
/// profile's saved session.
pub fn open_session(global: &GlobalOpts, notifier: Arc<dyn Notifier>) -> Result<Session, CliError> {
    let cfg = load_config()?;
    let (profile_name, profile) = select_profile(global, &cfg)?;
    let client_config = resolve_profile(&profile, &cfg.defaults, global)?;
    let sessions: Arc<FileSessionStore> = Arc::new(session_store(&profile_name));

    tracing::debug!(
        profile = %profile_name,
        api_url = %client_config.api_url,
        session = %sessions.path().display(),
        "opening session"
    );

    let dashboard = Dashboard::new(&client_config, notifier, sessions)?;
    Ok(Session {
        profile_name,
        profile,
        dashboard,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use pirascope_core::TlsVerification;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["pirascope"];
        argv.extend_from_slice(args);
        argv.push("logout");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(name.into(), profile);
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let profile = Profile {
            api_url: Some("https://staging.whyxpose.test/api".into()),
            timeout: Some(5),
            ..Profile::default()
        };
        let opts = global(&["--api-url", "http://127.0.0.1:9/api", "--timeout", "12", "-k"]);
        let cfg = resolve_profile(&profile, &Defaults::default(), &opts).unwrap();

        assert_eq!(cfg.api_url.as_str(), "http://127.0.0.1:9/api");
        assert_eq!(cfg.timeout, Duration::from_secs(12));
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn profile_values_survive_without_flags() {
        let profile = Profile {
            timeout: Some(5),
            ..Profile::default()
        };
        let cfg = resolve_profile(&profile, &Defaults::default(), &global(&[])).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn explicit_missing_profile_is_an_error() {
        let cfg = config_with("studio", Profile::default());
        let err = select_profile(&global(&["--profile", "agency"]), &cfg).unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "agency");
                assert_eq!(available, "studio");
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn implicit_default_profile_may_be_absent() {
        let (name, profile) = select_profile(&global(&[]), &Config::default()).unwrap();
        assert_eq!(name, "default");
        assert!(profile.api_url.is_none());
    }
}
