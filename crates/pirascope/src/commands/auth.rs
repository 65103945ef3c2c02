//! Session command handlers: login, logout, status.

use std::io::IsTerminal;

use secrecy::SecretString;

use pirascope_config::ConfigError;
use pirascope_core::{Dashboard, SessionUser};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, Session};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(user: &SessionUser) -> String {
    [
        format!("User ID:   {}", user.user_id),
        format!("Name:      {}", user.name),
        format!("Email:     {}", user.email),
        format!("Type:      {}", output::or_dash(user.user_type.as_deref())),
        format!(
            "Company:   {}",
            user.company_id.map_or_else(|| "-".into(), |id| id.to_string())
        ),
    ]
    .join("\n")
}

fn print_user(user: &SessionUser, global: &GlobalOpts) {
    let out = output::render_single(global.output, user, detail, |u| u.email.clone());
    output::print_output(&out, global.quiet);
}

/// Env, keyring, or plaintext config; prompt as a last resort.
fn password_for(session: &Session) -> Result<SecretString, CliError> {
    match config::resolve_password(&session.profile, &session.profile_name) {
        Ok(pw) => Ok(pw),
        Err(ConfigError::NoCredentials { .. }) if std::io::stdin().is_terminal() => {
            let pw = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
            if pw.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            Ok(SecretString::from(pw))
        }
        Err(e) => Err(e.into()),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn login(session: &Session, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let email = args
        .email
        .or_else(|| session.profile.email.clone())
        .ok_or_else(|| CliError::NoCredentials {
            profile: session.profile_name.clone(),
        })?;
    let password = password_for(session)?;

    let spinner = util::spinner(global, "Signing in...");
    let result = session.dashboard.auth().login(&email, &password).await;
    spinner.finish_and_clear();
    result.map_err(|e| CliError::from_action(e, "Login failed"))?;

    let user = session.dashboard.require_session()?;
    print_user(&user, global);
    Ok(())
}

pub fn logout(dashboard: &Dashboard) {
    dashboard.auth().logout();
}

/// Re-validate the saved cookie with the server.
pub async fn status(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    dashboard.auth().fetch_auth_status().await;
    let user = dashboard.require_session()?;
    print_user(&user, global);
    Ok(())
}
