//! Command dispatch: bridges CLI args -> store actions -> output formatting.

pub mod assets;
pub mod auth;
pub mod config_cmd;
pub mod employees;
pub mod reports;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let dashboard = &session.dashboard;
    match cmd {
        Command::Login(args) => auth::login(session, args, global).await,
        Command::Logout => {
            auth::logout(dashboard);
            Ok(())
        }
        Command::Status => auth::status(dashboard, global).await,
        Command::Assets(args) => assets::handle(dashboard, args, global).await,
        Command::Employees(args) => employees::handle(dashboard, args, global).await,
        Command::Reports(args) => reports::handle(dashboard, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
