//! Report command handlers.

use tabled::Tabled;

use pirascope_core::store::validate_link;
use pirascope_core::{Dashboard, ExternalReport};

use crate::cli::{GlobalOpts, ReportsArgs, ReportsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

impl From<&ExternalReport> for ReportRow {
    fn from(r: &ExternalReport) -> Self {
        Self {
            id: r.id,
            link: r.link.clone(),
            status: r.status.to_string(),
            submitted: output::date(r.created_at.as_ref()),
        }
    }
}

fn print_reports(dashboard: &Dashboard, global: &GlobalOpts) {
    let state = dashboard.reports().state();
    let out = output::render_list(
        global.output,
        &state.reports,
        |r| ReportRow::from(r),
        |r| r.link.clone(),
    );
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: ReportsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    dashboard.require_session()?;
    let reports = dashboard.reports();

    match args.command {
        ReportsCommand::List => {
            let spinner = util::spinner(global, "Loading reports...");
            let result = reports.get_reports().await;
            spinner.finish_and_clear();
            result.map_err(|e| CliError::from_action(e, "Failed to fetch reports"))?;
            print_reports(dashboard, global);
            Ok(())
        }

        ReportsCommand::Add { link } => {
            if reports.add_report(&link).await {
                print_reports(dashboard, global);
                return Ok(());
            }
            if let Err(reason) = validate_link(&link) {
                return Err(CliError::Validation {
                    field: "link".into(),
                    reason: reason.into(),
                });
            }
            Err(CliError::ApiError {
                message: reports
                    .state()
                    .error
                    .clone()
                    .unwrap_or_else(|| "Failed to add report".into()),
                status: None,
            })
        }
    }
}
