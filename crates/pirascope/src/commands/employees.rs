//! Employee command handlers.

use std::io::IsTerminal;

use secrecy::SecretString;
use tabled::Tabled;

use pirascope_core::{Dashboard, Employee, EmployeeStatus, EmployeeUpdate, NewEmployee};

use crate::cli::{EmployeesArgs, EmployeesCommand, GlobalOpts, OutputFormat, StatusArg};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Status")]
    status: EmployeeStatus,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Employee> for EmployeeRow {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            email: e.email.clone(),
            phone: output::or_dash(e.phone.as_deref()),
            status: e.status,
            created: output::date(e.created_at.as_ref()),
        }
    }
}

fn detail(e: &Employee) -> String {
    [
        format!("ID:        {}", e.id),
        format!("Name:      {}", e.name),
        format!("Email:     {}", e.email),
        format!("Phone:     {}", output::or_dash(e.phone.as_deref())),
        format!("Status:    {}", e.status),
        format!("Company:   {}", output::or_dash(e.company_name.as_deref())),
        format!("Image:     {}", output::or_dash(e.profile.as_deref())),
        format!("Created:   {}", output::date(e.created_at.as_ref())),
        format!("Updated:   {}", output::date(e.updated_at.as_ref())),
    ]
    .join("\n")
}

impl From<StatusArg> for EmployeeStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => Self::Active,
            StatusArg::Inactive => Self::Inactive,
        }
    }
}

fn new_password(flag: Option<String>) -> Result<SecretString, CliError> {
    let pw = match flag {
        Some(pw) => pw,
        None if std::io::stdin().is_terminal() => {
            rpassword::prompt_password("Employee password: ").map_err(util::prompt_err)?
        }
        None => {
            return Err(CliError::Validation {
                field: "password".into(),
                reason: "pass --password or set PIRASCOPE_EMPLOYEE_PASSWORD".into(),
            });
        }
    };
    if pw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(pw))
}

async fn fetch_one(dashboard: &Dashboard, id: u64) -> Result<Employee, CliError> {
    dashboard
        .employees()
        .get_employee(id)
        .await
        .map_err(|e| CliError::from_action(e, "Failed to fetch employee"))?;
    dashboard
        .employees()
        .state()
        .current_employee
        .clone()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "employee".into(),
            identifier: id.to_string(),
            list_command: "employees list".into(),
        })
}

/// Print the refreshed list the stores fetched after a write.
fn print_list(dashboard: &Dashboard, global: &GlobalOpts) {
    let state = dashboard.employees().state();
    let out = output::render_list(
        global.output,
        &state.employees,
        |e| EmployeeRow::from(e),
        |e| e.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    dashboard: &Dashboard,
    args: EmployeesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    dashboard.require_session()?;
    let employees = dashboard.employees();

    match args.command {
        EmployeesCommand::List { paging, search } => {
            let spinner = util::spinner(global, "Loading employees...");
            let result = employees
                .get_employees(paging.page, paging.limit, search.as_deref())
                .await;
            spinner.finish_and_clear();
            result.map_err(|e| CliError::from_action(e, "Failed to fetch employees"))?;

            print_list(dashboard, global);

            let state = employees.state();
            if global.output == OutputFormat::Table && !global.quiet {
                match state.showing_range() {
                    Some((start, end)) => eprintln!(
                        "Showing {start}-{end} of {} · page {}/{}",
                        state.page.total, state.page.page, state.page.total_pages
                    ),
                    None => eprintln!("No employees found"),
                }
            }
            Ok(())
        }

        EmployeesCommand::Get { id } => {
            let employee = fetch_one(dashboard, id).await?;
            let out = output::render_single(global.output, &employee, detail, |e| e.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EmployeesCommand::Add {
            name,
            email,
            password,
            phone,
            image,
        } => {
            let employee = NewEmployee {
                name,
                email,
                password: new_password(password)?,
                profile: image,
                phone,
            };
            employees
                .add_employee(&employee)
                .await
                .map_err(|e| CliError::from_action(e, "Failed to add employee"))?;
            print_list(dashboard, global);
            Ok(())
        }

        EmployeesCommand::Update {
            id,
            name,
            email,
            phone,
            image,
            status,
        } => {
            // The edit endpoint replaces the record, so start from what is stored.
            let current = fetch_one(dashboard, id).await?;
            let update = EmployeeUpdate {
                name: name.unwrap_or(current.name),
                email: email.unwrap_or(current.email),
                phone: phone.or(current.phone),
                profile: image.or(current.profile),
                status: Some(status.map_or(current.status, EmployeeStatus::from)),
            };
            employees
                .update_employee(id, &update)
                .await
                .map_err(|e| CliError::from_action(e, "Failed to update employee"))?;
            print_list(dashboard, global);
            Ok(())
        }

        EmployeesCommand::Deactivate { id } => {
            if !util::confirm(
                &format!("Deactivate employee {id}? They will no longer be able to sign in."),
                "employees deactivate",
                global.yes,
            )? {
                return Ok(());
            }
            employees
                .deactivate_employee(id)
                .await
                .map_err(|e| CliError::from_action(e, "Failed to deactivate employee"))?;
            print_list(dashboard, global);
            Ok(())
        }
    }
}
