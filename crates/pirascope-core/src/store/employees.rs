// ── Employee store ──
//
// Every write is followed by a refetch of the last-requested page; the
// server is the only source of truth for the list.

use std::sync::Arc;

use tracing::debug;

use pirascope_api::ApiClient;

use super::cell::StateCell;
use super::{begin, fail, impl_loadable};
use crate::convert::employee_page;
use crate::error::CoreError;
use crate::model::{Employee, PageInfo};
use crate::notify::{NoticeLevel, Notifier};
use crate::requests::{EmployeeUpdate, NewEmployee};
use crate::stream::StateStream;

/// The list query the store last ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl Default for EmployeeQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeState {
    pub employees: Vec<Employee>,
    pub current_employee: Option<Employee>,
    pub page: PageInfo,
    pub query: EmployeeQuery,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl_loadable!(EmployeeState);

impl EmployeeState {
    /// Case-insensitive name/email match over the loaded page.
    pub fn filtered(&self, query: &str) -> Vec<&Employee> {
        let needle = query.trim().to_lowercase();
        self.employees
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.name.to_lowercase().contains(&needle)
                    || e.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// "Showing X to Y of Z" bounds for the loaded page.
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        self.page.showing_range()
    }
}

/// Company staff accounts.
pub struct EmployeeStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: StateCell<EmployeeState>,
}

impl EmployeeStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: StateCell::new(EmployeeState::default()),
        }
    }

    pub fn state(&self) -> Arc<EmployeeState> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> StateStream<EmployeeState> {
        self.state.subscribe()
    }

    pub async fn get_employees(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<(), CoreError> {
        let query = EmployeeQuery {
            page: page.max(1),
            limit: limit.max(1),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        };
        self.run_query(query).await
    }

    /// Re-run the last list query.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let query = self.state.read(|s| s.query.clone());
        self.run_query(query).await
    }

    /// Refetch after a committed write. A failed refetch records its own
    /// error and notice; the write still succeeded.
    async fn refresh_after_write(&self) {
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "employee refresh failed");
        }
    }

    async fn run_query(&self, query: EmployeeQuery) -> Result<(), CoreError> {
        begin(&self.state);
        self.state.update(|s| s.query = query.clone());
        match self
            .api
            .list_employees(query.page, query.limit, query.search.as_deref())
            .await
        {
            Ok(resp) => {
                let (employees, page) = employee_page(resp);
                debug!(count = employees.len(), page = page.page, "employees loaded");
                self.state.update(|s| {
                    s.employees = employees;
                    s.page = page;
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                fail(&self.state, self.notifier.as_ref(), &err, "Failed to fetch employees");
                Err(err)
            }
        }
    }

    pub async fn get_employee(&self, employee_id: u64) -> Result<(), CoreError> {
        begin(&self.state);
        match self.api.get_employee(employee_id).await {
            Ok(employee) => {
                self.state.update(|s| {
                    s.current_employee = Some(employee.into());
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                let err = if e.is_not_found() {
                    CoreError::NotFound {
                        entity_type: "employee".into(),
                        identifier: employee_id.to_string(),
                    }
                } else {
                    CoreError::from(e)
                };
                fail(&self.state, self.notifier.as_ref(), &err, "Failed to fetch employee");
                Err(err)
            }
        }
    }

    pub async fn add_employee(&self, employee: &NewEmployee) -> Result<(), CoreError> {
        begin(&self.state);
        if let Err(e) = self.api.add_employee(&employee.body()).await {
            let err = CoreError::from(e);
            fail(&self.state, self.notifier.as_ref(), &err, "Failed to add employee");
            return Err(err);
        }
        self.notifier
            .notify(NoticeLevel::Success, "Employee added successfully");
        self.refresh_after_write().await;
        Ok(())
    }

    pub async fn update_employee(
        &self,
        employee_id: u64,
        update: &EmployeeUpdate,
    ) -> Result<(), CoreError> {
        begin(&self.state);
        if let Err(e) = self.api.edit_employee(employee_id, &update.body()).await {
            let err = CoreError::from(e);
            fail(&self.state, self.notifier.as_ref(), &err, "Failed to update employee");
            return Err(err);
        }
        self.notifier
            .notify(NoticeLevel::Success, "Employee updated successfully");
        self.refresh_after_write().await;
        Ok(())
    }

    /// Flip the account to inactive. The record stays on the server.
    pub async fn deactivate_employee(&self, employee_id: u64) -> Result<(), CoreError> {
        begin(&self.state);
        if let Err(e) = self.api.deactivate_employee(employee_id).await {
            let err = CoreError::from(e);
            fail(
                &self.state,
                self.notifier.as_ref(),
                &err,
                "Failed to deactivate employee",
            );
            return Err(err);
        }
        self.notifier
            .notify(NoticeLevel::Success, "Employee deactivated successfully");
        self.refresh_after_write().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EmployeeStatus;

    fn employee(id: u64, name: &str, email: &str) -> Employee {
        Employee {
            id,
            name: name.into(),
            email: email.into(),
            profile: None,
            phone: None,
            company_id: Some(1),
            status: EmployeeStatus::Active,
            created_at: None,
            updated_at: None,
            company_name: None,
        }
    }

    #[test]
    fn filtered_matches_name_or_email_case_insensitively() {
        let state = EmployeeState {
            employees: vec![
                employee(1, "Ana Ruiz", "ana@studio.test"),
                employee(2, "Bo Chen", "bo@STUDIO.test"),
                employee(3, "Cy", "cy@other.test"),
            ],
            ..EmployeeState::default()
        };

        let ids = |q: &str| state.filtered(q).iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids("ANA"), vec![1]);
        assert_eq!(ids("studio"), vec![1, 2]);
        assert_eq!(ids("  "), vec![1, 2, 3]);
        assert!(ids("zzz").is_empty());
    }
}
