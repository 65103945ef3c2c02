// Employee endpoints
//
// All writes are POSTs; the server has no PUT/DELETE surface.
// Deactivation flips `status` to `inactive` and never deletes the record.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    AddEmployeeBody, ApiEmployee, EditEmployeeBody, EmployeeEnvelope, EmployeePage,
};

impl ApiClient {
    /// List employees with pagination and an optional search term.
    ///
    /// `GET company/get_employees?page&limit[&search]`. An empty search
    /// term is omitted from the query.
    pub async fn list_employees(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<EmployeePage, Error> {
        let url = self.endpoint_url("company/get_employees")?;
        debug!(page, limit, ?search, "listing employees");

        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", term.to_owned()));
        }
        self.get_with_query(url, &query).await
    }

    /// Fetch a single employee.
    ///
    /// `GET company/get_employee/{id}`
    pub async fn get_employee(&self, employee_id: u64) -> Result<ApiEmployee, Error> {
        let url = self.endpoint_url(&format!("company/get_employee/{employee_id}"))?;
        debug!(employee_id, "fetching employee");
        let envelope: EmployeeEnvelope = self.get(url).await?;
        Ok(envelope.employee)
    }

    /// Create an employee account.
    ///
    /// `POST company/add_employee`
    pub async fn add_employee(&self, body: &AddEmployeeBody<'_>) -> Result<(), Error> {
        let url = self.endpoint_url("company/add_employee")?;
        debug!(email = body.email, "adding employee");
        let _: serde_json::Value = self.post(url, body).await?;
        Ok(())
    }

    /// Update an employee's profile fields and/or status.
    ///
    /// `POST company/edit_employee/{id}`
    pub async fn edit_employee(
        &self,
        employee_id: u64,
        body: &EditEmployeeBody<'_>,
    ) -> Result<(), Error> {
        let url = self.endpoint_url(&format!("company/edit_employee/{employee_id}"))?;
        debug!(employee_id, "editing employee");
        let _: serde_json::Value = self.post(url, body).await?;
        Ok(())
    }

    /// Deactivate an employee account.
    ///
    /// `POST company/deactivate_employee/{id}` with an empty object body.
    pub async fn deactivate_employee(&self, employee_id: u64) -> Result<(), Error> {
        let url = self.endpoint_url(&format!("company/deactivate_employee/{employee_id}"))?;
        debug!(employee_id, "deactivating employee");
        let _: serde_json::Value = self.post(url, &json!({})).await?;
        Ok(())
    }
}
