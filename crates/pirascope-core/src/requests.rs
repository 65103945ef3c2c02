// ── Write request types ──
//
// Inputs to the employee write actions. These are what forms (or CLI
// flags) fill in; the stores translate them into wire bodies.

use secrecy::{ExposeSecret, SecretString};

use pirascope_api::models::{AddEmployeeBody, EditEmployeeBody};

use crate::model::EmployeeStatus;

/// A new staff account.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub profile: Option<String>,
    pub phone: Option<String>,
}

impl NewEmployee {
    pub(crate) fn body(&self) -> AddEmployeeBody<'_> {
        AddEmployeeBody {
            name: &self.name,
            email: &self.email,
            password: self.password.expose_secret(),
            profile: self.profile.as_deref(),
            phone: self.phone.as_deref(),
        }
    }
}

/// Replacement values for an existing account.
#[derive(Debug, Clone)]
pub struct EmployeeUpdate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub profile: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    pub(crate) fn body(&self) -> EditEmployeeBody<'_> {
        EditEmployeeBody {
            name: &self.name,
            email: &self.email,
            phone: self.phone.as_deref(),
            profile: self.profile.as_deref(),
            status: self.status.map(EmployeeStatus::as_wire),
        }
    }
}
