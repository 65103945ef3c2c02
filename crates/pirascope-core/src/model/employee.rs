// ── Employee domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account status. The server only distinguishes `active`; anything else
/// is treated as inactive.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn from_wire(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("active") {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Wire value sent back on edits.
    pub fn as_wire(self) -> &'static str {
        self.into()
    }
}

/// A company staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub profile: Option<String>,
    pub phone: Option<String>,
    pub company_id: Option<u64>,
    pub status: EmployeeStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub company_name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_inactive() {
        assert_eq!(EmployeeStatus::from_wire("Active"), EmployeeStatus::Active);
        assert_eq!(EmployeeStatus::from_wire("suspended"), EmployeeStatus::Inactive);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("INACTIVE".parse::<EmployeeStatus>().unwrap(), EmployeeStatus::Inactive);
        assert_eq!(EmployeeStatus::Inactive.as_wire(), "inactive");
        assert_eq!(EmployeeStatus::Active.to_string(), "active");
    }
}
