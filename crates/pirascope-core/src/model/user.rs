use serde::{Deserialize, Serialize};

/// The signed-in company user, as reported by the session endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub profile: Option<String>,
    pub company_id: Option<u64>,
    pub user_type: Option<String>,
    pub logged_in: bool,
}
