// Session authentication
//
// Cookie-based company login and session check. The login endpoint sets
// a session cookie in the client's jar; subsequent requests use that
// cookie automatically. There is no server-side logout endpoint.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiUser, LoginResponse, SessionResponse};

impl ApiClient {
    /// Authenticate with email/password.
    ///
    /// `POST auth/company_login`. A rejection that carries a server message
    /// (bad password, unknown email) is reported as [`Error::Authentication`];
    /// bare failures keep their status.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<ApiUser, Error> {
        let url = self.endpoint_url("auth/company_login")?;
        debug!(email, "logging in");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp: LoginResponse = self.post(url, &body).await.map_err(|e| match e {
            Error::Api {
                message: Some(message),
                ..
            } => Error::Authentication { message },
            other => other,
        })?;

        debug!(user_id = resp.user.user_id, "login successful");
        Ok(resp.user)
    }

    /// Check whether the current cookie session is still valid.
    ///
    /// `GET auth/check_session`. Returns `None` when the server reports no user.
    pub async fn check_session(&self) -> Result<Option<ApiUser>, Error> {
        let url = self.endpoint_url("auth/check_session")?;
        debug!("checking session");
        let resp: SessionResponse = self.get(url).await?;
        Ok(resp.user)
    }
}
