// External report endpoints
//
// Third-party piracy link submissions. The add endpoint's path
// (`add_piray_link`) is spelled that way on the server.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiExternalReport, ReportList};

impl ApiClient {
    /// List submitted external reports.
    ///
    /// `GET company/get_external_report`
    pub async fn list_reports(&self) -> Result<Vec<ApiExternalReport>, Error> {
        let url = self.endpoint_url("company/get_external_report")?;
        debug!("listing external reports");
        let list: ReportList = self.get(url).await?;
        Ok(list.external_reports)
    }

    /// Submit a piracy link. The caller is responsible for URL validation.
    ///
    /// `POST company/add_piray_link` with `{"link": "..."}`
    pub async fn add_report(&self, link: &str) -> Result<(), Error> {
        let url = self.endpoint_url("company/add_piray_link")?;
        debug!(link, "submitting piracy link");
        let _: serde_json::Value = self.post(url, &json!({ "link": link })).await?;
        Ok(())
    }
}
