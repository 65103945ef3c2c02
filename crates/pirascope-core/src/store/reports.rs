// ── Report store ──

use std::sync::Arc;

use tracing::debug;
use url::Url;

use pirascope_api::ApiClient;

use super::cell::StateCell;
use super::{begin, fail, impl_loadable};
use crate::error::CoreError;
use crate::model::ExternalReport;
use crate::notify::{NoticeLevel, Notifier};
use crate::stream::StateStream;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportState {
    pub reports: Vec<ExternalReport>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl_loadable!(ReportState);

/// Externally submitted piracy links.
pub struct ReportStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: StateCell<ReportState>,
}

/// Check a link before it is sent. Returns the message a form shows inline.
pub fn validate_link(link: &str) -> Result<Url, &'static str> {
    let link = link.trim();
    if link.is_empty() {
        return Err("Please enter a link");
    }
    Url::parse(link).map_err(|_| "Please enter a valid URL")
}

impl ReportStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: StateCell::new(ReportState::default()),
        }
    }

    pub fn state(&self) -> Arc<ReportState> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> StateStream<ReportState> {
        self.state.subscribe()
    }

    pub async fn get_reports(&self) -> Result<(), CoreError> {
        begin(&self.state);
        match self.api.list_reports().await {
            Ok(reports) => {
                let reports: Vec<ExternalReport> =
                    reports.into_iter().map(ExternalReport::from).collect();
                debug!(count = reports.len(), "reports loaded");
                self.state.update(|s| {
                    s.reports = reports;
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                fail(&self.state, self.notifier.as_ref(), &err, "Failed to fetch reports");
                Err(err)
            }
        }
    }

    /// Submit a link. Invalid links never reach the network. Returns
    /// whether the submission was accepted, so a form knows to reset.
    pub async fn add_report(&self, link: &str) -> bool {
        let url = match validate_link(link) {
            Ok(url) => url,
            Err(message) => {
                debug!(message, "rejected report link");
                self.state.update(|s| s.error = Some(message.to_owned()));
                return false;
            }
        };

        begin(&self.state);
        // Send what the user typed; `Url` would normalise it.
        if let Err(e) = self.api.add_report(link.trim()).await {
            let err = CoreError::from(e);
            fail(&self.state, self.notifier.as_ref(), &err, "Failed to add report");
            return false;
        }
        debug!(%url, "report submitted");
        self.notifier
            .notify(NoticeLevel::Success, "Report added successfully");
        if let Err(e) = self.get_reports().await {
            debug!(error = %e, "report refresh failed");
        }
        true
    }
}
