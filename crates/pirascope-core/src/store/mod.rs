// ── Stores ──
//
// One store per dashboard area. Each owns its state behind a `StateCell`
// and is the only writer of it. Views read snapshots or subscribe.

mod assets;
mod auth;
pub(crate) mod cell;
mod employees;
mod reports;

pub use assets::{AssetState, AssetStore, DEFAULT_PAGE_SIZE};
pub use auth::{AuthState, AuthStore};
pub use employees::{EmployeeQuery, EmployeeState, EmployeeStore};
pub use reports::{ReportState, ReportStore, validate_link};

use tracing::warn;

use crate::error::CoreError;
use crate::notify::{NoticeLevel, Notifier};
use cell::StateCell;

/// The loading/error pair every store state carries.
pub(crate) trait Loadable {
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
}

macro_rules! impl_loadable {
    ($($state:ty),+ $(,)?) => {
        $(impl crate::store::Loadable for $state {
            fn set_loading(&mut self, loading: bool) {
                self.is_loading = loading;
            }
            fn set_error(&mut self, error: Option<String>) {
                self.error = error;
            }
        })+
    };
}
pub(crate) use impl_loadable;

/// Clear the previous error and raise the loading flag.
pub(crate) fn begin<S: Loadable + Clone + Send + Sync + 'static>(cell: &StateCell<S>) {
    cell.update(|s| {
        s.set_error(None);
        s.set_loading(true);
    });
}

/// Record a failed action: stored error, loading cleared, error notice.
/// Everything else in the state is left as it was.
pub(crate) fn fail<S: Loadable + Clone + Send + Sync + 'static>(
    cell: &StateCell<S>,
    notifier: &dyn Notifier,
    err: &CoreError,
    fallback: &str,
) {
    let message = err.user_message(fallback);
    warn!(error = %err, "{fallback}");
    cell.update(|s| {
        s.set_loading(false);
        s.set_error(Some(message.clone()));
    });
    notifier.notify(NoticeLevel::Error, &message);
}
