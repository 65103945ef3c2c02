// pirascope-core: Reactive stores between pirascope-api and consumers (CLI).
//
// Stores hold what the dashboard views render; `charts` and `pagination`
// turn that state into display-ready shapes without touching the network.

pub mod charts;
pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod notify;
pub mod pagination;
pub mod requests;
pub mod session;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, DEFAULT_API_URL, TlsVerification};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use notify::{NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use requests::{EmployeeUpdate, NewEmployee};
pub use session::{
    FileSessionStore, MemorySessionStore, PersistedSession, SESSION_STORAGE_KEY, SessionStore,
};
pub use store::{
    AssetState, AssetStore, AuthState, AuthStore, EmployeeQuery, EmployeeState, EmployeeStore,
    ReportState, ReportStore,
};
pub use stream::StateStream;

pub use model::{
    Asset, AssetDetail, Employee, EmployeeStatus, ExternalReport, PageInfo, ReportStatus,
    SessionUser,
};
