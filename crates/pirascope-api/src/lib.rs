// pirascope-api: Async Rust client for the Pirascope anti-piracy monitoring API

pub mod assets;
pub mod auth;
pub mod client;
pub mod employees;
pub mod error;
pub mod models;
pub mod reports;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
