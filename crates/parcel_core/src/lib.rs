//! Core persistence and lifecycle logic for the parcel tracker.
//!
//! The parcel store (`repo::parcel_repo`) is a leaf adapter over a borrowed
//! SQLite connection. Connection bootstrap, configuration, logging and
//! lifecycle policy live in sibling modules and are never called by the store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, TrackerConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
pub use repo::parcel_repo::{ParcelRepository, RepoError, RepoResult, SqliteParcelRepository};
pub use service::parcel_service::{ParcelService, ParcelServiceError, ParcelServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
