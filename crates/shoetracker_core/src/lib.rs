//! Core domain logic for ShoeTracker.
//! This crate is the single source of truth for try-on invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::try_on::{TryOn, TryOnDraft, TryOnId, TryOnValidationError};
pub use repo::try_on_repo::{RepoError, RepoResult, SqliteTryOnRepository, TryOnRepository};
pub use search::predicate::{filter_try_ons, PurchaseFilter, TryOnFilter};
pub use service::detail::{StarFill, TryOnDetail};
pub use service::try_on_service::{
    ServiceResult, SubscriptionId, TryOnChange, TryOnService, TryOnServiceError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
