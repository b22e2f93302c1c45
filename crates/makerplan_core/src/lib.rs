//! Core domain logic for MakerPlan.
//! This crate owns project persistence and its data-access contracts.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{Category, Material, Project, ProjectId, Step};
pub use repo::project_repo::{ProjectRepository, RepoError, RepoResult, SqliteProjectRepository};
pub use service::project_service::{ProjectDraft, ProjectService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
