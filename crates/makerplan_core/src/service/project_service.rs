//! Project use-case service.
//!
//! # Responsibility
//! - Provide stable project entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic and adds no field validation.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::{ProjectRepository, RepoResult};

/// Use-case service wrapper for project operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

/// Request model for creating a project from gathered detail fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    /// Required user-facing name.
    pub project_name: String,
    /// Planned effort in hours.
    pub estimated_hours: Option<f64>,
    /// Effort spent so far in hours.
    pub actual_hours: Option<f64>,
    /// Subjective 1-5 rating, stored as entered.
    pub difficulty: Option<i64>,
    pub notes: Option<String>,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a caller-built transient project.
    pub fn add_project(&self, project: &Project) -> RepoResult<Project> {
        self.repo.insert_project(project)
    }

    /// Creates a project from single-entry command input.
    ///
    /// # Contract
    /// - Builds a transient record; the draft carries no identity.
    /// - Returns the persisted copy with `project_id` set.
    pub fn create_project(&self, draft: &ProjectDraft) -> RepoResult<Project> {
        let mut project = Project::new(draft.project_name.clone());
        project.estimated_hours = draft.estimated_hours;
        project.actual_hours = draft.actual_hours;
        project.difficulty = draft.difficulty;
        project.notes = draft.notes.clone();
        self.repo.insert_project(&project)
    }

    /// Lists all projects ordered by name, child collections empty.
    pub fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.fetch_all_projects()
    }

    /// Gets one project aggregate by id, children populated.
    pub fn fetch_project_by_id(&self, project_id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.fetch_project_by_id(project_id)
    }

    /// Updates the scalar detail fields of one persisted project.
    ///
    /// Returns repository-level not-found or unsaved-record errors unchanged.
    pub fn modify_project_details(&self, project: &Project) -> RepoResult<()> {
        self.repo.modify_project_details(project)
    }

    /// Deletes one project by id including its child rows.
    pub fn delete_project(&self, project_id: ProjectId) -> RepoResult<()> {
        self.repo.delete_project(project_id)
    }
}
