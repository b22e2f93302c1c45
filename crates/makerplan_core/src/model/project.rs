//! Project domain model.
//!
//! # Responsibility
//! - Define the project aggregate and its child records.
//! - Provide the transient-record constructor used before first persistence.
//!
//! # Invariants
//! - `project_id` is `None` until the record is persisted, then stays set.
//! - Child collections are empty until an aggregate load fills them.

use serde::{Deserialize, Serialize};

/// Store-generated identifier for a persisted project.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProjectId = i64;

/// A tracked do-it-yourself project with its materials, steps and categories.
///
/// Scalar detail fields are optional because the interactive client gathers
/// them incrementally; only the name is required at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Generated identity, absent on transient records.
    pub project_id: Option<ProjectId>,
    pub project_name: String,
    /// Planned effort in hours.
    pub estimated_hours: Option<f64>,
    /// Effort spent so far in hours.
    pub actual_hours: Option<f64>,
    /// Subjective 1-5 rating; the store does not enforce the range.
    pub difficulty: Option<i64>,
    pub notes: Option<String>,
    /// Filled by aggregate loads only, never by list queries.
    pub materials: Vec<Material>,
    /// Filled by aggregate loads only, never by list queries.
    pub steps: Vec<Step>,
    /// Filled by aggregate loads only, never by list queries.
    pub categories: Vec<Category>,
}

impl Project {
    /// Creates a transient project carrying only a name.
    ///
    /// # Invariants
    /// - `project_id` starts as `None`.
    /// - Optional detail fields start as `None`, collections empty.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_id: None,
            project_name: project_name.into(),
            estimated_hours: None,
            actual_hours: None,
            difficulty: None,
            notes: None,
            materials: Vec::new(),
            steps: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Returns whether this record has been persisted (id assigned).
    pub fn is_persisted(&self) -> bool {
        self.project_id.is_some()
    }
}

/// One material line item belonging to a project.
///
/// Reconstituted read model: instances only come from the store, so ids are
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub material_id: i64,
    pub project_id: ProjectId,
    pub material_name: String,
    pub num_required: Option<i64>,
    /// Unit cost; quantity math is a client concern.
    pub cost: Option<f64>,
}

/// One ordered instruction step belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_id: i64,
    pub project_id: ProjectId,
    pub step_text: String,
    /// Position within the project; ordering is owned by the store.
    pub step_order: i64,
}

/// A category label; shared across projects via the associative table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}
