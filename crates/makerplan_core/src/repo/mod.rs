//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for projects.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Every repository operation is atomic: commit before return or roll back.
//! - Repository APIs return semantic errors (`NotFound`, `UnsavedProject`) in
//!   addition to DB transport errors.

pub mod project_repo;
