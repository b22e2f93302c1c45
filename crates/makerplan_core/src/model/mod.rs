//! Domain model for projects and their child records.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep one project-centric aggregate shape for all read paths.
//!
//! # Invariants
//! - A persisted record is identified by a store-generated `ProjectId`.
//! - Child collections are populated only by explicit aggregate loads.

pub mod project;
