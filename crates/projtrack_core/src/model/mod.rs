//! Domain model for tracked projects.
//!
//! # Responsibility
//! - Define canonical data structures shared by the store and the views.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Projects are never deleted or reordered once stored.

pub mod project;
