//! Domain models for tasks, activity logs and vehicles.
//!
//! # Responsibility
//! - Define the canonical records shared by repositories, the registry and
//!   the HTTP layer.
//! - Own field-level validation so every write path applies the same rules.
//!
//! # Invariants
//! - Every record is identified by a positive integer id assigned by storage.
//! - Tasks are soft-deleted; vehicles and activity logs are removed physically.

pub mod activity;
pub mod task;
pub mod validation;
pub mod vehicle;
