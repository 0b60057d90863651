//! In-memory vehicle registry.
//!
//! # Responsibility
//! - Own the process-wide vehicle list behind one guard.
//! - Populate the list lazily from the synthetic seeder on first access.
//! - Derive dashboard summaries from point-in-time snapshots.
//!
//! # Invariants
//! - The seeder runs at most once per registry instance.
//! - Vehicle ids are unique and never reused after deletion.
//! - Nothing outside `VehicleRegistry` touches the backing list.

pub mod seeder;
pub mod summary;
pub mod vehicle_registry;
