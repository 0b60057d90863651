//! Axum handlers, one module per resource.
//!
//! Handlers decode input, call into core and wrap results in `ApiResponse`.
//! Body and path extractors are taken as `Result` so malformed input still
//! gets the envelope instead of the framework's plain-text rejection.

pub mod access;
pub mod activities;
pub mod health;
pub mod tasks;
pub mod vehicles;
