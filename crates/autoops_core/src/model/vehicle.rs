//! Vehicle domain model.
//!
//! # Responsibility
//! - Define the registry record and the id-less draft used by writes.
//! - Keep wire names compatible with the dashboard client
//!   (`vehicleName`, `temp`).
//!
//! # Invariants
//! - `health` is always one of `OK | WARN | ERROR`.
//! - `scc` stays within `0..=99`.
//! - `id` is assigned by the registry, never by callers.

use crate::model::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Registry-assigned vehicle identifier.
pub type VehicleId = i64;

pub const VEHICLE_TEXT_MAX_CHARS: usize = 100;
pub const SCC_MAX: i32 = 99;
/// Recency text written by every update.
pub const UPDATED_JUST_NOW: &str = "just now";

/// Coarse health classification shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleHealth {
    Ok,
    Warn,
    Error,
}

impl VehicleHealth {
    pub const ALL: [VehicleHealth; 3] = [Self::Ok, Self::Warn, Self::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Parses a health label case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OK" => Some(Self::Ok),
            "WARN" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

impl Display for VehicleHealth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vehicle in the in-memory registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(rename = "vehicleName")]
    pub name: String,
    pub model: String,
    pub project: String,
    pub health: VehicleHealth,
    pub scc: i32,
    #[serde(rename = "temp")]
    pub temperature: i32,
    pub torque: i32,
    pub speed: i32,
    /// Free-text recency such as `3 min ago`.
    pub updated: String,
}

impl Vehicle {
    /// Materializes a draft under a registry-assigned id.
    pub fn from_draft(id: VehicleId, draft: VehicleDraft) -> Self {
        Self {
            id,
            name: draft.name,
            model: draft.model,
            project: draft.project,
            health: draft.health,
            scc: draft.scc,
            temperature: draft.temperature,
            torque: draft.torque,
            speed: draft.speed,
            updated: draft.updated,
        }
    }

    /// Overwrites every mutable field and stamps `updated` as `just now`.
    ///
    /// The draft's own `updated` text is ignored.
    pub fn apply_update(&mut self, draft: VehicleDraft) {
        self.name = draft.name;
        self.model = draft.model;
        self.project = draft.project;
        self.health = draft.health;
        self.scc = draft.scc;
        self.temperature = draft.temperature;
        self.torque = draft.torque;
        self.speed = draft.speed;
        self.updated = UPDATED_JUST_NOW.to_string();
    }
}

/// Vehicle fields without identity, used by insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    pub name: String,
    pub model: String,
    pub project: String,
    pub health: VehicleHealth,
    pub scc: i32,
    pub temperature: i32,
    pub torque: i32,
    pub speed: i32,
    pub updated: String,
}

impl VehicleDraft {
    /// Draft with the given name and the same defaults the create form uses.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: String::new(),
            project: String::new(),
            health: VehicleHealth::Ok,
            scc: 0,
            temperature: 0,
            torque: 0,
            speed: 0,
            updated: UPDATED_JUST_NOW.to_string(),
        }
    }

    /// Checks every field and reports all violations together.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text(
            "vehicleName",
            "Vehicle name",
            &self.name,
            VEHICLE_TEXT_MAX_CHARS,
        );
        errors.limit_text("model", "Model", &self.model, VEHICLE_TEXT_MAX_CHARS);
        errors.limit_text("project", "Project", &self.project, VEHICLE_TEXT_MAX_CHARS);
        if !(0..=SCC_MAX).contains(&self.scc) {
            errors.push("scc", format!("Scc must be between 0 and {SCC_MAX}"));
        }
        errors.into_result()
    }
}
