//! Role to permission lookup and access-code login.
//!
//! # Responsibility
//! - Map the four dashboard roles to their fixed permission sets.
//! - Check role access codes for the login flow.
//!
//! # Invariants
//! - Unknown or missing roles resolve to the guest profile.
//! - Guest has no access code and can never log in.
//! - Permissions are returned to callers only; nothing here enforces them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Operator,
    User,
    Guest,
}

impl Role {
    /// Lowercase lookup key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::User => "user",
            Self::Guest => "guest",
        }
    }

    /// Parses a role name case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "operator" => Some(Self::Operator),
            "user" => Some(Self::User),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionLevel {
    Write,
    Read,
    None,
}

/// Per-area permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub dashboard: PermissionLevel,
    pub vehicles: PermissionLevel,
    pub activities: PermissionLevel,
}

/// What the client receives for a role lookup or a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessProfile {
    pub role: Role,
    pub permissions: Permissions,
}

const fn profile(
    role: Role,
    dashboard: PermissionLevel,
    vehicles: PermissionLevel,
    activities: PermissionLevel,
) -> AccessProfile {
    AccessProfile {
        role,
        permissions: Permissions {
            dashboard,
            vehicles,
            activities,
        },
    }
}

const GUEST_PROFILE: AccessProfile = profile(
    Role::Guest,
    PermissionLevel::Read,
    PermissionLevel::None,
    PermissionLevel::None,
);

const ACCESS_TABLE: [AccessProfile; 4] = [
    profile(
        Role::Admin,
        PermissionLevel::Write,
        PermissionLevel::Write,
        PermissionLevel::Read,
    ),
    profile(
        Role::Operator,
        PermissionLevel::Read,
        PermissionLevel::Write,
        PermissionLevel::None,
    ),
    profile(
        Role::User,
        PermissionLevel::Read,
        PermissionLevel::Read,
        PermissionLevel::None,
    ),
    GUEST_PROFILE,
];

const ACCESS_CODES: [(Role, &str); 3] = [
    (Role::Admin, "1111"),
    (Role::Operator, "2222"),
    (Role::User, "3333"),
];

static PROFILES_BY_KEY: Lazy<BTreeMap<&'static str, AccessProfile>> = Lazy::new(|| {
    ACCESS_TABLE
        .iter()
        .map(|profile| (profile.role.key(), *profile))
        .collect()
});

/// Login rejection reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// Role or access code was blank.
    MissingCredentials,
    UnknownRole,
    InvalidAccessCode,
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredentials => f.write_str("Role and access code are required"),
            Self::UnknownRole => f.write_str("Invalid role"),
            Self::InvalidAccessCode => f.write_str("Invalid access code"),
        }
    }
}

impl Error for AccessError {}

/// Resolves a role name to its profile; missing or unknown roles get guest.
pub fn access_for_role(role: Option<&str>) -> AccessProfile {
    role.map(|value| value.trim().to_ascii_lowercase())
        .and_then(|key| PROFILES_BY_KEY.get(key.as_str()).copied())
        .unwrap_or(GUEST_PROFILE)
}

/// Checks a role's access code and returns its profile on success.
pub fn login(role: &str, access_code: &str) -> Result<AccessProfile, AccessError> {
    if role.trim().is_empty() || access_code.trim().is_empty() {
        return Err(AccessError::MissingCredentials);
    }

    let role = Role::parse(role).ok_or(AccessError::UnknownRole)?;
    let (_, expected) = ACCESS_CODES
        .iter()
        .find(|(candidate, _)| *candidate == role)
        .ok_or(AccessError::UnknownRole)?;

    if *expected != access_code {
        return Err(AccessError::InvalidAccessCode);
    }

    Ok(access_for_role(Some(role.key())))
}
