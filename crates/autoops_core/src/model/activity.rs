//! Activity log domain model.

use crate::model::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

pub type ActivityId = i64;

pub const ACTIVITY_USER_MAX_CHARS: usize = 100;
pub const ACTIVITY_ACTION_MAX_CHARS: usize = 500;

/// One audit line: who did what, and when (UTC, `YYYY-MM-DD HH:MM:SS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: ActivityId,
    pub user: String,
    pub action: String,
    pub time: String,
}

/// Validated input for a new activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub user: String,
    pub action: String,
}

impl NewActivity {
    /// Trims and validates raw input.
    pub fn parse(user: &str, action: &str) -> Result<Self, ValidationErrors> {
        let user = user.trim();
        let action = action.trim();
        let mut errors = ValidationErrors::new();
        errors.require_text("user", "User", user, ACTIVITY_USER_MAX_CHARS);
        errors.require_text("action", "Action", action, ACTIVITY_ACTION_MAX_CHARS);
        errors.into_result().map(|()| Self {
            user: user.to_string(),
            action: action.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::NewActivity;

    #[test]
    fn parse_trims_and_reports_every_missing_field() {
        let ok = NewActivity::parse(" admin ", " deleted vehicle 4 ").unwrap();
        assert_eq!(ok.user, "admin");
        assert_eq!(ok.action, "deleted vehicle 4");

        let err = NewActivity::parse("", " ").unwrap_err();
        assert_eq!(err.errors().len(), 2);
    }
}
