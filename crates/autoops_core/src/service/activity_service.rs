//! Activity log use-case service.

use crate::model::activity::{ActivityLog, NewActivity};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;
use std::time::{SystemTime, UNIX_EPOCH};

/// Activity service facade over repository implementations.
pub struct ActivityService<R: ActivityRepository> {
    repo: R,
}

impl<R: ActivityRepository> ActivityService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists logs newest first.
    pub fn list_activities(&self) -> RepoResult<Vec<ActivityLog>> {
        self.repo.list_activities()
    }

    /// Records one activity stamped with the current UTC time.
    pub fn record_activity(&self, user: &str, action: &str) -> RepoResult<ActivityLog> {
        self.record_activity_at(user, action, now_epoch_ms())
    }

    /// Records one activity at an explicit epoch-millisecond timestamp.
    pub fn record_activity_at(
        &self,
        user: &str,
        action: &str,
        time_ms: i64,
    ) -> RepoResult<ActivityLog> {
        let activity = NewActivity::parse(user, action)?;
        let id = self.repo.insert_activity(&activity, time_ms)?;
        info!("event=activity_create module=service status=ok activity_id={id}");
        self.repo.get_activity(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("activity {id} missing after insert"))
        })
    }

    /// Removes every activity log.
    pub fn clear_activities(&self) -> RepoResult<usize> {
        let removed = self.repo.clear_activities()?;
        info!("event=activity_clear module=service status=ok removed={removed}");
        Ok(removed)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
