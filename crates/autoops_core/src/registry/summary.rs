//! Dashboard counts over a registry snapshot.

use crate::model::vehicle::{Vehicle, VehicleHealth};
use serde::{Deserialize, Serialize};

/// Number of vehicles the dashboard shows in its "latest" strip.
pub const DEFAULT_LATEST_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub ok: usize,
    pub warn: usize,
    pub error: usize,
    /// First `latest_n` vehicles in snapshot order.
    pub latest: Vec<Vehicle>,
}

/// Counts vehicles per health state and keeps the first `latest_n`.
///
/// Works on a caller-owned snapshot, so no registry lock is held.
pub fn summarize(snapshot: &[Vehicle], latest_n: usize) -> DashboardSummary {
    let count = |health: VehicleHealth| {
        snapshot
            .iter()
            .filter(|vehicle| vehicle.health == health)
            .count()
    };

    DashboardSummary {
        total: snapshot.len(),
        ok: count(VehicleHealth::Ok),
        warn: count(VehicleHealth::Warn),
        error: count(VehicleHealth::Error),
        latest: snapshot.iter().take(latest_n).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::model::vehicle::{Vehicle, VehicleDraft, VehicleHealth};

    fn vehicle(id: i64, health: VehicleHealth) -> Vehicle {
        let mut draft = VehicleDraft::named(format!("car-{id}"));
        draft.health = health;
        Vehicle::from_draft(id, draft)
    }

    #[test]
    fn counts_each_health_state() {
        let snapshot = vec![
            vehicle(1, VehicleHealth::Ok),
            vehicle(2, VehicleHealth::Error),
            vehicle(3, VehicleHealth::Ok),
            vehicle(4, VehicleHealth::Warn),
        ];
        let summary = summarize(&snapshot, 2);

        assert_eq!(summary.total, 4);
        assert_eq!((summary.ok, summary.warn, summary.error), (2, 1, 1));
        let latest_ids: Vec<_> = summary.latest.iter().map(|v| v.id).collect();
        assert_eq!(latest_ids, vec![1, 2]);
    }

    #[test]
    fn latest_is_capped_by_snapshot_length() {
        let summary = summarize(&[vehicle(8, VehicleHealth::Warn)], 5);
        assert_eq!(summary.latest.len(), 1);

        let empty = summarize(&[], 5);
        assert_eq!(empty.total, 0);
        assert!(empty.latest.is_empty());
    }
}
