//! Lazily seeded, lock-guarded vehicle registry.
//!
//! # Responsibility
//! - Hold the vehicle list for the lifetime of one server process.
//! - Seed it on first access and serialize every mutation.
//!
//! # Invariants
//! - State moves `uninitialized -> populated` at most once; the seeder is
//!   called at most once even under concurrent first access.
//! - Writers hold the write half of the guard for the whole mutation.
//! - Readers take the read half, so a snapshot never observes a partial write.
//! - Assigned ids only grow: `max(existing ids, last assigned) + 1`.

use crate::model::validation::ValidationErrors;
use crate::model::vehicle::{Vehicle, VehicleDraft, VehicleId};
use crate::registry::seeder::{seed_vehicles, SEED_VEHICLE_COUNT};
use log::{debug, info};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Registry operation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    NotFound(VehicleId),
    Validation(ValidationErrors),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Vehicle with ID {id} not found"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationErrors> for RegistryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

type SeedFn = Box<dyn Fn() -> Vec<Vehicle> + Send + Sync>;

/// Populated registry contents.
struct VehicleStore {
    vehicles: Vec<Vehicle>,
    last_assigned_id: VehicleId,
}

impl VehicleStore {
    fn new(vehicles: Vec<Vehicle>) -> Self {
        let last_assigned_id = vehicles.iter().map(|v| v.id).max().unwrap_or(0);
        Self {
            vehicles,
            last_assigned_id,
        }
    }

    fn next_id(&self) -> VehicleId {
        let max_existing = self.vehicles.iter().map(|v| v.id).max().unwrap_or(0);
        max_existing.max(self.last_assigned_id) + 1
    }

    fn position(&self, id: VehicleId) -> Option<usize> {
        self.vehicles.iter().position(|vehicle| vehicle.id == id)
    }
}

/// Process-wide vehicle registry, shared by reference across handlers.
///
/// `None` in the guarded slot means the seeder has not run yet.
pub struct VehicleRegistry {
    state: RwLock<Option<VehicleStore>>,
    seeder: SeedFn,
}

impl VehicleRegistry {
    /// Registry seeded with `SEED_VEHICLE_COUNT` random vehicles.
    pub fn new() -> Self {
        Self::with_seeder(|| seed_vehicles(&mut rand::thread_rng(), SEED_VEHICLE_COUNT))
    }

    /// Registry seeded from the given random source.
    pub fn with_rng<R: Rng + Send + 'static>(rng: R) -> Self {
        let rng = Mutex::new(rng);
        Self::with_seeder(move || {
            let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
            seed_vehicles(&mut *rng, SEED_VEHICLE_COUNT)
        })
    }

    /// Registry whose first access yields no records.
    pub fn empty() -> Self {
        Self::with_seeder(Vec::new)
    }

    /// Registry with a caller-supplied seeding routine.
    pub fn with_seeder(seeder: impl Fn() -> Vec<Vehicle> + Send + Sync + 'static) -> Self {
        Self {
            state: RwLock::new(None),
            seeder: Box::new(seeder),
        }
    }

    /// Returns whether the seeder has already populated the registry.
    pub fn is_initialized(&self) -> bool {
        self.read_state().is_some()
    }

    /// Returns a copy of the current list, seeding it if needed.
    pub fn snapshot(&self) -> Vec<Vehicle> {
        self.read_populated(|store| store.vehicles.clone())
    }

    /// Looks up one vehicle by id.
    pub fn get(&self, id: VehicleId) -> Option<Vehicle> {
        self.read_populated(|store| {
            store
                .position(id)
                .map(|index| store.vehicles[index].clone())
        })
    }

    pub fn len(&self) -> usize {
        self.read_populated(|store| store.vehicles.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a new vehicle under the next id and returns the stored record.
    ///
    /// An uninitialized registry is seeded before the insert is applied.
    pub fn insert(&self, draft: VehicleDraft) -> RegistryResult<Vehicle> {
        draft.validate()?;

        let mut guard = self.write_state();
        let store = self.populate(&mut guard);
        let id = store.next_id();
        let vehicle = Vehicle::from_draft(id, draft);
        store.vehicles.push(vehicle.clone());
        store.last_assigned_id = id;

        info!("event=vehicle_create module=registry status=ok vehicle_id={id}");
        Ok(vehicle)
    }

    /// Overwrites every field except `id`; `updated` becomes `just now`.
    ///
    /// A missing id leaves the registry untouched.
    pub fn update(&self, id: VehicleId, draft: VehicleDraft) -> RegistryResult<Vehicle> {
        draft.validate()?;

        let mut guard = self.write_state();
        let store = self.populate(&mut guard);
        let index = store.position(id).ok_or(RegistryError::NotFound(id))?;
        let vehicle = &mut store.vehicles[index];
        vehicle.apply_update(draft);

        info!("event=vehicle_update module=registry status=ok vehicle_id={id}");
        Ok(vehicle.clone())
    }

    /// Physically removes a vehicle. Its id is never handed out again.
    pub fn remove(&self, id: VehicleId) -> RegistryResult<()> {
        let mut guard = self.write_state();
        let store = self.populate(&mut guard);
        let index = store.position(id).ok_or(RegistryError::NotFound(id))?;
        store.vehicles.remove(index);

        info!("event=vehicle_delete module=registry status=ok vehicle_id={id}");
        Ok(())
    }

    /// Runs `read` on populated contents, seeding first if required.
    fn read_populated<T>(&self, read: impl FnOnce(&VehicleStore) -> T) -> T {
        {
            let guard = self.read_state();
            if let Some(store) = guard.as_ref() {
                return read(store);
            }
        }

        // Re-checked under the write guard: another caller may have seeded
        // between dropping the read guard and acquiring this one.
        let mut guard = self.write_state();
        read(self.populate(&mut guard))
    }

    fn populate<'a>(&self, slot: &'a mut Option<VehicleStore>) -> &'a mut VehicleStore {
        slot.get_or_insert_with(|| {
            let started_at = Instant::now();
            let vehicles = (self.seeder)();
            info!(
                "event=registry_seed module=registry status=ok count={} duration_ms={}",
                vehicles.len(),
                started_at.elapsed().as_millis()
            );
            VehicleStore::new(vehicles)
        })
    }

    // Every mutation finishes before its guard drops, so a poisoned lock still
    // protects a consistent list.
    fn read_state(&self) -> RwLockReadGuard<'_, Option<VehicleStore>> {
        self.state.read().unwrap_or_else(|poisoned| {
            debug!("event=registry_lock module=registry status=recovered mode=read");
            poisoned.into_inner()
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<VehicleStore>> {
        self.state.write().unwrap_or_else(|poisoned| {
            debug!("event=registry_lock module=registry status=recovered mode=write");
            poisoned.into_inner()
        })
    }
}

impl Default for VehicleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
