//! Synthetic vehicle data for a freshly started registry.

use crate::model::vehicle::{Vehicle, VehicleHealth, VehicleId};
use rand::Rng;

/// Number of vehicles generated on first registry access.
pub const SEED_VEHICLE_COUNT: usize = 100;

/// Vehicle makes used for generated names (drawn with replacement).
pub const VEHICLE_MAKES: [&str; 24] = [
    "Toyota",
    "Honda",
    "Ford",
    "Chevrolet",
    "BMW",
    "Mercedes-Benz",
    "Audi",
    "Volkswagen",
    "Nissan",
    "Hyundai",
    "Kia",
    "Mazda",
    "Subaru",
    "Lexus",
    "Acura",
    "Infiniti",
    "Volvo",
    "Jaguar",
    "Land Rover",
    "Porsche",
    "Tesla",
    "Genesis",
    "Cadillac",
    "Lincoln",
];

const PROJECT_LETTERS: u8 = 26;

/// Generates `count` vehicles with ids `1..=count` in order.
///
/// Shape is fixed; content comes from `rng`. Pass a seeded RNG for
/// reproducible output.
pub fn seed_vehicles<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Vehicle> {
    (0..count)
        .map(|index| {
            let minutes_ago: i32 = rng.gen_range(0..10_000);
            Vehicle {
                id: VehicleId::try_from(index + 1).unwrap_or(VehicleId::MAX),
                name: VEHICLE_MAKES[rng.gen_range(0..VEHICLE_MAKES.len())].to_string(),
                model: format!("Model-{}", rng.gen_range(100..1000_u32)),
                project: format!("Project {}", project_letter(index)),
                health: VehicleHealth::ALL[rng.gen_range(0..VehicleHealth::ALL.len())],
                scc: rng.gen_range(0..100),
                temperature: rng.gen_range(0..300),
                torque: rng.gen_range(0..700),
                speed: rng.gen_range(0..10),
                updated: format!("{} min ago", minutes_ago / 60),
            }
        })
        .collect()
}

fn project_letter(index: usize) -> char {
    // Cannot truncate: the remainder is always below 26.
    let offset = (index % usize::from(PROJECT_LETTERS)) as u8;
    char::from(b'A' + offset)
}
