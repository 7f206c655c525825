//! Car registry persistence and record operations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::types::{Car, CarPatch, CarRegistry};
use crate::error::StoreError;

/// Sibling temp file used for write-then-rename.
fn temp_path(path: &Path) -> PathBuf {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}

/// Save the car registry to disk.
///
/// Pretty-prints with two-space indentation and a trailing newline, writes
/// to `<file>.tmp`, then renames over `path`. The temp file is removed if
/// either step fails.
pub fn save_car_registry(path: &Path, registry: &CarRegistry) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path(path);

    let mut json = serde_json::to_string_pretty(registry)?;
    json.push('\n');
    let written = fs::write(&temp_path, json).and_then(|_| fs::rename(&temp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::Io(e));
    }

    Ok(())
}

/// Load the car registry from disk.
///
/// Returns an empty registry if the file doesn't exist.
pub fn load_car_registry(path: &Path) -> Result<CarRegistry, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CarRegistry::default()),
        Err(e) => return Err(StoreError::Io(e)),
    };

    Ok(serde_json::from_str(&contents)?)
}

// ============================================================================
// Registry Operations
// ============================================================================

/// Id for the next created car: the current count plus one.
///
/// After a deletion this can repeat an id that is still in use.
pub fn next_id(registry: &CarRegistry) -> i64 {
    registry.cars.len() as i64 + 1
}

/// Position of the first car with the given id.
pub fn find_car_index(registry: &CarRegistry, id: i64) -> Option<usize> {
    registry.cars.iter().position(|c| c.id == id)
}

/// Find a car by id.
pub fn find_car(registry: &CarRegistry, id: i64) -> Option<&Car> {
    registry.cars.iter().find(|c| c.id == id)
}

/// Append a car with a store-assigned id and return the stored record.
pub fn insert_car(registry: &mut CarRegistry, mut car: Car) -> Car {
    car.id = next_id(registry);
    registry.cars.push(car.clone());
    car
}

/// Overwrite the car at `index`, keeping its original id.
pub fn replace_car_at(registry: &mut CarRegistry, index: usize, mut car: Car) -> Car {
    car.id = registry.cars[index].id;
    registry.cars[index] = car.clone();
    car
}

/// Apply a partial update to the car at `index`.
pub fn patch_car_at(registry: &mut CarRegistry, index: usize, patch: &CarPatch) -> Car {
    let car = &mut registry.cars[index];
    patch.apply_to(car);
    car.clone()
}

/// Remove the car at `index`, shifting later cars down.
pub fn remove_car_at(registry: &mut CarRegistry, index: usize) -> Car {
    registry.cars.remove(index)
}

// ============================================================================
// TESTS
// ============================================================================
