//! CarStore - the registry and the file it is mirrored to.

use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::persistence::{self, Car, CarPatch, CarRegistry};

/// Owns the in-memory car sequence and keeps the data file in sync with it.
///
/// Created once at startup with [`CarStore::open`] and handed to whichever
/// front end serves requests. The store does no locking of its own; callers
/// sharing it across threads wrap it in a single mutex.
///
/// Mutations run against a copy of the registry. The copy replaces the
/// in-memory state only after it has been written to disk, so a failed save
/// leaves both the file and the sequence as they were.
#[derive(Debug)]
pub struct CarStore {
    path: PathBuf,
    registry: CarRegistry,
}

impl CarStore {
    /// Load the store from `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let registry = persistence::load_car_registry(&path)?;
        log::info!("Loaded {} cars from {}", registry.cars.len(), path.display());
        Ok(Self { path, registry })
    }

    /// Path of the backing data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All cars, in insertion order.
    pub fn cars(&self) -> &[Car] {
        &self.registry.cars
    }

    /// Look up a car by id.
    pub fn get(&self, id: i64) -> Option<&Car> {
        persistence::find_car(&self.registry, id)
    }

    /// Write the current snapshot to the data file.
    pub fn save(&self) -> Result<(), StoreError> {
        persistence::save_car_registry(&self.path, &self.registry)
    }

    /// Append a car with a store-assigned id.
    pub fn create(&mut self, car: Car) -> Result<Car, StoreError> {
        let created = self.commit(|registry| Ok(persistence::insert_car(registry, car)))?;
        log::info!("Created car {}", created.id);
        Ok(created)
    }

    /// Replace every mutable field of car `id`. The id itself is kept.
    pub fn replace(&mut self, id: i64, car: Car) -> Result<Car, StoreError> {
        let updated = self.commit(|registry| {
            let index = persistence::find_car_index(registry, id)
                .ok_or(StoreError::NotFound(id))?;
            Ok(persistence::replace_car_at(registry, index, car))
        })?;
        log::info!("Replaced car {}", id);
        Ok(updated)
    }

    /// Overwrite only the fields present in `patch`.
    pub fn patch(&mut self, id: i64, patch: &CarPatch) -> Result<Car, StoreError> {
        let updated = self.commit(|registry| {
            let index = persistence::find_car_index(registry, id)
                .ok_or(StoreError::NotFound(id))?;
            Ok(persistence::patch_car_at(registry, index, patch))
        })?;
        log::info!("Patched car {}", id);
        Ok(updated)
    }

    /// Remove car `id` and return it.
    pub fn delete(&mut self, id: i64) -> Result<Car, StoreError> {
        let removed = self.commit(|registry| {
            let index = persistence::find_car_index(registry, id)
                .ok_or(StoreError::NotFound(id))?;
            Ok(persistence::remove_car_at(registry, index))
        })?;
        log::info!("Deleted car {}", id);
        Ok(removed)
    }

    /// Apply `op` to a copy of the registry, persist it, then commit.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut CarRegistry) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut next = self.registry.clone();
        let result = op(&mut next)?;

        if let Err(e) = persistence::save_car_registry(&self.path, &next) {
            log::error!("Failed to save {}: {}", self.path.display(), e);
            return Err(e);
        }

        self.registry = next;
        Ok(result)
    }
}

// ============================================================================
// TESTS
// ============================================================================
