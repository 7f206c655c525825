//! Persistence layer for the car registry.
//!
//! # Overview
//!
//! All cars live in one JSON file (`data.json` by default):
//!
//! ```text
//! {
//!   "cars": [
//!     { "id": 1, "brand": "Toyota", "model": "Corolla", "mileage": 0, "owners_count": 1 }
//!   ]
//! }
//! ```
//!
//! # Design Principles
//!
//! ## Full Rewrites
//!
//! Every save serializes the whole registry. There is no append or patch
//! format on disk.
//!
//! ## Atomic Writes
//!
//! Saves use write-then-rename to prevent corruption:
//!
//! 1. Write to `data.json.tmp`
//! 2. Rename to `data.json` (atomic on Unix)
//!
//! # Usage
//!
//! ```ignore
//! use carstore_core::persistence::{insert_car, load_car_registry, save_car_registry};
//! ```

pub mod cars;
pub mod types;

pub use cars::{
    find_car, find_car_index, insert_car, load_car_registry, next_id, patch_car_at,
    remove_car_at, replace_car_at, save_car_registry,
};
pub use types::*;
