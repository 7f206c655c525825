//! # carstore-core
//!
//! Core logic for the car registry service.
//!
//! This crate is framework-agnostic: it knows nothing about HTTP and can be
//! driven by any front end that holds a [`CarStore`].
//!
//! ## Key Concepts
//!
//! - **Car**: A single record (id, brand, model, mileage, owners_count)
//! - **CarRegistry**: The ordered sequence of cars, as stored on disk
//! - **CarStore**: The registry plus the file it mirrors every mutation to

pub mod error;
pub mod persistence;
pub mod store;

/// Data file used when none is configured.
pub const DEFAULT_DATA_FILE: &str = "data.json";

// Re-export commonly used types
pub use error::StoreError;
pub use persistence::{Car, CarPatch, CarRegistry};
pub use store::CarStore;
