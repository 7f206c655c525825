//! Persistence data types.
//!
//! # Data Model Overview
//!
//! The whole registry lives in a single JSON file:
//!
//! ```text
//! data.json
//! {
//!   "cars": [
//!     { "id": 1, "brand": "...", "model": "...", "mileage": 0, "owners_count": 1 },
//!     ...
//!   ]
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Zero-value defaults**: Absent fields decode as `""` / `0`
//! - **Stable field order**: Serialized in declaration order
//! - **Lenient patches**: Wrong-typed patch fields are skipped, not rejected

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Car Types
// ============================================================================

/// A single car record.
///
/// Absent or `null` fields decode as their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Car {
    /// Store-assigned identifier. Ignored on create.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,

    /// Manufacturer name.
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,

    /// Model name.
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,

    /// Odometer reading.
    #[serde(deserialize_with = "null_as_default")]
    pub mileage: i64,

    /// Number of previous owners.
    #[serde(deserialize_with = "null_as_default")]
    pub owners_count: i64,
}

/// The registry file containing every car.
///
/// Saved to `data.json`. A missing or `null` `cars` key loads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRegistry {
    /// All cars, in insertion order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cars: Vec<Car>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Patch Types
// ============================================================================

/// A partial update: one optional slot per mutable field.
///
/// Each slot is filled only when the incoming JSON value has the expected
/// type. `"mileage": "abc"` leaves `mileage` as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CarPatch {
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub model: Option<String>,

    #[serde(default, deserialize_with = "lenient_integer")]
    pub mileage: Option<i64>,

    #[serde(default, deserialize_with = "lenient_integer")]
    pub owners_count: Option<i64>,
}

impl CarPatch {
    /// True if no slot is filled.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.model.is_none()
            && self.mileage.is_none()
            && self.owners_count.is_none()
    }

    /// Overwrite every filled slot on `car`.
    pub fn apply_to(&self, car: &mut Car) {
        if let Some(brand) = &self.brand {
            car.brand = brand.clone();
        }
        if let Some(model) = &self.model {
            car.model = model.clone();
        }
        if let Some(mileage) = self.mileage {
            car.mileage = mileage;
        }
        if let Some(owners_count) = self.owners_count {
            car.owners_count = owners_count;
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Fractional numbers truncate toward zero.
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))),
        _ => Ok(None),
    }
}

// ============================================================================
// TESTS
// ============================================================================
