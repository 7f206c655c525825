//! HTTP route handlers for the car registry.
//!
//! Every id-addressed route parses `{id}` first, then decodes the body (if
//! any), then takes the store lock for the lookup and mutation. Bodies are
//! read as raw bytes and decoded here so that a missing `Content-Type` is
//! accepted and decode failures map to `400`.
//!
//! Store access runs on the blocking pool: mutations hold the store lock
//! across a file write, which must not stall the async workers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use carstore_core::{Car, CarPatch, CarStore, StoreError};
use serde::de::{DeserializeOwned, Error as _};
use std::sync::Arc;

use super::{ApiError, SharedState};

/// Body for `GET /`.
pub const HELP_TEXT: &str = "REST API is working!
Available routes:
- GET    /              -> this help text
- GET    /cars          -> get a list of cars
- POST   /add_car       -> add a car
- GET    /cars/{id}     -> get a car by id
- PUT    /cars/{id}     -> replace a car
- PATCH  /cars/{id}     -> update some fields of a car
- DELETE /cars/{id}     -> delete a car
";

/// Body for a successful `DELETE /cars/{id}`.
pub const DELETED_MESSAGE: &str = "Car deleted successfully";

const INVALID_BODY: &str = "Invalid request body";

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::InvalidId)
}

/// Decode the first JSON value in `body`.
///
/// Bytes after that value are ignored and a literal `null` yields
/// `T::default()`. An empty body is an error.
fn decode_body<T>(body: &[u8]) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    match serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<T>>()
        .next()
    {
        Some(value) => Ok(value?.unwrap_or_default()),
        None => Err(serde_json::Error::custom("EOF")),
    }
}

/// Run `op` against the locked store on the blocking pool.
async fn with_store<T, F>(state: Arc<SharedState>, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut CarStore) -> Result<T, StoreError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || op(&mut state.store()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(result?)
}

/// Handler for GET /
pub async fn home() -> &'static str {
    HELP_TEXT
}

/// Handler for GET /cars
pub async fn list_cars(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<Vec<Car>>, ApiError> {
    log::debug!("GET /cars");
    let cars = with_store(state, |store| Ok(store.cars().to_vec())).await?;
    Ok(Json(cars))
}

/// Handler for POST /add_car
///
/// Any `id` in the body is ignored; the store assigns one.
pub async fn add_car(
    State(state): State<Arc<SharedState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Car>), ApiError> {
    log::debug!("POST /add_car");
    let car: Car = decode_body(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let created = with_store(state, move |store| store.create(car)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /cars/{id}
pub async fn get_car(
    State(state): State<Arc<SharedState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Car>, ApiError> {
    log::debug!("GET /cars/{}", raw_id);
    let id = parse_id(&raw_id)?;

    let car = with_store(state, move |store| {
        store.get(id).cloned().ok_or(StoreError::NotFound(id))
    })
    .await?;
    Ok(Json(car))
}

/// Handler for PUT /cars/{id}
///
/// Full replace. The stored id never changes, whatever the body says.
pub async fn update_car(
    State(state): State<Arc<SharedState>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Car>, ApiError> {
    log::debug!("PUT /cars/{}", raw_id);
    let id = parse_id(&raw_id)?;
    let car: Car = decode_body(&body).map_err(|_| ApiError::InvalidBody(INVALID_BODY.into()))?;

    let updated = with_store(state, move |store| store.replace(id, car)).await?;
    Ok(Json(updated))
}

/// Handler for PATCH /cars/{id}
///
/// Only fields present with the expected JSON type are applied.
pub async fn patch_car(
    State(state): State<Arc<SharedState>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Car>, ApiError> {
    log::debug!("PATCH /cars/{}", raw_id);
    let id = parse_id(&raw_id)?;
    let patch: CarPatch =
        decode_body(&body).map_err(|_| ApiError::InvalidBody(INVALID_BODY.into()))?;

    let updated = with_store(state, move |store| store.patch(id, &patch)).await?;
    Ok(Json(updated))
}

/// Handler for DELETE /cars/{id}
pub async fn delete_car(
    State(state): State<Arc<SharedState>>,
    Path(raw_id): Path<String>,
) -> Result<&'static str, ApiError> {
    log::debug!("DELETE /cars/{}", raw_id);
    let id = parse_id(&raw_id)?;

    with_store(state, move |store| store.delete(id)).await?;
    Ok(DELETED_MESSAGE)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn make_state() -> (TempDir, Arc<SharedState>) {
        let dir = tempdir().unwrap();
        let store = CarStore::open(dir.path().join("data.json")).unwrap();
        (dir, Arc::new(SharedState::new(store)))
    }

    fn corolla_body() -> Bytes {
        Bytes::from_static(br#"{"brand":"Toyota","model":"Corolla","mileage":0,"owners_count":1}"#)
    }

    #[test]
    fn parse_id_accepts_signed_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("+7").unwrap(), 7);
        assert_eq!(parse_id("-3").unwrap(), -3);
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id("1.5"), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id(""), Err(ApiError::InvalidId)));
        assert!(matches!(
            parse_id("99999999999999999999"),
            Err(ApiError::InvalidId)
        ));
    }

    #[test]
    fn decode_body_reads_first_value_only() {
        let car: Car = decode_body(br#"{"brand":"Kia"} trailing"#).unwrap();
        assert_eq!(car.brand, "Kia");
    }

    #[test]
    fn decode_body_null_is_default() {
        let car: Car = decode_body(b"null").unwrap();
        assert_eq!(car, Car::default());

        let patch: CarPatch = decode_body(b" null ").unwrap();
        assert_eq!(patch, CarPatch::default());
    }

    #[test]
    fn decode_body_rejects_empty_and_scalars() {
        assert!(decode_body::<Car>(b"").is_err());
        assert!(decode_body::<Car>(b"   ").is_err());
        assert!(decode_body::<CarPatch>(b"42").is_err());
        assert!(decode_body::<CarPatch>(b"\"text\"").is_err());
    }

    #[test]
    fn help_text_lists_routes() {
        assert!(HELP_TEXT.starts_with("REST API is working!"));
        assert!(HELP_TEXT.contains("/add_car"));
        assert!(HELP_TEXT.contains("DELETE /cars/{id}"));
    }

    #[tokio::test]
    async fn add_car_assigns_id() {
        let (_dir, state) = make_state();

        let (status, Json(car)) = add_car(State(state.clone()), corolla_body()).await.unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(car.id, 1);
        assert_eq!(state.store().cars().len(), 1);
    }

    #[tokio::test]
    async fn add_car_reports_decode_error() {
        let (_dir, state) = make_state();

        let err = add_car(State(state), Bytes::from_static(b"{\"mileage\": \"x\"}"))
            .await
            .unwrap_err();

        match err {
            ApiError::InvalidBody(message) => assert!(message.contains("invalid type")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_car_rejects_bad_body_before_lookup() {
        let (_dir, state) = make_state();

        let err = update_car(
            State(state),
            Path("9999".to_string()),
            Bytes::from_static(b"nope"),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Invalid request body");
    }

    #[tokio::test]
    async fn patch_car_missing_is_not_found() {
        let (_dir, state) = make_state();

        let err = patch_car(
            State(state),
            Path("9999".to_string()),
            Bytes::from_static(b"{\"mileage\": 5}"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn delete_car_confirms() {
        let (_dir, state) = make_state();
        add_car(State(state.clone()), corolla_body()).await.unwrap();

        let message = delete_car(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();

        assert_eq!(message, DELETED_MESSAGE);
        assert!(state.store().cars().is_empty());
    }
}
