//! HTTP API for the car registry.
//!
//! Maps the fixed REST surface onto a shared [`CarStore`](carstore_core::CarStore):
//!
//! | Method | Path         | Success                         |
//! |--------|--------------|---------------------------------|
//! | GET    | `/`          | 200, plain-text help            |
//! | GET    | `/cars`      | 200, JSON array of cars         |
//! | POST   | `/add_car`   | 201, created car                |
//! | GET    | `/cars/{id}` | 200, car                        |
//! | PUT    | `/cars/{id}` | 200, replaced car               |
//! | PATCH  | `/cars/{id}` | 200, patched car                |
//! | DELETE | `/cars/{id}` | 200, "Car deleted successfully" |

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;
pub use routes::{DELETED_MESSAGE, HELP_TEXT};
pub use state::SharedState;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Build the router for the full REST surface.
pub fn router(state: Arc<SharedState>) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/cars", get(routes::list_cars))
        .route("/add_car", post(routes::add_car))
        .route(
            "/cars/{id}",
            get(routes::get_car)
                .put(routes::update_car)
                .patch(routes::patch_car)
                .delete(routes::delete_car),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(
    addr: SocketAddr,
    state: Arc<SharedState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        log::error!("Failed to bind HTTP server to {}: {}", addr, e);
        e
    })?;

    log::info!("Server is running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            log::info!("HTTP server shutting down");
        })
        .await
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use carstore_core::CarStore;
    use tempfile::tempdir;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn server_starts_and_stops() {
        let dir = tempdir().unwrap();
        let store = CarStore::open(dir.path().join("data.json")).unwrap();
        let state = Arc::new(SharedState::new(store));

        // Reserve a free port, then release it for the server
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(serve(addr, state, async {
            shutdown_rx.await.ok();
        }));

        // Give the server a moment to start
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        shutdown_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn serve_reports_bind_failure() {
        let dir = tempdir().unwrap();
        let store = CarStore::open(dir.path().join("data.json")).unwrap();
        let state = Arc::new(SharedState::new(store));

        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let result = serve(addr, state, std::future::pending()).await;
        assert!(result.is_err());
    }
}
