//! Registrar web view.
//!
//! Serves the instructor summary from a SQLite database written by
//! `registrar export`, as an HTML page and as JSON.

pub mod config;
pub mod error;
pub mod html;
pub mod json;
pub mod routes;

pub use config::{Args, GatewayConfig};
pub use error::AppError;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use registrar_core::Store;
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Run a read-only query on a blocking thread.
    ///
    /// Each call opens its own connection, which is closed when `f` returns.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Store) -> registrar_core::Result<T> + Send + 'static,
    {
        let path: PathBuf = self.config.db_path.clone();
        let result = tokio::task::spawn_blocking(move || {
            let store = Store::open_read_only(&path)?;
            f(&store)
        })
        .await?;
        Ok(result?)
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::instructors::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
