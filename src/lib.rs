//! # ohako
//!
//! Single-user karaoke attempt tracker: a web UI over an ordered table
//! of attempts mirrored to a flat CSV file. One logged attempt carries a
//! title, genre, score, memo, and its registration date; the UI renders
//! filtered listings, per-song statistics, and score-over-time charts.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod stats;
pub mod store;
pub mod trend;

pub use error::{Error, Result};

use store::RecordStore;

/// Application state shared across HTTP handlers
///
/// Mutation handlers hold the write lock across read-mutate-persist, so
/// no two mutations interleave and every render observes a consistent
/// table.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<RecordStore>>,
}

impl AppState {
    /// Create new application state around a loaded store
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::serve_index))
        .route("/entries", post(api::create_entry))
        .route("/entries/:pos/update", post(api::update_entry))
        .route("/entries/:pos/delete", post(api::delete_entry))
        .route("/api/entries", get(api::list_entries))
        .route("/api/stats", get(api::get_stats))
        .route("/api/trends", get(api::get_trends))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
