//! songlib-api library - song library REST service
//!
//! Stores songs with lyrics in PostgreSQL and enriches new songs with
//! release date, lyrics and link from an external details API.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod api;
pub mod db;
pub mod error;
pub mod services;

use db::SongStore;
use services::{LyricsLookup, SongService};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SongService>,
}

impl AppState {
    /// Create application state from a store and a details lookup
    pub fn new(store: Arc<dyn SongStore>, lookup: Arc<dyn LyricsLookup>) -> Self {
        Self {
            service: Arc::new(SongService::new(store, lookup)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, put};

    let songs = Router::new()
        .route("/api/v1/songs", get(api::list_songs).post(api::create_song))
        .route("/api/v1/songs/:id", put(api::update_song).delete(api::delete_song))
        .route("/api/v1/songs/:id/verses", get(api::get_song_verses));

    Router::new()
        .merge(songs)
        .merge(api::health_routes())
        .merge(api::swagger_ui())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
