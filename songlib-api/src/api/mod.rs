//! HTTP API handlers for songlib-api

pub mod docs;
pub mod health;
pub mod params;
pub mod songs;

pub use docs::swagger_ui;
pub use health::health_routes;
pub use songs::{create_song, delete_song, get_song_verses, list_songs, update_song};
