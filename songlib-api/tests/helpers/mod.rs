//! Shared test helpers for songlib-api integration tests
//!
//! - A local HTTP server standing in for the song details API
//! - A song store whose every operation fails
//! - Request/response helpers for driving the router with `oneshot`

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::Query,
    http::{header, Request, StatusCode},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use reqwest::Url;
use serde_json::Value;
use songlib_api::db::{MemorySongStore, SongStore};
use songlib_api::services::HttpLyricsClient;
use songlib_api::{build_router, AppState};
use songlib_common::db::{NewSong, Song, SongFilter, SongUpdate};
use songlib_common::{Error, Result};

pub const LYRICS: &str = "Verse one\n\nVerse two\n\nVerse three";

pub const DETAILS_JSON: &str = r#"{
    "releaseDate": "16.07.2006",
    "text": "Verse one\n\nVerse two\n\nVerse three",
    "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
}"#;

/// Running stand-in for the details API
pub struct LookupStub {
    pub url: Url,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl LookupStub {
    /// Query parameters of every request received so far
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `body` with `status` for every GET on `/info`
pub async fn spawn_lookup_stub(status: u16, body: &'static str) -> LookupStub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let status = StatusCode::from_u16(status).unwrap();

    let app = Router::new().route(
        "/info",
        get(move |Query(query): Query<HashMap<String, String>>| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(query);
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    LookupStub {
        url: Url::parse(&format!("http://{}/info", addr)).unwrap(),
        requests,
    }
}

/// URL on which nothing listens
pub async fn unreachable_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/info", addr)).unwrap()
}

pub fn lookup_client(url: Url) -> HttpLyricsClient {
    HttpLyricsClient::new(url, Duration::from_secs(5)).unwrap()
}

/// Router over the given store, looking details up at `lookup_url`
pub fn setup_app(store: Arc<dyn SongStore>, lookup_url: Url) -> Router {
    build_router(AppState::new(store, Arc::new(lookup_client(lookup_url))))
}

pub fn new_song(group: &str, title: &str) -> NewSong {
    NewSong {
        group_name: group.to_string(),
        song_title: title.to_string(),
        release_date: NaiveDate::from_ymd_opt(2006, 7, 16).unwrap(),
        text: LYRICS.to_string(),
        link: "https://example.com".to_string(),
    }
}

/// Memory store pre-filled with the given (group, title) pairs, ids 1..
pub async fn seeded_store(songs: &[(&str, &str)]) -> Arc<MemorySongStore> {
    let store = Arc::new(MemorySongStore::new());
    for (group, title) in songs {
        store.insert_song(&new_song(group, title)).await.unwrap();
    }
    store
}

pub fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Extract JSON body from response
pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Store whose every operation fails like an unreachable database
pub struct FailingStore;

fn unavailable() -> Error {
    Error::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl SongStore for FailingStore {
    async fn list_songs(&self, _: &SongFilter, _: Option<i64>, _: i64) -> Result<Vec<Song>> {
        Err(unavailable())
    }

    async fn song_exists(&self, _: &str, _: &str) -> Result<bool> {
        Err(unavailable())
    }

    async fn get_song(&self, _: i64) -> Result<Song> {
        Err(unavailable())
    }

    async fn insert_song(&self, _: &NewSong) -> Result<i64> {
        Err(unavailable())
    }

    async fn update_song(&self, _: i64, _: &SongUpdate) -> Result<()> {
        Err(unavailable())
    }

    async fn delete_song(&self, _: i64) -> Result<()> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<()> {
        Err(unavailable())
    }
}
