//! Song endpoints
//!
//! - `GET    /api/v1/songs`            filtered, paginated list
//! - `GET    /api/v1/songs/:id/verses` paginated verses of one song
//! - `POST   /api/v1/songs`            create via details lookup
//! - `PUT    /api/v1/songs/:id`        partial update
//! - `DELETE /api/v1/songs/:id`        delete

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use songlib_common::db::{Song, SongUpdate};
use tracing::warn;
use utoipa::ToSchema;

use crate::api::params::{parse_song_id, query_pairs, ListSongsQuery, QueryPairs, VersesQuery};
use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::AppState;

/// Body of `POST /api/v1/songs`
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSongRequest {
    /// Group (artist) name
    pub group: String,
    /// Song title
    pub song: String,
}

/// Response of `POST /api/v1/songs`
#[derive(Debug, Serialize, ToSchema)]
pub struct SongCreated {
    pub message: String,
    pub id: i64,
}

/// Confirmation of an update or delete
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self { message: message.to_string() })
    }
}

/// Response of `GET /api/v1/songs/:id/verses`
#[derive(Debug, Serialize, ToSchema)]
pub struct VersesResponse {
    pub verses: Vec<String>,
}

fn invalid_json(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "Invalid request body");
    ApiError::InvalidInput("Invalid input".to_string())
}

/// List songs, optionally filtered by exact group and title
#[utoipa::path(
    get,
    path = "/api/v1/songs",
    tag = "Songs",
    params(
        ("group" = Option<String>, Query, description = "Exact group name"),
        ("song" = Option<String>, Query, description = "Exact song title"),
        ("limit" = Option<i64>, Query, description = "Songs per page (default 10, negative for all)"),
        ("offset" = Option<i64>, Query, description = "Songs to skip (default 0)"),
    ),
    responses(
        (status = 200, description = "Matching songs ordered by id", body = [Song]),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<Vec<Song>>> {
    let query = ListSongsQuery::from_pairs(&query_pairs(query));
    let songs = state
        .service
        .list_songs(&query.filter(), query.limit(), query.offset())
        .await?;

    Ok(Json(songs))
}

/// Page through the verses of a song's lyrics
#[utoipa::path(
    get,
    path = "/api/v1/songs/{id}/verses",
    tag = "Songs",
    params(
        ("id" = i64, Path, description = "Song id"),
        ("limit" = Option<i64>, Query, description = "Verses per page (default 1)"),
        ("offset" = Option<i64>, Query, description = "Verses to skip (default 0)"),
    ),
    responses(
        (status = 200, description = "Requested verses", body = VersesResponse),
        (status = 404, description = "Song not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_song_verses(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<VersesResponse>> {
    let id = parse_song_id(&id)?;
    let query = VersesQuery::from_pairs(&query_pairs(query));
    let verses = state.service.verses(id, query.limit(), query.offset()).await?;

    Ok(Json(VersesResponse { verses }))
}

/// Create a song; release date, lyrics and link come from the details API
#[utoipa::path(
    post,
    path = "/api/v1/songs",
    tag = "Songs",
    request_body = CreateSongRequest,
    responses(
        (status = 201, description = "Song created", body = SongCreated),
        (status = 400, description = "Malformed body or blank group/song", body = ErrorResponse),
        (status = 409, description = "Song already exists", body = ErrorResponse),
        (status = 502, description = "Details API failed", body = ErrorResponse),
        (status = 500, description = "Storage failure or bad release date", body = ErrorResponse),
    )
)]
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<CreateSongRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SongCreated>)> {
    let Json(request) = payload.map_err(invalid_json)?;
    let song = state.service.create_song(&request.group, &request.song).await?;

    Ok((
        StatusCode::CREATED,
        Json(SongCreated {
            message: "Song created successfully".to_string(),
            id: song.id,
        }),
    ))
}

/// Update the supplied fields of a song
///
/// A missing song is reported before the body is looked at.
#[utoipa::path(
    put,
    path = "/api/v1/songs/{id}",
    tag = "Songs",
    params(("id" = i64, Path, description = "Song id")),
    request_body = SongUpdate,
    responses(
        (status = 200, description = "Song updated", body = MessageResponse),
        (status = 400, description = "Malformed body or blank group/title", body = ErrorResponse),
        (status = 404, description = "Song not found", body = ErrorResponse),
        (status = 409, description = "Another song has this group and title", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SongUpdate>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_song_id(&id)?;
    state.service.ensure_song_exists(id).await?;

    let Json(update) = payload.map_err(invalid_json)?;
    state.service.update_song(id, &update).await?;

    Ok(MessageResponse::new("Song updated successfully"))
}

/// Delete a song
#[utoipa::path(
    delete,
    path = "/api/v1/songs/{id}",
    tag = "Songs",
    params(("id" = i64, Path, description = "Song id")),
    responses(
        (status = 200, description = "Song deleted", body = MessageResponse),
        (status = 404, description = "Song not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_song_id(&id)?;
    state.service.delete_song(id).await?;

    Ok(MessageResponse::new("Song deleted successfully"))
}
