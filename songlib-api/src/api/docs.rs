//! OpenAPI document and Swagger UI
//!
//! The document is derived from the `#[utoipa::path]` annotations on the
//! handlers and served at `/api-docs/openapi.json`; the UI lives under
//! `/swagger-ui`.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, songs};
use crate::error::ErrorResponse;
use songlib_common::db::{Song, SongUpdate};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Song Library API",
        description = "Song library with lyrics enrichment from an external details API"
    ),
    paths(
        songs::list_songs,
        songs::get_song_verses,
        songs::create_song,
        songs::update_song,
        songs::delete_song,
        health::health_check,
    ),
    components(schemas(
        Song,
        SongUpdate,
        songs::CreateSongRequest,
        songs::SongCreated,
        songs::MessageResponse,
        songs::VersesResponse,
        health::HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Songs", description = "Song library"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Swagger UI serving the generated document
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
