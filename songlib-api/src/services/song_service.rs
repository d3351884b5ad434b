//! Song workflows
//!
//! Creation: duplicate check → details lookup → release date parse → insert.
//! Nothing is persisted unless every step succeeds and nothing is retried.
//! Reads: filtered listing and verse pagination over stored lyrics.

use std::sync::Arc;

use chrono::NaiveDate;
use songlib_common::db::{NewSong, Song, SongFilter, SongUpdate};
use songlib_common::verses::paginate_verses;
use songlib_common::Error;
use tracing::{error, info, warn};

use crate::db::SongStore;
use crate::error::{ApiError, ApiResult};
use crate::services::lyrics_client::LyricsLookup;

/// Format of release dates returned by the lookup API
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a `DD.MM.YYYY` release date
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, RELEASE_DATE_FORMAT).ok()
}

/// Song workflows over an injected store and lookup client
pub struct SongService {
    store: Arc<dyn SongStore>,
    lookup: Arc<dyn LyricsLookup>,
}

impl SongService {
    pub fn new(store: Arc<dyn SongStore>, lookup: Arc<dyn LyricsLookup>) -> Self {
        Self { store, lookup }
    }

    /// Filtered listing; a `None` limit lists every matching song
    pub async fn list_songs(&self, filter: &SongFilter, limit: Option<i64>, offset: i64) -> ApiResult<Vec<Song>> {
        self.store.list_songs(filter, limit, offset).await.map_err(|e| {
            error!(?filter, ?limit, offset, error = %e, "Failed to list songs");
            ApiError::Internal("Internal server error".to_string())
        })
    }

    /// Verses `[offset, offset + limit)` of a song's lyrics
    pub async fn verses(&self, id: i64, limit: usize, offset: usize) -> ApiResult<Vec<String>> {
        let song = self.find_song(id).await?;
        Ok(paginate_verses(&song.text, limit, offset))
    }

    /// Create a song from group and title, enriched by the lookup API
    pub async fn create_song(&self, group: &str, title: &str) -> ApiResult<Song> {
        if group.trim().is_empty() || title.trim().is_empty() {
            warn!(group, song = title, "Rejected song with blank group or title");
            return Err(ApiError::InvalidInput("Invalid input".to_string()));
        }

        let exists = self.store.song_exists(group, title).await.map_err(|e| {
            error!(group, song = title, error = %e, "Failed to check song existence");
            ApiError::Internal("Internal server error".to_string())
        })?;
        if exists {
            warn!(group, song = title, "Attempt to create existing song");
            return Err(song_exists());
        }

        let details = self.lookup.fetch_details(group, title).await.map_err(|e| {
            error!(group, song = title, error = %e, "Song details lookup failed");
            ApiError::DependencyFailure("Failed to fetch song details".to_string())
        })?;

        let release_date = parse_release_date(&details.release_date).ok_or_else(|| {
            error!(group, song = title, date = %details.release_date, "Failed to parse release date");
            ApiError::Internal("Failed to parse release date".to_string())
        })?;

        let new_song = NewSong {
            group_name: group.to_string(),
            song_title: title.to_string(),
            release_date,
            text: details.text,
            link: details.link,
        };

        let id = match self.store.insert_song(&new_song).await {
            Ok(id) => id,
            // Another request created the same pair after our existence check
            Err(Error::Conflict(_)) => {
                warn!(group, song = title, "Song created concurrently");
                return Err(song_exists());
            }
            Err(e) => {
                error!(group, song = title, error = %e, "Failed to create song");
                return Err(ApiError::Internal("Failed to create song".to_string()));
            }
        };

        info!(id, group, song = title, "Song created");
        Ok(new_song.with_id(id))
    }

    /// True when the song store answers
    pub async fn storage_available(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Song store unavailable");
                false
            }
        }
    }

    /// Fail with NotFound unless the song exists
    pub async fn ensure_song_exists(&self, id: i64) -> ApiResult<()> {
        self.find_song(id).await.map(|_| ())
    }

    /// Apply the supplied fields to a song
    pub async fn update_song(&self, id: i64, update: &SongUpdate) -> ApiResult<()> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&update.group_name) || blank(&update.song_title) {
            warn!(id, "Rejected update with blank group or title");
            return Err(ApiError::InvalidInput("Invalid input".to_string()));
        }

        match self.store.update_song(id, update).await {
            Ok(()) => {
                info!(id, "Song updated");
                Ok(())
            }
            Err(Error::NotFound(_)) => {
                warn!(id, "Song not found");
                Err(ApiError::song_not_found())
            }
            Err(Error::Conflict(_)) => {
                warn!(id, "Update would duplicate an existing song");
                Err(song_exists())
            }
            Err(e) => {
                error!(id, error = %e, "Failed to update song");
                Err(ApiError::Internal("Failed to update song".to_string()))
            }
        }
    }

    pub async fn delete_song(&self, id: i64) -> ApiResult<()> {
        match self.store.delete_song(id).await {
            Ok(()) => {
                info!(id, "Song deleted");
                Ok(())
            }
            Err(Error::NotFound(_)) => {
                warn!(id, "Song not found");
                Err(ApiError::song_not_found())
            }
            Err(e) => {
                error!(id, error = %e, "Failed to delete song");
                Err(ApiError::Internal("Failed to delete song".to_string()))
            }
        }
    }

    async fn find_song(&self, id: i64) -> ApiResult<Song> {
        match self.store.get_song(id).await {
            Ok(song) => Ok(song),
            Err(Error::NotFound(_)) => {
                warn!(id, "Song not found");
                Err(ApiError::song_not_found())
            }
            Err(e) => {
                error!(id, error = %e, "Failed to load song");
                Err(ApiError::Internal("Internal server error".to_string()))
            }
        }
    }
}

fn song_exists() -> ApiError {
    ApiError::Conflict("Song already exists".to_string())
}
