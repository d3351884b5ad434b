//! Song persistence
//!
//! [`SongStore`] is the persistence boundary used by the service layer.
//! [`PgSongStore`] backs it with PostgreSQL; [`MemorySongStore`] keeps the same
//! contract in process memory.

mod memory;
mod postgres;

pub use memory::MemorySongStore;
pub use postgres::PgSongStore;

use async_trait::async_trait;
use songlib_common::db::{NewSong, Song, SongFilter, SongUpdate};
use songlib_common::Result;

/// Songs table operations
///
/// Errors: `Error::NotFound` when the id does not exist, `Error::Conflict` when
/// a write would duplicate a (group, title) pair, `Error::Database` otherwise.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Exact-match filtered listing ordered by id, `limit`/`offset` applied
    /// after filtering; a `None` limit returns every remaining row
    async fn list_songs(&self, filter: &SongFilter, limit: Option<i64>, offset: i64) -> Result<Vec<Song>>;

    /// True when a song with exactly this group and title is stored
    async fn song_exists(&self, group: &str, title: &str) -> Result<bool>;

    async fn get_song(&self, id: i64) -> Result<Song>;

    /// Insert and return the storage-assigned id
    async fn insert_song(&self, song: &NewSong) -> Result<i64>;

    /// Write the supplied fields only
    async fn update_song(&self, id: i64, update: &SongUpdate) -> Result<()>;

    async fn delete_song(&self, id: i64) -> Result<()>;

    /// Check that storage answers
    async fn ping(&self) -> Result<()>;
}
