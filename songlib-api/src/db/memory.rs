//! In-memory song store

use std::collections::BTreeMap;

use async_trait::async_trait;
use songlib_common::db::{NewSong, Song, SongFilter, SongUpdate};
use songlib_common::{Error, Result};
use tokio::sync::RwLock;

use super::SongStore;

#[derive(Default)]
struct Inner {
    next_id: i64,
    songs: BTreeMap<i64, Song>,
}

impl Inner {
    fn duplicate_of(&self, group: &str, title: &str, except: Option<i64>) -> bool {
        self.songs
            .values()
            .any(|s| Some(s.id) != except && s.group_name == group && s.song_title == title)
    }
}

/// Song store held in process memory
///
/// Same contract as the database store, including id ordering and the
/// (group, title) uniqueness check.
#[derive(Default)]
pub struct MemorySongStore {
    inner: RwLock<Inner>,
}

impl MemorySongStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored songs
    pub async fn len(&self) -> usize {
        self.inner.read().await.songs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("song {}", id))
}

fn conflict() -> Error {
    Error::Conflict("song with this group and title already exists".to_string())
}

#[async_trait]
impl SongStore for MemorySongStore {
    async fn list_songs(&self, filter: &SongFilter, limit: Option<i64>, offset: i64) -> Result<Vec<Song>> {
        let inner = self.inner.read().await;
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = limit.map_or(usize::MAX, |n| usize::try_from(n.max(0)).unwrap_or(usize::MAX));

        Ok(inner
            .songs
            .values()
            .filter(|s| filter.matches(s))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn song_exists(&self, group: &str, title: &str) -> Result<bool> {
        Ok(self.inner.read().await.duplicate_of(group, title, None))
    }

    async fn get_song(&self, id: i64) -> Result<Song> {
        self.inner
            .read()
            .await
            .songs
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn insert_song(&self, song: &NewSong) -> Result<i64> {
        let mut inner = self.inner.write().await;
        if inner.duplicate_of(&song.group_name, &song.song_title, None) {
            return Err(conflict());
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.songs.insert(id, song.clone().with_id(id));
        Ok(id)
    }

    async fn update_song(&self, id: i64, update: &SongUpdate) -> Result<()> {
        let mut inner = self.inner.write().await;
        let mut updated = inner.songs.get(&id).cloned().ok_or_else(|| not_found(id))?;
        update.apply_to(&mut updated);

        if inner.duplicate_of(&updated.group_name, &updated.song_title, Some(id)) {
            return Err(conflict());
        }
        inner.songs.insert(id, updated);
        Ok(())
    }

    async fn delete_song(&self, id: i64) -> Result<()> {
        self.inner
            .write()
            .await
            .songs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
