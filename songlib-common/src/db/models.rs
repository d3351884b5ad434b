//! Database models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Song {
    pub id: i64,
    pub group_name: String,
    pub song_title: String,
    pub release_date: NaiveDate,
    /// Full lyrics, verses separated by a blank line
    pub text: String,
    pub link: String,
}

/// Song fields before the database has assigned an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group_name: String,
    pub song_title: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

impl NewSong {
    /// Attach a storage-assigned id
    pub fn with_id(self, id: i64) -> Song {
        Song {
            id,
            group_name: self.group_name,
            song_title: self.song_title,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
        }
    }
}

/// Partial update of a song
///
/// `None` means "not supplied" and leaves the stored value untouched; a
/// supplied empty string is a real value and is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct SongUpdate {
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub song_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl SongUpdate {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.group_name.is_none()
            && self.song_title.is_none()
            && self.release_date.is_none()
            && self.text.is_none()
            && self.link.is_none()
    }

    /// Apply supplied fields to an in-memory song
    pub fn apply_to(&self, song: &mut Song) {
        if let Some(group_name) = &self.group_name {
            song.group_name = group_name.clone();
        }
        if let Some(song_title) = &self.song_title {
            song.song_title = song_title.clone();
        }
        if let Some(release_date) = self.release_date {
            song.release_date = release_date;
        }
        if let Some(text) = &self.text {
            song.text = text.clone();
        }
        if let Some(link) = &self.link {
            song.link = link.clone();
        }
    }
}

/// Exact-match filter for song listing; `None` imposes no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
}

impl SongFilter {
    pub fn matches(&self, song: &Song) -> bool {
        self.group.as_deref().map_or(true, |g| g == song.group_name)
            && self.song.as_deref().map_or(true, |s| s == song.song_title)
    }
}
