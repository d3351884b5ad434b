//! Query and path parameter handling
//!
//! Pagination parameters are lenient: an omitted value takes its default and
//! a value that does not parse as an integer counts as 0. When a key is
//! repeated the first value wins. Malformed values never produce a 400.
//!
//! A negative song list limit lists every matching song; negative offsets and
//! negative verse limits count as 0.

use axum::extract::{rejection::QueryRejection, Query};
use songlib_common::db::SongFilter;
use songlib_common::verses::DEFAULT_VERSE_LIMIT;

use crate::error::ApiError;

/// Songs per page when the caller does not say
pub const DEFAULT_SONG_LIMIT: i64 = 10;

/// Raw query pairs in request order
pub type QueryPairs = Vec<(String, String)>;

/// Unwrap extracted query pairs; an undecodable query string reads as empty
pub fn query_pairs(query: Result<Query<QueryPairs>, QueryRejection>) -> QueryPairs {
    match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Ignoring undecodable query string");
            Vec::new()
        }
    }
}

fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

/// Query string of `GET /api/v1/songs`
#[derive(Debug, Default)]
pub struct ListSongsQuery {
    pub group: Option<String>,
    pub song: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListSongsQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            group: first(pairs, "group"),
            song: first(pairs, "song"),
            limit: first(pairs, "limit"),
            offset: first(pairs, "offset"),
        }
    }

    /// Empty filter values impose no constraint
    pub fn filter(&self) -> SongFilter {
        SongFilter {
            group: self.group.clone().filter(|g| !g.is_empty()),
            song: self.song.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Page size; `None` when negative, meaning no limit
    pub fn limit(&self) -> Option<i64> {
        Some(lenient_count(self.limit.as_deref(), DEFAULT_SONG_LIMIT)).filter(|n| *n >= 0)
    }

    pub fn offset(&self) -> i64 {
        lenient_count(self.offset.as_deref(), 0).max(0)
    }
}

/// Query string of `GET /api/v1/songs/:id/verses`
#[derive(Debug, Default)]
pub struct VersesQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl VersesQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            limit: first(pairs, "limit"),
            offset: first(pairs, "offset"),
        }
    }

    pub fn limit(&self) -> usize {
        to_usize(lenient_count(self.limit.as_deref(), DEFAULT_VERSE_LIMIT as i64))
    }

    pub fn offset(&self) -> usize {
        to_usize(lenient_count(self.offset.as_deref(), 0))
    }
}

/// Parse a count: absent → `default`, anything but a plain integer → 0
///
/// No whitespace trimming: `" 7 "` is not an integer.
pub fn lenient_count(raw: Option<&str>, default: i64) -> i64 {
    match raw {
        None => default,
        Some(value) => value.parse::<i64>().unwrap_or(0),
    }
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

/// Parse a song id from the path
///
/// Ids are positive integers assigned by the database, so anything else
/// cannot name a stored song and is reported as not found.
pub fn parse_song_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            tracing::warn!(id = raw, "Song not found");
            ApiError::song_not_found()
        })
}
