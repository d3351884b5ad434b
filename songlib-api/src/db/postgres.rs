//! PostgreSQL song store

use async_trait::async_trait;
use songlib_common::db::{NewSong, Song, SongFilter, SongUpdate};
use songlib_common::{Error, Result};
use sqlx::PgPool;
use tracing::debug;

use super::SongStore;

const SONG_COLUMNS: &str = "id, group_name, song_title, release_date, text, link";

/// Song store backed by a shared connection pool
#[derive(Clone)]
pub struct PgSongStore {
    pool: PgPool,
}

impl PgSongStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate a unique violation on (group_name, song_title) into a conflict
fn map_write_error(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::Conflict("song with this group and title already exists".to_string())
        }
        other => Error::Database(other),
    }
}

#[async_trait]
impl SongStore for PgSongStore {
    async fn list_songs(&self, filter: &SongFilter, limit: Option<i64>, offset: i64) -> Result<Vec<Song>> {
        let sql = format!(
            "SELECT {SONG_COLUMNS} FROM songs \
             WHERE ($1::TEXT IS NULL OR group_name = $1) \
               AND ($2::TEXT IS NULL OR song_title = $2) \
             ORDER BY id \
             LIMIT $3 OFFSET $4"
        );

        // A NULL limit is LIMIT ALL
        let songs = sqlx::query_as::<_, Song>(&sql)
            .bind(filter.group.as_deref())
            .bind(filter.song.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = songs.len(), ?limit, offset, "Listed songs");
        Ok(songs)
    }

    async fn song_exists(&self, group: &str, title: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM songs WHERE group_name = $1 AND song_title = $2)",
        )
        .bind(group)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn get_song(&self, id: i64) -> Result<Song> {
        let sql = format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = $1");

        sqlx::query_as::<_, Song>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("song {}", id)))
    }

    async fn insert_song(&self, song: &NewSong) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO songs (group_name, song_title, release_date, text, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&song.group_name)
        .bind(&song.song_title)
        .bind(song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(id)
    }

    async fn update_song(&self, id: i64, update: &SongUpdate) -> Result<()> {
        // COALESCE keeps the stored value for every field bound as NULL
        let result = sqlx::query(
            r#"
            UPDATE songs SET
                group_name = COALESCE($2, group_name),
                song_title = COALESCE($3, song_title),
                release_date = COALESCE($4, release_date),
                text = COALESCE($5, text),
                link = COALESCE($6, link)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.group_name.as_deref())
        .bind(update.song_title.as_deref())
        .bind(update.release_date)
        .bind(update.text.as_deref())
        .bind(update.link.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("song {}", id)));
        }
        Ok(())
    }

    async fn delete_song(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("song {}", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
