//! Database initialization
//!
//! Opens the Postgres connection pool and creates the `songs` table if it is
//! missing. Schema statements are idempotent and safe to run on every start.

use crate::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

/// Open a pool and ensure the schema exists
pub async fn init_database(options: PgConnectOptions, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!(max_connections, "Opened database connection pool");

    create_songs_table(&pool).await?;

    Ok(pool)
}

/// Create the songs table and its (group, title) unique index
///
/// The index is created separately so that a table created by an older
/// deployment without the constraint picks it up on next start.
pub async fn create_songs_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id BIGSERIAL PRIMARY KEY,
            group_name TEXT NOT NULL,
            song_title TEXT NOT NULL,
            release_date DATE NOT NULL,
            text TEXT NOT NULL DEFAULT '',
            link TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS songs_group_title_idx ON songs (group_name, song_title)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
