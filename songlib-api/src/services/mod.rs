//! Service layer: song workflows and the external details lookup

pub mod lyrics_client;
pub mod song_service;

pub use lyrics_client::{HttpLyricsClient, LookupError, LyricsLookup, SongDetail};
pub use song_service::SongService;
