//! Test utilities and fixtures for song-catalog tests.
//!
//! This module provides common test helpers, mock factories, and
//! database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use song_catalog::test_utils::{temp_db, insert_mock_song};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let id = insert_mock_song(&pool, "Muse", "Uprising").await;
//!     // ... test logic
//! }
//! ```

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::model::{NewSong, SongDetail};

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::db::init_db(&db_url, 5)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Enrichment detail with sensible defaults.
pub fn mock_song_detail() -> SongDetail {
    SongDetail {
        release_date: NaiveDate::from_ymd_opt(2006, 7, 16).expect("valid date"),
        text: "Ooh baby, don't you know I suffer?\nOoh baby, can you hear me moan?\n\n\
               You caught me under false pretenses\nHow long before you let me go?"
            .to_string(),
        link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_string(),
    }
}

/// A [`NewSong`] for the given artist, filled from [`mock_song_detail`].
pub fn mock_new_song(artist_id: i64, title: &str) -> NewSong {
    NewSong::from_detail(artist_id, title, mock_song_detail())
}

/// Inserts a mock song into the database and returns its ID.
///
/// Creates the artist record as needed.
pub async fn insert_mock_song(pool: &SqlitePool, artist: &str, title: &str) -> i64 {
    let artist = crate::db::find_or_create_artist(pool, artist)
        .await
        .expect("Failed to create artist");

    crate::db::create_song(pool, &mock_new_song(artist.id, title))
        .await
        .expect("Failed to insert song")
        .id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SongFilter;
    use crate::pagination::SONG_LIST_DEFAULTS;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        let songs = crate::db::list_songs(&pool, &SongFilter::default(), SONG_LIST_DEFAULTS)
            .await
            .unwrap();
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_insert_mock_song() {
        let (pool, _dir) = temp_db().await;

        let id = insert_mock_song(&pool, "Muse", "Uprising").await;
        assert!(id > 0);

        let song = crate::db::get_song(&pool, id).await.unwrap().unwrap();
        assert_eq!(song.song, "Uprising");
        assert_eq!(song.artist.name, "Muse");
    }

    #[test]
    fn test_mock_song_detail_has_two_verses() {
        let detail = mock_song_detail();
        assert_eq!(crate::lyrics::split_verses(&detail.text).len(), 2);
    }
}
