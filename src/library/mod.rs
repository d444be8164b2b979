//! Song catalog service.
//!
//! Orchestrates the database, the enrichment client and the verse splitter
//! for each catalog operation. Both collaborators are injected at
//! construction, so tests can pass a temporary database and a mock client.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db;
use crate::enrichment::SongInfoApi;
use crate::error::{Error, Result, ResultExt};
use crate::lyrics;
use crate::model::{NewSong, NewSongRequest, Song, SongFilter, SongUpdate};
use crate::pagination::Page;

/// Catalog operations shared by the HTTP handlers and the CLI.
#[derive(Clone)]
pub struct SongService {
    pool: SqlitePool,
    song_info: Arc<dyn SongInfoApi>,
}

impl SongService {
    pub fn new(pool: SqlitePool, song_info: Arc<dyn SongInfoApi>) -> Self {
        Self { pool, song_info }
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// One page of songs matching `filter`.
    pub async fn list(&self, filter: &SongFilter, page: Page) -> Result<Vec<Song>> {
        debug!(target: "library", ?filter, page = page.page, page_size = page.page_size, "Listing songs");
        db::list_songs(&self.pool, filter, page)
            .await
            .with_context("listing songs")
    }

    pub async fn get(&self, song_id: i64) -> Result<Song> {
        db::get_song(&self.pool, song_id)
            .await
            .with_context(format!("loading song {song_id}"))?
            .ok_or_else(|| Error::not_found("song", song_id))
    }

    /// One page of a song's verses. A page past the end is empty.
    pub async fn verses(&self, song_id: i64, page: Page) -> Result<Vec<String>> {
        let song = self.get(song_id).await?;
        Ok(lyrics::verse_page(&song.text, page))
    }

    pub async fn delete(&self, song_id: i64) -> Result<()> {
        let deleted = db::delete_song(&self.pool, song_id)
            .await
            .with_context(format!("deleting song {song_id}"))?;
        if !deleted {
            return Err(Error::not_found("song", song_id));
        }
        info!(target: "library", song_id, "Song deleted");
        Ok(())
    }

    /// Apply a partial update.
    ///
    /// A new `group` renames the song's artist row, so every song by that
    /// artist picks up the new name. Remaining fields are applied afterwards.
    pub async fn update(&self, song_id: i64, update: SongUpdate) -> Result<Song> {
        let song = self.get(song_id).await?;
        validate_update(&update)?;

        if update.is_empty() {
            debug!(target: "library", song_id, "Empty update payload");
        }

        if let Some(group) = update.group.as_deref() {
            let group = group.trim();
            let artist = db::rename_artist(&self.pool, song.artist_id, group)
                .await
                .with_context(format!("renaming artist {}", song.artist_id))?
                .ok_or_else(|| Error::not_found("artist", song.artist_id))?;
            info!(target: "library", artist_id = artist.id, name = %artist.name, "Artist renamed");
        }

        let scalar = SongUpdate {
            group: None,
            song: update.song.map(|s| s.trim().to_string()),
            ..update
        };
        let updated = db::update_song_fields(&self.pool, song_id, &scalar)
            .await
            .with_context(format!("updating song {song_id}"))?
            .ok_or_else(|| Error::not_found("song", song_id))?;

        info!(target: "library", song_id, "Song updated");
        Ok(updated)
    }

    /// Create a song, filling release date, lyrics and link from the
    /// music info API.
    ///
    /// Input is validated before any external call. The artist is reused
    /// when one with the same name (ignoring case) already exists.
    pub async fn create(&self, request: NewSongRequest) -> Result<Song> {
        let (group, title) = validate_new_song(&request)?;

        let detail = self
            .song_info
            .fetch_song_detail(group, title)
            .await
            .map_err(|e| {
                warn!(target: "library", group, song = title, error = %e, "Enrichment failed");
                Error::from(e)
            })?;
        debug!(target: "library", release_date = %detail.release_date, link = %detail.link, "Fetched song detail");

        let artist = db::find_or_create_artist(&self.pool, group)
            .await
            .with_context(format!("resolving artist {group:?}"))?;

        let song = db::create_song(&self.pool, &NewSong::from_detail(artist.id, title, detail))
            .await
            .with_context("inserting song")?;

        info!(target: "library", song_id = song.id, artist_id = artist.id, "Song created");
        Ok(song)
    }
}

/// Both `group` and `song` must be present and non-blank.
fn validate_new_song(request: &NewSongRequest) -> Result<(&str, &str)> {
    let group = request.group.as_deref().map(str::trim).unwrap_or_default();
    let song = request.song.as_deref().map(str::trim).unwrap_or_default();
    if group.is_empty() || song.is_empty() {
        return Err(Error::validation("fields group and song are required"));
    }
    Ok((group, song))
}

/// Fields that are present must not be blank.
fn validate_update(update: &SongUpdate) -> Result<()> {
    if update.song.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(Error::validation("song must not be empty"));
    }
    if update.group.as_deref().is_some_and(|g| g.trim().is_empty()) {
        return Err(Error::validation("group must not be empty"));
    }
    Ok(())
}
