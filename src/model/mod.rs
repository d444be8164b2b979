//! Core data models for the song catalog.
//!
//! Defines the persisted entities [`Artist`] and [`Song`], the request
//! payloads accepted by the HTTP layer, and the small response envelopes
//! returned alongside them.
//!
//! # Database Schema
//!
//! The models map to the following tables:
//! - `artists` - Artist records with unique, case-insensitive names
//! - `songs` - Songs, each referencing exactly one artist
//!
//! # JSON Shape
//!
//! Field names are camelCase on the wire. An artist's name is exposed as
//! `group`, which is how the catalog's clients refer to performers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A performing artist or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Artist name (unique, case-insensitive)
    #[serde(rename = "group")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A song with its artist resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Foreign key to the artists table
    pub artist_id: i64,
    /// The referenced artist
    pub artist: Artist,
    /// Song title (never empty)
    pub song: String,
    pub release_date: NaiveDate,
    /// Full lyrics, verses separated by blank lines
    pub text: String,
    /// External link (usually a video URL)
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enrichment payload used to populate a new song.
///
/// Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDetail {
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

/// Values for a song row that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewSong {
    pub artist_id: i64,
    pub song: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

impl NewSong {
    /// Combine a resolved artist, a title and enrichment data.
    pub fn from_detail(artist_id: i64, song: impl Into<String>, detail: SongDetail) -> Self {
        Self {
            artist_id,
            song: song.into(),
            release_date: detail.release_date,
            text: detail.text,
            link: detail.link,
        }
    }
}

/// Body of `POST /songs`.
///
/// Both fields are optional at the type level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSongRequest {
    pub group: Option<String>,
    pub song: Option<String>,
}

/// Body of `PATCH /songs/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongUpdate {
    /// New name for the song's artist (renames the artist row itself)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SongUpdate {
    /// True when the payload carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.group.is_none()
            && self.song.is_none()
            && self.release_date.is_none()
            && self.text.is_none()
            && self.link.is_none()
    }
}

/// Optional, independently combinable song filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    /// Artist name substring, case-insensitive
    pub group: Option<String>,
    /// Song title substring, case-insensitive
    pub song: Option<String>,
    /// Exact release date
    pub release_date: Option<NaiveDate>,
    /// Lyrics substring
    pub text: Option<String>,
    /// Link substring
    pub link: Option<String>,
}

/// One page of verses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersesResponse {
    pub verses: Vec<String>,
}

/// Generic error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Generic confirmation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
