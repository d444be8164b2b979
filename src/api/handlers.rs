//! Route handlers.
//!
//! Handlers parse input, call [`SongService`](crate::library::SongService)
//! and shape the JSON response. Extractor rejections are taken as `Result`
//! so malformed input still produces a JSON error body.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use super::{ApiError, AppState};
use crate::model::{
    MessageResponse, NewSongRequest, Song, SongFilter, SongUpdate, VersesResponse,
};
use crate::pagination::{Page, SONG_LIST_DEFAULTS, VERSE_DEFAULTS};

type ApiResult<T> = Result<T, ApiError>;

/// Query string of `GET /songs`.
///
/// Everything is kept as raw text so unparsable pagination values fall
/// back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub group: Option<String>,
    pub song: Option<String>,
    /// `YYYY-MM-DD`
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Split into a filter and a page. A malformed date is a 400.
    pub fn into_filter(self) -> ApiResult<(SongFilter, Page)> {
        let release_date = match self.release_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ApiError::BadRequest(format!("releaseDate must be YYYY-MM-DD, got {raw:?}"))
            })?),
        };
        let page = Page::from_query(
            self.page.as_deref(),
            self.page_size.as_deref(),
            SONG_LIST_DEFAULTS,
        );
        let filter = SongFilter {
            group: self.group,
            song: self.song,
            release_date,
            text: self.text,
            link: self.link,
        };
        Ok((filter, page))
    }
}

/// Query string of `GET /songs/{id}/text`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /songs
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Song>>> {
    info!(target: "api", "Listing songs");
    let Query(query) = query?;
    let (filter, page) = query.into_filter()?;
    debug!(target: "api", ?filter, offset = page.offset(), limit = page.limit(), "List parameters");

    let songs = state.songs.list(&filter, page).await?;
    info!(target: "api", count = songs.len(), "Songs listed");
    Ok(Json(songs))
}

/// GET /songs/{id}
pub async fn get_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Song>> {
    let Path(id) = id?;
    info!(target: "api", song_id = id, "Fetching song");
    Ok(Json(state.songs.get(id).await?))
}

/// GET /songs/{id}/text
pub async fn get_song_text(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<VerseQuery>, QueryRejection>,
) -> ApiResult<Json<VersesResponse>> {
    let Path(id) = id?;
    let Query(query) = query?;
    let page = Page::from_query(query.page.as_deref(), query.page_size.as_deref(), VERSE_DEFAULTS);
    info!(target: "api", song_id = id, page = page.page, page_size = page.page_size, "Fetching lyrics");

    let verses = state.songs.verses(id, page).await?;
    Ok(Json(VersesResponse { verses }))
}

/// DELETE /songs/{id}
pub async fn delete_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    info!(target: "api", song_id = id, "Deleting song");
    state.songs.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "song deleted".to_string(),
    }))
}

/// PATCH /songs/{id}
///
/// A missing song is reported before a malformed body.
pub async fn update_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SongUpdate>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let Path(id) = id?;
    info!(target: "api", song_id = id, "Updating song");

    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => {
            state.songs.get(id).await?;
            return Err(rejection.into());
        }
    };
    debug!(target: "api", song_id = id, ?update, "Update payload");

    Ok(Json(state.songs.update(id, update).await?))
}

/// POST /songs
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<NewSongRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    info!(target: "api", "Creating song");
    let Json(request) = payload?;
    debug!(target: "api", ?request, "Create payload");

    let song = state.songs.create(request).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// Any unknown route.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}
