//! Adapter layer: Convert music info DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use chrono::{DateTime, NaiveDate};

use super::dto;
use crate::enrichment::domain::EnrichmentError;
use crate::model::SongDetail;

/// Date layouts the API has been seen to emit.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

/// Convert an `/info` response to a [`SongDetail`].
pub fn to_song_detail(response: dto::SongDetailResponse) -> Result<SongDetail, EnrichmentError> {
    Ok(SongDetail {
        release_date: parse_release_date(&response.release_date)?,
        text: response.text,
        link: response.link,
    })
}

fn parse_release_date(raw: &str) -> Result<NaiveDate, EnrichmentError> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .ok_or_else(|| EnrichmentError::Decode(format!("unrecognized release date {raw:?}")))
}
