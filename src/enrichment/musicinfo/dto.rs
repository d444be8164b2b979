//! Music info API Data Transfer Objects
//!
//! These types match EXACTLY what the music info API returns.
//! DO NOT use these types outside the musicinfo module - convert to domain types.
//!
//! Example response:
//! ```json
//! {
//!   "releaseDate": "16.07.2006",
//!   "text": "Ooh baby, don't you know I suffer?\nOoh baby, can you hear me moan?...",
//!   "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Response of `GET /info`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetailResponse {
    /// Release date, `DD.MM.YYYY` or `YYYY-MM-DD`
    pub release_date: String,
    /// Lyrics, verses separated by blank lines
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "releaseDate": "16.07.2006",
            "text": "Ooh baby, don't you know I suffer?\nOoh baby, can you hear me moan?\n\nYou caught me under false pretenses",
            "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
        }"#;

        let detail: SongDetailResponse =
            serde_json::from_str(json).expect("Should parse full response");

        assert_eq!(detail.release_date, "16.07.2006");
        assert!(detail.text.contains("\n\n"));
        assert_eq!(detail.link, "https://www.youtube.com/watch?v=Xsp3_a-PMTw");
    }

    #[test]
    fn test_parse_without_optional_fields() {
        let json = r#"{"releaseDate": "2006-07-16"}"#;
        let detail: SongDetailResponse =
            serde_json::from_str(json).expect("Should parse minimal response");
        assert!(detail.text.is_empty());
        assert!(detail.link.is_empty());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"{"releaseDate": "2006-07-16", "text": "", "link": "", "album": "Black Holes"}"#;
        assert!(serde_json::from_str::<SongDetailResponse>(json).is_ok());
    }

    #[test]
    fn test_missing_release_date_is_error() {
        let json = r#"{"text": "la la", "link": "https://example.com"}"#;
        assert!(serde_json::from_str::<SongDetailResponse>(json).is_err());
    }
}
