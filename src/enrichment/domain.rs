//! Internal domain types for song enrichment.
//!
//! The successful result is [`SongDetail`](crate::model::SongDetail), shared
//! with the rest of the catalog. This module holds the failure side.

/// Errors that can occur during enrichment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrichmentError {
    /// Base URL missing or unusable
    #[error("Enrichment not configured: {0}")]
    Config(String),

    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("Music info API returned HTTP {status}")]
    Upstream { status: u16 },

    /// The response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EnrichmentError::Upstream { status: 503 }.to_string(),
            "Music info API returned HTTP 503"
        );
        assert!(EnrichmentError::Network("connection refused".into())
            .to_string()
            .contains("connection refused"));
    }
}
