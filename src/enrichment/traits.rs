//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementation, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use song_catalog::enrichment::traits::SongInfoApi;
//!
//! // In production code:
//! let api: Arc<dyn SongInfoApi> = Arc::new(MusicInfoClient::new(&config)?);
//!
//! // In tests:
//! let api: Arc<dyn SongInfoApi> = Arc::new(MockSongInfo::with_detail(detail));
//! ```

use async_trait::async_trait;

use super::domain::EnrichmentError;
use crate::model::SongDetail;

/// Trait for song detail lookup.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait SongInfoApi: Send + Sync {
    /// Look up release date, lyrics and link for an artist/title pair.
    async fn fetch_song_detail(&self, group: &str, song: &str)
    -> Result<SongDetail, EnrichmentError>;
}

#[async_trait]
impl SongInfoApi for super::musicinfo::MusicInfoClient {
    async fn fetch_song_detail(
        &self,
        group: &str,
        song: &str,
    ) -> Result<SongDetail, EnrichmentError> {
        self.fetch_song_detail(group, song).await
    }
}
