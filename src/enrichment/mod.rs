//! Song enrichment - fetches song details from an external music info service.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain types** (`domain.rs`) - Our error type; results are [`SongDetail`](crate::model::SongDetail)
//! - **API DTOs** (`musicinfo/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Traits** - Seams for substituting the client in tests
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::MusicInfoClient;
//!
//! let client = MusicInfoClient::new(&config.enrichment)?;
//! let detail = client.fetch_song_detail("Muse", "Supermassive Black Hole").await?;
//! println!("Released {}", detail.release_date);
//! ```

pub mod domain;
pub mod musicinfo;
pub mod traits;

pub use domain::EnrichmentError;
pub use musicinfo::MusicInfoClient;
pub use traits::SongInfoApi;
