//! HTTP surface of the catalog.
//!
//! | Method | Path               | Handler            |
//! |--------|--------------------|--------------------|
//! | GET    | `/songs`           | [`handlers::list_songs`] |
//! | POST   | `/songs`           | [`handlers::create_song`] |
//! | GET    | `/songs/{id}`      | [`handlers::get_song`] |
//! | PATCH  | `/songs/{id}`      | [`handlers::update_song`] |
//! | DELETE | `/songs/{id}`      | [`handlers::delete_song`] |
//! | GET    | `/songs/{id}/text` | [`handlers::get_song_text`] |
//! | GET    | `/health`          | [`handlers::health`] |

pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::get;

use crate::library::SongService;

pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub songs: SongService,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/songs",
            get(handlers::list_songs).post(handlers::create_song),
        )
        .route(
            "/songs/{id}",
            get(handlers::get_song)
                .patch(handlers::update_song)
                .delete(handlers::delete_song),
        )
        .route("/songs/{id}/text", get(handlers::get_song_text))
        .fallback(handlers::route_not_found)
        .with_state(state)
}
