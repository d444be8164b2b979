//! Database module for song and artist persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - Filtered, paginated song listing
//! - Song CRUD operations
//! - Artist lookup-or-create and renaming
//!
//! # Example
//!
//! ```ignore
//! use song_catalog::db::{init_db, list_songs};
//!
//! let pool = init_db("sqlite:songs.db", 5).await?;
//! let songs = list_songs(&pool, &SongFilter::default(), SONG_LIST_DEFAULTS).await?;
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::QueryBuilder;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};

use crate::model::{Artist, NewSong, Song, SongFilter, SongUpdate};
use crate::pagination::Page;

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool and runs all pending migrations. An in-memory database lives only
/// as long as its connection, so it gets exactly one connection that the
/// pool never retires.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = db_url.contains(":memory:") || db_url.contains("mode=memory");

    if !in_memory && !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!(target: "db", url = db_url, "Creating database");
        Sqlite::create_database(db_url).await?;
    }

    let options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };
    let pool = options.connect(db_url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

// ============================================================================
// Database Row Types
// ============================================================================

const SONG_SELECT: &str = r#"
    SELECT
        s.id, s.artist_id, s.song, s.release_date, s.text, s.link,
        s.created_at, s.updated_at,
        a.name AS artist_name,
        a.created_at AS artist_created_at,
        a.updated_at AS artist_updated_at
    FROM songs s
    JOIN artists a ON a.id = s.artist_id
"#;

/// Song joined with its artist columns.
#[derive(Debug, sqlx::FromRow)]
struct SongRow {
    id: i64,
    artist_id: i64,
    song: String,
    release_date: NaiveDate,
    text: String,
    link: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    artist_name: String,
    artist_created_at: DateTime<Utc>,
    artist_updated_at: DateTime<Utc>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Song {
            id: row.id,
            artist_id: row.artist_id,
            artist: Artist {
                id: row.artist_id,
                name: row.artist_name,
                created_at: row.artist_created_at,
                updated_at: row.artist_updated_at,
            },
            song: row.song,
            release_date: row.release_date,
            text: row.text,
            link: row.link,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Case-folded form of a name or title, used for lookups and search.
///
/// Folds the full Unicode range, unlike SQLite's `NOCASE` and `LIKE`.
pub fn search_key(value: &str) -> String {
    value.to_lowercase()
}

/// Turn user input into a `LIKE` substring pattern, escaping wildcards.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ============================================================================
// Songs
// ============================================================================

/// List songs matching `filter`, one page at a time.
///
/// Artist and title filters are case-insensitive, matched against the
/// stored search keys. Lyrics and link filters are plain substrings.
/// Results are ordered by ID so consecutive pages never overlap. No match
/// yields an empty list.
pub async fn list_songs(
    pool: &SqlitePool,
    filter: &SongFilter,
    page: Page,
) -> sqlx::Result<Vec<Song>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SONG_SELECT);
    qb.push(" WHERE 1 = 1");

    let key_filters = [
        ("a.name_key", non_empty(&filter.group)),
        ("s.song_key", non_empty(&filter.song)),
    ];
    for (column, needle) in key_filters {
        if let Some(needle) = needle {
            qb.push(" AND instr(")
                .push(column)
                .push(", ")
                .push_bind(search_key(needle))
                .push(") > 0");
        }
    }

    let substring_filters = [
        ("s.text", non_empty(&filter.text)),
        ("s.link", non_empty(&filter.link)),
    ];
    for (column, needle) in substring_filters {
        if let Some(needle) = needle {
            qb.push(" AND ")
                .push(column)
                .push(" LIKE ")
                .push_bind(like_pattern(needle))
                .push(" ESCAPE '\\'");
        }
    }

    if let Some(date) = filter.release_date {
        qb.push(" AND s.release_date = ").push_bind(date);
    }

    qb.push(" ORDER BY s.id ASC LIMIT ")
        .push_bind(page.limit() as i64)
        .push(" OFFSET ")
        .push_bind(page.offset() as i64);

    let rows = qb.build_query_as::<SongRow>().fetch_all(pool).await?;
    Ok(rows.into_iter().map(Song::from).collect())
}

/// Get a song by its database ID, with its artist.
pub async fn get_song(pool: &SqlitePool, song_id: i64) -> sqlx::Result<Option<Song>> {
    let row = sqlx::query_as::<_, SongRow>(&format!("{SONG_SELECT} WHERE s.id = ?"))
        .bind(song_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Song::from))
}

/// Insert a new song and return it with its artist.
///
/// Fails with a foreign key violation if the artist does not exist, or a
/// check violation if the title is empty.
pub async fn create_song(pool: &SqlitePool, new_song: &NewSong) -> sqlx::Result<Song> {
    let now = Utc::now();
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO songs (artist_id, song, song_key, release_date, text, link, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(new_song.artist_id)
    .bind(&new_song.song)
    .bind(search_key(&new_song.song))
    .bind(new_song.release_date)
    .bind(&new_song.text)
    .bind(&new_song.link)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    get_song(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Apply the scalar fields of `update` to a song.
///
/// Only fields present in the update change; `updated_at` is always bumped.
/// The `group` field is not handled here, see [`rename_artist`].
/// Returns `None` if the song does not exist.
pub async fn update_song_fields(
    pool: &SqlitePool,
    song_id: i64,
    update: &SongUpdate,
) -> sqlx::Result<Option<Song>> {
    let result = sqlx::query(
        r#"
        UPDATE songs SET
            song = COALESCE(?, song),
            song_key = COALESCE(?, song_key),
            release_date = COALESCE(?, release_date),
            text = COALESCE(?, text),
            link = COALESCE(?, link),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(update.song.as_deref())
    .bind(update.song.as_deref().map(search_key))
    .bind(update.release_date)
    .bind(update.text.as_deref())
    .bind(update.link.as_deref())
    .bind(Utc::now())
    .bind(song_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_song(pool, song_id).await
}

/// Delete a song. Returns `false` if no song had that ID.
pub async fn delete_song(pool: &SqlitePool, song_id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(song_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Artists
// ============================================================================

/// Get or create an artist by name.
///
/// The lookup is case-insensitive over `name_key`. The insert uses
/// `ON CONFLICT DO NOTHING`, so two concurrent calls with the same name
/// resolve to the same row instead of one failing on the unique constraint.
/// The first spelling seen is the one kept.
pub async fn find_or_create_artist(pool: &SqlitePool, name: &str) -> sqlx::Result<Artist> {
    let now = Utc::now();
    let key = search_key(name);
    let inserted = sqlx::query(
        r#"
        INSERT INTO artists (name, name_key, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(name_key) DO NOTHING
        "#,
    )
    .bind(name)
    .bind(&key)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let artist = sqlx::query_as::<_, Artist>(
        "SELECT id, name, created_at, updated_at FROM artists WHERE name_key = ?",
    )
    .bind(&key)
    .fetch_one(pool)
    .await?;

    if inserted.rows_affected() > 0 {
        tracing::info!(target: "db", artist_id = artist.id, name = %artist.name, "Created artist");
    } else {
        tracing::debug!(target: "db", artist_id = artist.id, name = %artist.name, "Found existing artist");
    }
    Ok(artist)
}

/// Get an artist by its database ID.
#[cfg(test)]
pub async fn get_artist(pool: &SqlitePool, artist_id: i64) -> sqlx::Result<Option<Artist>> {
    sqlx::query_as::<_, Artist>("SELECT id, name, created_at, updated_at FROM artists WHERE id = ?")
        .bind(artist_id)
        .fetch_optional(pool)
        .await
}

/// Rename an artist in place. Every song by this artist sees the new name.
///
/// Returns `None` if the artist does not exist. Renaming to a name another
/// artist already holds fails on the unique constraint.
pub async fn rename_artist(
    pool: &SqlitePool,
    artist_id: i64,
    name: &str,
) -> sqlx::Result<Option<Artist>> {
    sqlx::query_as::<_, Artist>(
        r#"
        UPDATE artists SET name = ?, name_key = ?, updated_at = ?
        WHERE id = ?
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(search_key(name))
    .bind(Utc::now())
    .bind(artist_id)
    .fetch_optional(pool)
    .await
}

/// Count artist rows.
pub async fn count_artists(pool: &SqlitePool) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
