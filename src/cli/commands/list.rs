//! Catalog listing command.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::db;
use crate::model::SongFilter;
use crate::pagination::Page;

/// Print one page of songs, one per line.
pub fn cmd_list(
    rt: &Runtime,
    config: &Config,
    filter: &SongFilter,
    page: Page,
) -> anyhow::Result<()> {
    let db_url = config.database_url()?;

    rt.block_on(async {
        let pool = db::init_db(db_url, 1).await?;
        let songs = db::list_songs(&pool, filter, page).await?;

        if songs.is_empty() {
            println!("No songs found.");
        }
        for song in songs {
            println!(
                "{:>5}  {} - {} ({})",
                song.id, song.artist.name, song.song, song.release_date
            );
        }
        pool.close().await;
        Ok::<(), anyhow::Error>(())
    })
}
