//! Schema migration command.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::db;

/// Apply pending migrations and report the catalog size.
pub fn cmd_migrate(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    let db_url = config.database_url()?;
    rt.block_on(async {
        let pool = db::init_db(db_url, 1).await?;
        let artists = db::count_artists(&pool).await?;
        println!("Database {db_url} is up to date ({artists} artists).");
        pool.close().await;
        Ok::<(), anyhow::Error>(())
    })
}
