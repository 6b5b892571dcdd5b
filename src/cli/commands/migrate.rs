use tracing::info;

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::open(&config.database).await?;
    store.migrate().await?;

    info!("Migrations applied");
    println!("✓ Database is up to date");
    Ok(())
}
