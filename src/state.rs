use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::security::TokenIssuer;

/// Process-wide state built once at startup and shared read-only.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tokens: TokenIssuer,
}

impl SharedState {
    /// Validate the config, open the database and apply migrations.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let store = Store::connect(&config.database).await?;
        Self::with_store(config, store)
    }

    /// Assemble state around an already-open store.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let tokens = TokenIssuer::new(
            config.jwt_secret(),
            chrono::Duration::hours(i64::from(config.auth.token_ttl_hours)),
        )?;

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens,
        })
    }
}
