mod adapters;
mod config;
mod domain;
mod error;
mod generation;
mod ports;
mod server;

use adapters::services::llm::GlmService;
use adapters::storage::SqliteStorage;
use config::AppConfig;
use error::Result;
use generation::{GenerationClient, ProviderMode, RetryPolicy};
use server::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env()?;

    let storage = SqliteStorage::new(config.db_path.clone())?;
    storage.run_migrations()?;

    let mode = ProviderMode::from_credential(&config.api_key, &config.model);
    let transport = Arc::new(GlmService::new(config.api_key.clone())?);
    let client = Arc::new(GenerationClient::new(
        transport,
        mode,
        RetryPolicy::default(),
    ));

    let state = AppState {
        storage: Arc::new(storage),
        client,
    };

    server::serve(state, config.bind_addr).await
}
