//! Headless client runner.
//!
//! Exercises the full stack against a running backend: loads settings,
//! tests the provider connection, and pulls the entity collections.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use taleforge_client::application::dto::TestConnectionRequest;
use taleforge_client::application::services::SettingsService;
use taleforge_client::infrastructure::{FileStorage, HttpApi, MemoryStorage};
use taleforge_client::ports::outbound::StorageProvider;
use taleforge_client::AppController;

const DEFAULT_API_URL: &str = "http://localhost:5000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url =
        std::env::var("TALEFORGE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    tracing::info!(%base_url, "starting taleforge client");

    let storage: Arc<dyn StorageProvider> = match FileStorage::new() {
        Some(storage) => Arc::new(storage),
        None => {
            tracing::warn!("no preferences directory available, settings will not persist");
            Arc::new(MemoryStorage::new())
        }
    };

    let settings = SettingsService::new(storage.clone()).load();

    let base = url::Url::parse(&base_url).context("invalid backend base URL")?;
    let api = HttpApi::new(base).with_api_key(settings.api_key.clone());

    let controller = AppController::new(Arc::new(api), storage);
    controller.startup().await;

    let check = controller
        .system_service()
        .test_connection(&TestConnectionRequest {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            local_model_url: settings
                .use_local_model
                .then(|| settings.local_model_url.clone()),
        })
        .await;
    match check {
        Ok(result) if result.success => tracing::info!(message = %result.message, "provider reachable"),
        Ok(result) => tracing::warn!(message = %result.message, "provider check failed"),
        Err(error) => tracing::warn!(%error, "connection test did not complete"),
    }

    tracing::info!(
        characters = controller.state().characters().len(),
        chats = controller.state().chats().len(),
        scenarios = controller.state().scenarios().len(),
        view = ?controller.views().current(),
        "startup complete"
    );
    Ok(())
}
