use std::sync::Arc;

use glowbot_core::{config::Config, ports::PostGenerator};
use glowbot_mistral::{MistralClient, MistralConfig};

#[tokio::main]
async fn main() -> Result<(), glowbot_core::Error> {
    glowbot_core::logging::init("glowbot")?;

    let cfg = Arc::new(Config::load()?);

    let generator: Arc<dyn PostGenerator> = Arc::new(MistralClient::new(MistralConfig {
        api_key: cfg.mistral_api_key.clone(),
        model: cfg.model.clone(),
        temperature: cfg.temperature,
        max_tokens: cfg.max_tokens,
        request_timeout: cfg.request_timeout,
    })?);

    glowbot_telegram::router::run_polling(cfg, generator)
        .await
        .map_err(|e| glowbot_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
