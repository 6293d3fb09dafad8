//! Mistral adapter (post generation).
//!
//! One bounded POST to the chat-completions endpoint per draft request.
//! No retries: a failed generation surfaces as `Error::Generation` and the
//! admin re-issues the command.

use async_trait::async_trait;

use glowbot_core::{errors::Error, ports::PostGenerator, Result};

const CHAT_COMPLETIONS_URL: &str = "https://api.mistral.ai/v1/chat/completions";

#[derive(Clone, Debug)]
pub struct MistralConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout: std::time::Duration,
}

#[derive(Clone, Debug)]
pub struct MistralClient {
    cfg: MistralConfig,
    http: reqwest::Client,
}

impl MistralClient {
    pub fn new(cfg: MistralConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| Error::Generation(format!("http client build: {e}")))?;
        Ok(Self { cfg, http })
    }

    pub async fn generate_post(&self, prompt: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.cfg.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.cfg.temperature,
            "max_tokens": self.cfg.max_tokens,
        });

        let resp = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.cfg.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("mistral request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "mistral api failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let v: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Generation(format!("mistral json error: {e}")))?;

        let text = extract_content(&v)
            .ok_or_else(|| Error::Generation("mistral response missing content".to_string()))?;

        if text.trim().is_empty() {
            return Err(Error::Generation(
                "mistral returned empty text".to_string(),
            ));
        }

        Ok(text)
    }
}

fn extract_content(v: &serde_json::Value) -> Option<String> {
    v.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}

#[async_trait]
impl PostGenerator for MistralClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_post(prompt).await
    }
}
