use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

/// Typed, immutable process configuration.
///
/// Loaded once at startup and passed into components by `Arc`; nothing reads
/// the environment after `load()` returns.
#[derive(Clone, Debug)]
pub struct Config {
    // Required
    pub mistral_api_key: String,
    pub telegram_bot_token: String,
    /// Target channel: `@username` or a numeric chat id.
    pub channel_id: String,
    pub admin_ids: Vec<i64>,

    // Model parameters
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,

    // Timeouts
    pub request_timeout: Duration,
    /// Maximum age of a decision callback before it is rejected as stale.
    pub callback_timeout: Duration,

    // Persistence
    pub topics_file: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let mistral_api_key = require("MISTRAL_API_KEY")?;
        let telegram_bot_token = require("TELEGRAM_BOT_TOKEN")?;
        let channel_id = require("CHANNEL_ID")?;

        let admin_ids = parse_csv_i64(env_str("ADMIN_IDS"));
        if admin_ids.is_empty() {
            return Err(Error::Config(
                "ADMIN_IDS environment variable is required".to_string(),
            ));
        }

        let model = env_str("MODEL").unwrap_or_else(|| "mistral-small".to_string());
        let max_tokens = env_u32("MAX_TOKENS").unwrap_or(1500);
        let temperature = env_f32("TEMPERATURE").unwrap_or(0.8);

        let request_timeout = Duration::from_secs(env_u64("REQUEST_TIMEOUT_SECS").unwrap_or(25));
        let callback_timeout = Duration::from_secs(env_u64("CALLBACK_TIMEOUT_SECS").unwrap_or(30));

        let topics_file =
            PathBuf::from(env_str("TOPICS_FILE").unwrap_or("used_topics.json".to_string()));

        Ok(Self {
            mistral_api_key,
            telegram_bot_token,
            channel_id,
            admin_ids,
            model,
            max_tokens,
            temperature,
            request_timeout,
            callback_timeout,
            topics_file,
        })
    }
}

fn require(key: &str) -> Result<String> {
    match env_str(key).and_then(non_empty) {
        Some(v) => Ok(v),
        None => Err(Error::Config(format!(
            "{key} environment variable is required"
        ))),
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_u32(key: &str) -> Option<u32> {
    env_str(key).and_then(|s| s.trim().parse::<u32>().ok())
}

fn env_f32(key: &str) -> Option<f32> {
    env_str(key).and_then(|s| s.trim().parse::<f32>().ok())
}

fn parse_csv_i64(v: Option<String>) -> Vec<i64> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
