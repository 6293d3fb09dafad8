/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so handlers can
/// pick the right user-facing message (forbidden vs generic failure).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text-generation API failure (HTTP error, timeout, malformed body).
    #[error("generation error: {0}")]
    Generation(String),

    /// The channel rejected the post (no posting rights / bot kicked).
    #[error("publish forbidden: {0}")]
    PublishForbidden(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
