//! Bot config: Telegram and Gemini credentials, health port, logging. Loaded from env.

use anyhow::Result;
use std::env;

/// Application config (credentials, endpoints, health port, logging).
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_TOKEN
    pub telegram_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL (self-hosted Bot API servers)
    pub telegram_api_url: Option<String>,
    /// GEMINI_API_KEY
    pub gemini_api_key: String,
    /// GEMINI_API_URL (override for tests and proxies)
    pub gemini_api_url: Option<String>,
    /// GEMINI_MODEL
    pub gemini_model: String,
    /// PORT the health server binds to (injected by the hosting platform)
    pub port: u16,
    /// Log file path
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides TELEGRAM_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram_token = match token {
            Some(t) => t,
            None => env::var("TELEGRAM_TOKEN")
                .map_err(|_| anyhow::anyhow!("TELEGRAM_TOKEN not set"))?,
        };
        let gemini_api_key =
            env::var("GEMINI_API_KEY").map_err(|_| anyhow::anyhow!("GEMINI_API_KEY not set"))?;
        let gemini_model = env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| gemini_client::DEFAULT_MODEL.to_string());
        let gemini_api_url = env::var("GEMINI_API_URL").ok();
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/imagen-bot.log".to_string());

        Ok(Self {
            telegram_token,
            telegram_api_url,
            gemini_api_key,
            gemini_api_url,
            gemini_model,
            port,
            log_file,
        })
    }

    /// Validate config (override URLs must parse if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref url_str) = self.gemini_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("GEMINI_API_URL is set but not a valid URL: {}", url_str);
            }
        }
        Ok(())
    }
}
