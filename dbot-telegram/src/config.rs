//! Minimal Telegram connectivity config: token, API URL, log path.
//! Loaded from BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL) and LOG_FILE.

use anyhow::Result;
use std::env;

/// Telegram access and logging settings for a bot process.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from the environment. BOT_TOKEN is required; the API URL and LOG_FILE are optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok()
            .filter(|s| !s.is_empty());
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.is_empty());
        let config = Self {
            bot_token,
            telegram_api_url,
            log_file,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a config with the given token and nothing else set.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Rejects an empty token or an API URL that does not parse.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(url) = &self.telegram_api_url {
            reqwest::Url::parse(url)
                .map_err(|e| anyhow::anyhow!("Invalid Telegram API URL {}: {}", url, e))?;
        }
        Ok(())
    }

    /// Builds the teloxide Bot, pointing it at the custom API URL when one is set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(&self.bot_token);
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url)
                    .map_err(|e| anyhow::anyhow!("Invalid Telegram API URL {}: {}", url, e))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["BOT_TOKEN", "TELEGRAM_API_URL", "TELOXIDE_API_URL", "LOG_FILE"] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_token_and_bad_url() {
        assert!(TelegramConfig::with_token("  ".to_string()).validate().is_err());

        let mut config = TelegramConfig::with_token("t".to_string());
        config.telegram_api_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
        assert!(config.build_bot().is_err());

        config.telegram_api_url = Some("http://localhost:8081".to_string());
        assert!(config.validate().is_ok());
        assert!(config.build_bot().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_token() {
        clear_env();
        assert!(TelegramConfig::from_env().is_err());
    }

    /// **Test: TELOXIDE_API_URL is used when TELEGRAM_API_URL is unset.**
    #[test]
    #[serial]
    fn test_from_env_reads_optional_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "123:abc");
        env::set_var("TELOXIDE_API_URL", "http://localhost:8081");
        env::set_var("LOG_FILE", "logs/bot.log");

        let config = TelegramConfig::from_env();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.telegram_api_url.as_deref(), Some("http://localhost:8081"));
        assert_eq!(config.log_file.as_deref(), Some("logs/bot.log"));
    }
}
