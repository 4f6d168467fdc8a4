use anyhow::{anyhow, Context, Result};
use secrecy::Secret;
use std::env;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_VIDEO_CAP: usize = 50;

#[derive(Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub youtube_api_key: Option<Secret<String>>,
    pub youtube_api_base_url: String,
    pub video_cap: usize,
    pub database_url: Option<String>,
}

impl Settings {
    /// Reads settings from the process environment. Call `dotenv` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_var_string)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let video_cap = match lookup("VIDEO_CAP") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("VIDEO_CAP must be a positive integer, got {:?}", raw))?,
            None => DEFAULT_VIDEO_CAP,
        };
        if video_cap == 0 {
            return Err(anyhow!("VIDEO_CAP must be greater than zero"));
        }

        Ok(Settings {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            youtube_api_key: lookup("YOUTUBE_API_KEY").map(Secret::new),
            youtube_api_base_url: lookup("YOUTUBE_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_YOUTUBE_API_BASE_URL.to_string()),
            video_cap,
            database_url: lookup("DATABASE_URL"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_var_string(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.bind_address(), "0.0.0.0:5000");
        assert_eq!(settings.video_cap, DEFAULT_VIDEO_CAP);
        assert_eq!(settings.youtube_api_base_url, DEFAULT_YOUTUBE_API_BASE_URL);
        assert!(settings.youtube_api_key.is_none());
        assert!(settings.database_url.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8088"),
            ("YOUTUBE_API_KEY", "abc123"),
            ("YOUTUBE_API_BASE_URL", "http://localhost:9000/v3/"),
            ("VIDEO_CAP", "75"),
            ("DATABASE_URL", "sqlite://curator.db"),
        ]))
        .unwrap();

        assert_eq!(settings.bind_address(), "127.0.0.1:8088");
        assert_eq!(
            settings.youtube_api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("abc123")
        );
        assert_eq!(settings.youtube_api_base_url, "http://localhost:9000/v3");
        assert_eq!(settings.video_cap, 75);
        assert_eq!(settings.database_url.as_deref(), Some("sqlite://curator.db"));
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let settings =
            Settings::from_lookup(lookup_from(&[("YOUTUBE_API_KEY", "super-secret")])).unwrap();
        assert!(!format!("{:?}", settings).contains("super-secret"));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(Settings::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(Settings::from_lookup(lookup_from(&[("VIDEO_CAP", "-1")])).is_err());
        assert!(Settings::from_lookup(lookup_from(&[("VIDEO_CAP", "0")])).is_err());
    }
}
