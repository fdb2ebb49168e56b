use std::{str::FromStr, time::Duration};

use anyhow::Context;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub allowed_origin: String,
    pub fetch_delay: Duration,
    pub fetch_timeout: Duration,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            allowed_origin: "http://localhost:3000".into(),
            fetch_delay: Duration::from_millis(800),
            fetch_timeout: Duration::from_millis(5000),
            log_level: tracing::Level::INFO,
        }
    }
}

fn parse_var<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("fail to parse {key}={raw}"))
}

impl Config {
    /// Reads `.env` first, then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("MENU_BIND_ADDR") {
            config.bind_addr = v;
        }
        if let Some(v) = lookup("MENU_ALLOWED_ORIGIN") {
            config.allowed_origin = v;
        }
        if let Some(v) = lookup("MENU_FETCH_DELAY_MS") {
            config.fetch_delay = Duration::from_millis(parse_var("MENU_FETCH_DELAY_MS", &v)?);
        }
        if let Some(v) = lookup("MENU_FETCH_TIMEOUT_MS") {
            config.fetch_timeout = Duration::from_millis(parse_var("MENU_FETCH_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("MENU_LOG_LEVEL") {
            config.log_level = parse_var("MENU_LOG_LEVEL", &v)?;
        }

        Ok(config)
    }
}
