//! Server configuration from the environment.

use anyhow::{bail, Context};
use std::net::SocketAddr;
use std::time::Duration;
use trivia_core::{BoardSettings, FetchStrategy};

/// Default upstream catalogue
pub const DEFAULT_API_URL: &str = "https://jservice.io/api/";

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to
    pub addr: SocketAddr,
    /// Base URL of the trivia API, always ending in `/`
    pub api_url: String,
    /// Timeout for each upstream request
    pub http_timeout: Duration,
    /// Board shape and fetch scheduling for every game
    pub board: BoardSettings,
}

impl ServerConfig {
    /// Read `SERVER_ADDR`, `TRIVIA_API_URL`, `TRIVIA_HTTP_TIMEOUT_SECS` and
    /// `TRIVIA_FETCH`, falling back to defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr: SocketAddr = lookup("SERVER_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".into())
            .parse()
            .context("SERVER_ADDR is not a socket address")?;

        let mut api_url = lookup("TRIVIA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        let timeout_secs: u64 = match lookup("TRIVIA_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .context("TRIVIA_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 10,
        };

        let fetch = match lookup("TRIVIA_FETCH").as_deref() {
            None | Some("sequential") => FetchStrategy::Sequential,
            Some("concurrent") => FetchStrategy::Concurrent,
            Some(other) => bail!("TRIVIA_FETCH must be 'sequential' or 'concurrent', got '{}'", other),
        };

        Ok(Self {
            addr,
            api_url,
            http_timeout: Duration::from_secs(timeout_secs),
            board: BoardSettings {
                fetch,
                ..BoardSettings::default()
            },
        })
    }
}
