use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Runtime settings read from `ROSTER_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    /// Fixed seed for reviewer draws. Unset means OS entropy.
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = get("ROSTER_DB_PATH").unwrap_or_else(|| "roster.db".into());
        let host = get("ROSTER_HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = get("ROSTER_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .context("ROSTER_PORT must be a port number")?;

        let timeout_secs: u64 = get("ROSTER_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".into())
            .parse()
            .context("ROSTER_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        let rng_seed = match get("ROSTER_RNG_SEED") {
            Some(raw) => Some(raw.parse().context("ROSTER_RNG_SEED must be an unsigned integer")?),
            None => None,
        };

        Ok(Self {
            db_path: PathBuf::from(db_path),
            host,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
            rng_seed,
        })
    }

    pub fn in_memory(&self) -> bool {
        self.db_path.as_os_str() == ":memory:"
    }
}
