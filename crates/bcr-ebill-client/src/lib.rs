use anyhow::{Result, anyhow};
use std::sync::OnceLock;

pub mod app;
pub mod constants;
pub mod context;
pub mod external;
pub mod service;
pub mod state;
#[cfg(test)]
mod tests;

pub use context::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the ledger HTTP API, e.g. `http://localhost:8000`
    pub ledger_base_url: url::Url,
    /// Sent as a bearer token with every request, if set
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(
        ledger_base_url: &str,
        api_token: Option<String>,
        request_timeout_secs: u64,
    ) -> Result<Self> {
        let ledger_base_url = url::Url::parse(ledger_base_url)
            .map_err(|e| anyhow!("Invalid ledger URL {ledger_base_url}: {e}"))?;
        if ledger_base_url.cannot_be_a_base() {
            return Err(anyhow!("Ledger URL {ledger_base_url} can't be a base URL"));
        }
        if request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout has to be at least one second"));
        }
        Ok(Self {
            ledger_base_url,
            api_token: api_token.filter(|t| !t.trim().is_empty()),
            request_timeout_secs,
        })
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn init(conf: Config) -> Result<()> {
    CONFIG
        .set(conf)
        .map_err(|e| anyhow!("Could not initialize E-Bill client: {e:?}"))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("E-Bill client is not initialized")
}
