use anyhow::{Context, Result};

/// Default `tracing` directive, extended by `RUST_LOG`.
pub const LOG_DIRECTIVE: &str = "kidcard=info";

/// Runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend origin, without a trailing slash.
    pub backend_url: String,
}

impl Config {
    /// Reads `BACKEND_URL`.
    pub fn from_env() -> Result<Self> {
        let backend_url = std::env::var("BACKEND_URL").context(
            "BACKEND_URL environment variable not set. Set it with: export BACKEND_URL=http://localhost:8000",
        )?;
        Self::new(&backend_url)
    }

    pub fn new(backend_url: &str) -> Result<Self> {
        let trimmed = backend_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            anyhow::bail!("backend URL is empty");
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            anyhow::bail!("backend URL must start with http:// or https://, got {trimmed:?}");
        }

        Ok(Self {
            backend_url: trimmed.to_string(),
        })
    }

    /// Root of the REST API, `{backend_url}/api`.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.backend_url)
    }
}
