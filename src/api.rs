use anyhow::{Context, Result};
use reqwest::{Client, Url};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::delete::KidStore;
use crate::kid::Kid;

/// Client for the kids REST API.
#[derive(Clone)]
pub struct KidsClient {
    api: Arc<String>,
    http: Arc<Client>,
}

impl KidsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("kidcard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api: Arc::new(config.api_base()),
            http: Arc::new(http),
        })
    }

    fn kids_url(&self) -> String {
        format!("{}/kids", self.api)
    }

    /// `{api}/kids/{id}` with `id` encoded as a single path segment.
    fn kid_url(&self, id: &str) -> Result<Url> {
        if matches!(id, "" | "." | "..") {
            anyhow::bail!("Invalid kid id {id:?}");
        }

        let mut url = Url::parse(&self.kids_url()).context("Invalid kids API URL")?;
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Kids API URL cannot have a path"))?
            .push(id);
        Ok(url)
    }

    /// Fetch every kid record.
    pub async fn list_kids(&self) -> Result<Vec<Kid>> {
        let url = self.kids_url();
        debug!(%url, "listing kids");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Network error fetching kids: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Kids API returned HTTP {}: {body}",
                status.as_u16()
            ));
        }

        resp.json::<Vec<Kid>>()
            .await
            .context("Failed to deserialize kids list")
    }

    /// Delete one kid by id. Single attempt, no retry.
    pub async fn delete_kid(&self, id: &str) -> Result<()> {
        let url = self.kid_url(id)?;
        debug!(%url, "deleting kid");

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Network error deleting kid {id}: {e}"))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(anyhow::anyhow!(
            "Kids API returned HTTP {} deleting {id}: {body}",
            status.as_u16()
        ))
    }
}

impl KidStore for KidsClient {
    async fn delete_kid(&self, id: &str) -> Result<()> {
        KidsClient::delete_kid(self, id).await
    }
}
