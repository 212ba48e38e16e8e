//! TorrServer streaming server client
//!
//! TorrServer exposes a single `POST /torrents` endpoint taking a JSON body
//! whose `action` field selects the operation (`add`, `rem`, `list`, ...).

use crate::error::{require_env, ApiResult};
use crate::model::StreamEntry;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct TorrServerApi {
    client: reqwest::Client,
    url: String,
}

impl TorrServerApi {
    /// Create a client for the TorrServer at `host` (e.g. `http://localhost:8090`)
    pub fn new(host: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/torrents", host.trim_end_matches('/')),
        }
    }

    /// Create a client from `TORRSERVER_URL`
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::new(&require_env("TORRSERVER_URL")?))
    }

    async fn call(&self, body: Value) -> ApiResult<reqwest::Response> {
        Ok(self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?)
    }

    pub async fn list(&self) -> ApiResult<Vec<StreamEntry>> {
        let entries = self.call(list_request()).await?.json().await?;
        Ok(entries)
    }

    /// Register a torrent (link or magnet) for streaming
    pub async fn add(&self, link: &str, title: &str, poster: Option<&str>) -> ApiResult<()> {
        tracing::info!("Adding {} to TorrServer", title);
        self.call(add_request(link, title, poster)).await?;
        Ok(())
    }

    pub async fn remove(&self, hash: &str) -> ApiResult<()> {
        tracing::info!("Removing {} from TorrServer", hash);
        self.call(remove_request(hash)).await?;
        Ok(())
    }
}

fn list_request() -> Value {
    json!({ "action": "list" })
}

fn add_request(link: &str, title: &str, poster: Option<&str>) -> Value {
    json!({
        "action": "add",
        "link": link,
        "title": title,
        "poster": poster.unwrap_or_default(),
    })
}

fn remove_request(hash: &str) -> Value {
    json!({ "action": "rem", "hash": hash })
}
