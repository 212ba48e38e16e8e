use crate::error::{require_env, ApiError, ApiResult};
use crate::model::{SearchHit, TorrentEntry, TorrentStatus};
use crate::utils;
use chrono::{TimeZone, Utc};
use qbit_rs::{
    model::{AddTorrentArg, Credential, GetTorrentListArg, Sep, Torrent, TorrentFile, TorrentSource},
    Qbit,
};
use reqwest::Url;
use std::sync::Arc;

/// Wrapper around qBittorrent API client
#[derive(Clone)]
pub struct TorrentApi {
    pub client: Arc<Qbit>,
    http: reqwest::Client,
}

impl TorrentApi {
    /// Create a new TorrentApi for the given Web UI endpoint and credentials
    pub fn new(endpoint: &str, username: String, password: String) -> Self {
        let credential = Credential::new(username, password);
        let client = Arc::new(Qbit::new(endpoint, credential));
        TorrentApi {
            client,
            http: reqwest::Client::new(),
        }
    }

    /// Create a new TorrentApi instance from environment variables
    ///
    /// # Errors
    /// Returns an error if `QBIT_HOST`, `QBIT_USERNAME` or `QBIT_PASSWORD` is not set
    pub fn from_env() -> ApiResult<Self> {
        let endpoint = require_env("QBIT_HOST")?;
        let username = require_env("QBIT_USERNAME")?;
        let password = require_env("QBIT_PASSWORD")?;
        Ok(Self::new(&endpoint, username, password))
    }

    /// Authenticate with the qBittorrent server
    ///
    /// # Errors
    /// Returns an error if authentication fails
    pub async fn login(&self) -> ApiResult<()> {
        self.client.login(false).await.map_err(|e| {
            tracing::error!("Failed to login to qBittorrent: {}", e);
            ApiError::from(e)
        })
    }

    /// List every torrent with its file statistics
    pub async fn list_torrents(&self) -> ApiResult<Vec<TorrentEntry>> {
        tracing::info!("Querying torrents from qBittorrent");
        let arg = GetTorrentListArg {
            filter: None,
            category: None,
            tag: None,
            sort: None,
            reverse: None,
            limit: None,
            offset: None,
            hashes: None,
        };

        let torrents = self.client.get_torrent_list(arg).await.map_err(|err| {
            tracing::error!("Error querying torrents: {}", err);
            ApiError::from(err)
        })?;

        let mut entries = Vec::with_capacity(torrents.len());
        for torrent in &torrents {
            let Some(hash) = torrent.hash.as_deref() else {
                continue;
            };
            let names = match self.client.get_torrent_contents(hash, None).await {
                Ok(files) => files.into_iter().map(|f| f.name).collect(),
                Err(err) => {
                    tracing::warn!("Error getting files of {}: {}", hash, err);
                    Vec::new()
                }
            };
            entries.push(to_entry(hash, torrent, &names));
        }
        Ok(entries)
    }

    /// Add a torrent by URL or magnet link
    pub async fn add_url(&self, link: &str) -> ApiResult<()> {
        tracing::info!("Adding torrent with URL: {}", link);
        let url = Url::parse(link).map_err(|_| ApiError::InvalidLink(link.to_string()))?;
        let arg = AddTorrentArg {
            source: TorrentSource::Urls {
                urls: Sep::from(vec![url]),
            },
            ..Default::default()
        };
        self.client.add_torrent(arg).await.map_err(|err| {
            tracing::error!("Error adding torrent: {}", err);
            ApiError::from(err)
        })
    }

    /// Upload a `.torrent` file
    pub async fn add_file(&self, filename: &str, data: Vec<u8>) -> ApiResult<()> {
        tracing::info!("Adding torrent file: {} ({} bytes)", filename, data.len());
        let arg = AddTorrentArg {
            source: TorrentSource::TorrentFiles {
                torrents: vec![TorrentFile {
                    filename: filename.to_string(),
                    data,
                }],
            },
            ..Default::default()
        };
        self.client.add_torrent(arg).await.map_err(|err| {
            tracing::error!("Error adding torrent file: {}", err);
            ApiError::from(err)
        })
    }

    /// Add a search hit, preferring its `.torrent` link over the magnet
    ///
    /// The `.torrent` is downloaded here rather than handed to qBittorrent as
    /// a URL, since Jackett's proxy links are often unreachable from the client.
    pub async fn add_hit(&self, hit: &SearchHit) -> ApiResult<()> {
        if let Some(link) = hit.link.as_deref() {
            match self.download(link).await {
                Ok(data) => return self.add_file(&format!("{}.torrent", hit.title), data).await,
                Err(err) => tracing::warn!("Could not fetch .torrent for {}: {}", hit.title, err),
            }
        }
        match hit.magnet_uri.as_deref() {
            Some(magnet) => self.add_url(magnet).await,
            None => Err(ApiError::Unsupported(format!("{} has neither link nor magnet", hit.title))),
        }
    }

    async fn download(&self, link: &str) -> ApiResult<Vec<u8>> {
        let bytes = self.http.get(link).send().await?.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }

    pub async fn start(&self, hash: &str) -> ApiResult<()> {
        tracing::info!("Starting torrent {}", hash);
        self.client
            .start_torrents(vec![hash.to_string()])
            .await
            .map_err(ApiError::from)
    }

    pub async fn stop(&self, hash: &str) -> ApiResult<()> {
        tracing::info!("Stopping torrent {}", hash);
        self.client
            .stop_torrents(vec![hash.to_string()])
            .await
            .map_err(ApiError::from)
    }

    /// Remove a torrent together with its downloaded data
    pub async fn remove(&self, hash: &str) -> ApiResult<()> {
        tracing::info!("Removing torrent {} with data", hash);
        self.client
            .delete_torrents(vec![hash.to_string()], Some(true))
            .await
            .map_err(ApiError::from)
    }
}

fn to_entry(hash: &str, torrent: &Torrent, file_names: &[String]) -> TorrentEntry {
    let status = torrent
        .state
        .as_ref()
        .map(|s| TorrentStatus::from_state_name(&format!("{:?}", s)))
        .unwrap_or(TorrentStatus::Unknown);

    TorrentEntry {
        hash: hash.to_string(),
        name: torrent.name.clone().unwrap_or_else(|| "Unknown".to_string()),
        progress: torrent.progress.unwrap_or(0.0),
        status,
        size: torrent.total_size.or(torrent.size).unwrap_or(0).max(0) as u64,
        ratio: torrent.ratio.unwrap_or(0.0),
        added: torrent
            .added_on
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        file_count: file_names.len(),
        ext: utils::most_common_ext(file_names.iter().map(String::as_str)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotenv::dotenv;

    #[tokio::test]
    #[ignore = "requires a running qBittorrent configured in .env"]
    async fn test_login() {
        dotenv().ok();
        let api = TorrentApi::from_env().expect("QBIT_* variables must be set");
        let result = api.login().await;
        assert!(result.is_ok(), "Login failed: {:?}", result.err());
    }

    #[tokio::test]
    #[ignore = "requires a running qBittorrent configured in .env"]
    async fn test_list_torrents() {
        dotenv().ok();
        let api = TorrentApi::from_env().expect("QBIT_* variables must be set");
        let login_result = api.login().await;
        assert!(login_result.is_ok(), "Login failed: {:?}", login_result.err());

        let resp = api.list_torrents().await;
        assert!(resp.is_ok(), "Query failed: {:?}", resp.err());
    }

    #[tokio::test]
    async fn test_add_url_rejects_garbage() {
        let api = TorrentApi::new("http://localhost:8080", "u".into(), "p".into());
        let result = api.add_url("not a link").await;
        assert!(matches!(result, Err(ApiError::InvalidLink(_))));
    }

    #[test]
    fn test_from_env_reports_missing_variable() {
        std::env::remove_var("QBIT_HOST");
        assert!(matches!(TorrentApi::from_env(), Err(ApiError::Config(_))));
    }
}
