//! Jackett search aggregator client

use crate::error::{require_env, ApiResult};
use crate::model::{Indexer, SearchHit, SearchResponse};
use crate::utils;

/// Results endpoint restricted to indexers that are healthy and pass tests
const RESULTS_PATH: &str = "indexers/status:healthy,test:passed/results";

#[derive(Clone)]
pub struct JackettApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl JackettApi {
    /// Create a client for the Jackett instance at `host` (e.g. `http://localhost:9117`)
    pub fn new(host: &str, api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .unwrap_or_default(),
            base_url: format!("{}/api/v2.0/", host.trim_end_matches('/')),
            api_key,
        }
    }

    /// Create a client from `JACKETT_URL` and `JACKETT_API_KEY`
    pub fn from_env() -> ApiResult<Self> {
        let host = require_env("JACKETT_URL")?;
        let api_key = require_env("JACKETT_API_KEY")?;
        Ok(Self::new(&host, api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters of a search: the query itself plus one `Tracker[]`
    /// entry per selected tracker
    fn search_params(&self, query: &str, trackers: &[String]) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", self.api_key.clone()),
            ("Query", query.to_string()),
            ("_", utils::timestamp()),
        ];
        params.extend(trackers.iter().map(|t| ("Tracker[]", t.clone())));
        params
    }

    /// Search every healthy indexer, or only `trackers` when non-empty
    pub async fn query(&self, query: &str, trackers: &[String]) -> ApiResult<Vec<SearchHit>> {
        tracing::info!("Searching Jackett for {:?} (trackers: {:?})", query, trackers);
        let response: SearchResponse = self
            .client
            .get(format!("{}{}", self.base_url, RESULTS_PATH))
            .query(&self.search_params(query, trackers))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.results)
    }

    /// Indexers that are configured and currently without errors
    pub async fn valid_indexers(&self) -> ApiResult<Vec<Indexer>> {
        let indexers: Vec<Indexer> = self
            .client
            .get(format!("{}indexers", self.base_url))
            .query(&[("apikey", self.api_key.clone()), ("_", utils::timestamp())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(indexers.into_iter().filter(Indexer::is_usable).collect())
    }

    /// Fetch a `.torrent` through a Jackett download link
    pub async fn download(&self, link: &str) -> ApiResult<Vec<u8>> {
        let bytes = self
            .client
            .get(link)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let api = JackettApi::new("http://localhost:9117/", "key".into());
        assert_eq!(api.base_url(), "http://localhost:9117/api/v2.0/");
        let api = JackettApi::new("http://localhost:9117", "key".into());
        assert_eq!(api.base_url(), "http://localhost:9117/api/v2.0/");
    }

    #[test]
    fn test_search_params() {
        let api = JackettApi::new("http://localhost:9117", "key".into());
        let params = api.search_params("ubuntu iso", &[]);
        assert_eq!(params.len(), 3);
        assert_eq!(params[0], ("apikey", "key".to_string()));
        assert_eq!(params[1], ("Query", "ubuntu iso".to_string()));

        let trackers = vec!["rutracker".to_string(), "1337x".to_string()];
        let params = api.search_params("q", &trackers);
        let tracker_params: Vec<_> = params
            .iter()
            .filter(|(k, _)| *k == "Tracker[]")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(tracker_params, vec!["rutracker", "1337x"]);
    }
}
