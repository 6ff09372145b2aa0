//! StatsBomb open-data client
//!
//! Downloads the per-match events and lineups JSON files. Responses can be
//! cached on disk for offline runs and reduced load on the host.

use std::path::{Path, PathBuf};

use super::feed::{with_retry, EventFeed};
use super::schema::{parse_events, parse_lineups};
use crate::{Event, FeedConfig, Lineup, PassNetError, Result};

/// The two per-match resources of the open-data repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Events,
    Lineups,
}

impl Resource {
    fn dir(self) -> &'static str {
        match self {
            Resource::Events => "events",
            Resource::Lineups => "lineups",
        }
    }
}

/// Feed reading StatsBomb open data over HTTP
pub struct StatsBombFeed {
    client: reqwest::blocking::Client,
    base_url: String,
    /// Optional cache directory for downloaded JSON
    cache_dir: Option<PathBuf>,
    /// If true, only use cache (no network requests)
    offline_only: bool,
    max_attempts: u32,
}

impl StatsBombFeed {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("passnet/0.1")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(StatsBombFeed {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_dir: None,
            offline_only: false,
            max_attempts: 3,
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let mut feed = Self::new(&config.base_url, config.timeout_secs)?
            .offline_only(config.offline)
            .max_attempts(config.max_attempts);
        if let Some(dir) = &config.cache_dir {
            feed = feed.with_cache(dir);
        }
        Ok(feed)
    }

    /// Create feed with a cache directory
    pub fn with_cache<P: AsRef<Path>>(mut self, cache_dir: P) -> Self {
        self.cache_dir = Some(cache_dir.as_ref().to_path_buf());
        self
    }

    /// Set offline-only mode (no network requests, cache must exist)
    pub fn offline_only(mut self, offline: bool) -> Self {
        self.offline_only = offline;
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn url(&self, resource: Resource, match_id: u64) -> String {
        format!("{}/{}/{}.json", self.base_url, resource.dir(), match_id)
    }

    fn cache_path(&self, resource: Resource, match_id: u64) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}_{}.json", resource.dir(), match_id)))
    }

    fn load_from_cache(&self, resource: Resource, match_id: u64) -> Option<String> {
        let path = self.cache_path(resource, match_id)?;
        if path.exists() {
            log::debug!("Loading from cache: {}", path.display());
            std::fs::read_to_string(&path).ok()
        } else {
            None
        }
    }

    fn save_to_cache(&self, resource: Resource, match_id: u64, body: &str) -> Result<()> {
        if let Some(path) = self.cache_path(resource, match_id) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, body)?;
            log::debug!("Saved to cache: {}", path.display());
        }
        Ok(())
    }

    fn download(&self, url: &str, match_id: u64) -> Result<String> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PassNetError::Feed {
                match_id,
                message: format!("{} returned {}", url, status),
            });
        }
        Ok(response.text()?)
    }

    /// Raw JSON body of a resource, from cache when available
    pub fn fetch_raw(&self, resource: Resource, match_id: u64) -> Result<String> {
        if let Some(body) = self.load_from_cache(resource, match_id) {
            return Ok(body);
        }

        if self.offline_only {
            return Err(PassNetError::Feed {
                match_id,
                message: format!("{} not cached and offline mode is on", resource.dir()),
            });
        }

        let url = self.url(resource, match_id);
        log::info!("Fetching {}", url);
        let body = with_retry(|| self.download(&url, match_id), self.max_attempts)?;

        if let Err(e) = self.save_to_cache(resource, match_id, &body) {
            log::warn!("Failed to cache {}: {}", url, e);
        }
        Ok(body)
    }
}

impl EventFeed for StatsBombFeed {
    fn events(&self, match_id: u64) -> Result<Vec<Event>> {
        parse_events(&self.fetch_raw(Resource::Events, match_id)?)
    }

    fn lineups(&self, match_id: u64) -> Result<Vec<Lineup>> {
        parse_lineups(&self.fetch_raw(Resource::Lineups, match_id)?)
    }
}
