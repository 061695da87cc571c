//! Production directory feed: drives a maps-style HTML search surface over
//! plain HTTP with paginated result pages standing in for feed scrolling.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::directory::feed::{DetailView, DirectoryFeed, EntryHandle};
use crate::directory::fields::{FieldStrategy, ValueSource};
use crate::errors::FeedError;

// Result-feed fallback chain, most specific first.
const FEED_SELECTORS: &[&str] = &[
    r#"div[role="feed"]"#,
    r#"div[aria-label^="Results for"]"#,
];
const ENTRY_SELECTOR: &str = r#"div[role="article"]"#;

pub struct MapsSession {
    client: Client,
    base_url: String,
    language: String,
    output_dir: String,
    pagination_step: usize,
    delay_min_ms: u64,
    delay_max_ms: u64,
    query: String,
    offset: usize,
    current_page: String,
    page_url: String,
    entry_links: HashMap<String, String>,
}

impl MapsSession {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )
            .timeout(Duration::from_secs(config.scraping.session_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.search.base_url.clone(),
            language: config.search.language.clone(),
            output_dir: config.output.directory.clone(),
            pagination_step: config.scraping.pagination_step,
            delay_min_ms: config.scraping.action_delay_min_ms,
            delay_max_ms: config.scraping.action_delay_max_ms,
            query: String::new(),
            offset: 0,
            current_page: String::new(),
            page_url: String::new(),
            entry_links: HashMap::new(),
        }
    }

    // Politeness pacing between requests against the search surface.
    async fn pace(&self) {
        let ms = fastrand::u64(self.delay_min_ms..=self.delay_max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    fn results_url(&self) -> Result<Url, FeedError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FeedError::Session(format!("invalid search base URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("q", &self.query)
            .append_pair("hl", &self.language)
            .append_pair("start", &self.offset.to_string());
        Ok(url)
    }

    async fn fetch_results_page(&mut self) -> Result<(), FeedError> {
        let url = self.results_url()?;
        debug!("Fetching results page: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FeedError::LoadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::LoadFailed(format!(
                "HTTP {} from search surface",
                response.status()
            )));
        }

        self.page_url = response.url().to_string();
        self.current_page = response
            .text()
            .await
            .map_err(|e| FeedError::LoadFailed(e.to_string()))?;
        Ok(())
    }

    fn feed_selector(&self) -> Option<&'static str> {
        let document = Html::parse_document(&self.current_page);
        FEED_SELECTORS.iter().copied().find(|css| {
            let selector = Selector::parse(css).unwrap();
            document.select(&selector).next().is_some()
        })
    }

    async fn dump_debug_page(&self) {
        let path = format!("{}/debug_page.html", self.output_dir);
        if let Err(e) = tokio::fs::write(&path, &self.current_page).await {
            warn!("Failed to save debug page to {}: {}", path, e);
        } else {
            warn!("Search surface not found; page body saved to {}", path);
        }
    }

    fn resolve_link(&self, href: &str) -> Option<String> {
        match Url::parse(href) {
            Ok(url) => Some(url.to_string()),
            Err(_) => Url::parse(&self.page_url)
                .ok()
                .and_then(|base| base.join(href).ok())
                .map(|u| u.to_string()),
        }
    }
}

#[async_trait]
impl DirectoryFeed for MapsSession {
    async fn open_search(&mut self, query: &str) -> Result<(), FeedError> {
        self.query = query.to_string();
        self.offset = 0;
        self.entry_links.clear();

        match self.fetch_results_page().await {
            Ok(()) => {}
            // Cannot even reach the surface: the session is unusable.
            Err(e) => return Err(FeedError::Session(e.to_string())),
        }

        if self.feed_selector().is_none() {
            self.dump_debug_page().await;
            return Err(FeedError::SurfaceNotFound {
                query: query.to_string(),
            });
        }
        Ok(())
    }

    async fn list_visible_entries(&mut self) -> Result<Vec<EntryHandle>, FeedError> {
        let mut entries = Vec::new();
        let document = Html::parse_document(&self.current_page);
        let entry_selector = Selector::parse(ENTRY_SELECTOR).unwrap();
        let link_selector = Selector::parse("a[href]").unwrap();

        for element in document.select(&entry_selector) {
            let label = element.value().attr("aria-label").unwrap_or("").trim();
            if label.is_empty() {
                continue;
            }
            if let Some(href) = element
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| self.resolve_link(href))
            {
                self.entry_links.insert(label.to_string(), href);
            }
            entries.push(EntryHandle {
                id: label.to_string(),
                label: label.to_string(),
            });
        }

        debug!("Visible entries at offset {}: {}", self.offset, entries.len());
        Ok(entries)
    }

    async fn activate_entry(&mut self, entry: &EntryHandle) -> Result<DetailView, FeedError> {
        let href = self
            .entry_links
            .get(&entry.id)
            .cloned()
            .ok_or_else(|| FeedError::EntryUnavailable {
                label: entry.label.clone(),
                reason: "no detail link on entry".to_string(),
            })?;

        self.pace().await;

        let response = self
            .client
            .get(&href)
            .send()
            .await
            .map_err(|e| FeedError::EntryUnavailable {
                label: entry.label.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FeedError::EntryUnavailable {
                label: entry.label.clone(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let url = response.url().to_string();
        let body = response.text().await.map_err(|e| FeedError::EntryUnavailable {
            label: entry.label.clone(),
            reason: e.to_string(),
        })?;

        Ok(DetailView { url, body })
    }

    async fn trigger_incremental_load(&mut self) -> Result<(), FeedError> {
        self.offset += self.pagination_step;
        self.pace().await;
        self.fetch_results_page().await
    }

    fn read_field(&self, view: &DetailView, strategy: &FieldStrategy) -> Option<String> {
        let document = Html::parse_document(&view.body);
        let selector = Selector::parse(strategy.selector).unwrap();
        let element = document.select(&selector).next()?;

        let value = match strategy.source {
            ValueSource::Text => element.text().collect::<Vec<_>>().join(" "),
            ValueSource::Attr(name) => element.value().attr(name)?.to_string(),
        };

        let value = value.trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}
