use std::collections::HashSet;

use tracing::{info, warn};
use uuid::Uuid;

use crate::analyzer::fetcher::PageFetcher;
use crate::analyzer::website::WebsiteAnalyzer;
use crate::directory::feed::DirectoryFeed;
use crate::directory::ListingExtractor;
use crate::errors::FeedError;
use crate::models::Lead;
use crate::pipeline::merge::merge;

pub const CITY_PLACEHOLDER: &str = "{city}";

#[derive(Debug)]
pub struct PipelineRun {
    pub run_id: String,
    pub leads: Vec<Lead>,
}

/// Orchestrates one run end-to-end: query expansion, listing extraction,
/// per-listing website analysis and cross-query deduplication by business
/// name. Single-threaded by design; the navigation session cannot be
/// shared.
pub struct EnrichmentEngine<F: DirectoryFeed, P: PageFetcher> {
    feed: F,
    analyzer: WebsiteAnalyzer<P>,
    extractor: ListingExtractor,
}

impl<F: DirectoryFeed, P: PageFetcher> EnrichmentEngine<F, P> {
    pub fn new(feed: F, analyzer: WebsiteAnalyzer<P>, max_empty_passes: usize) -> Self {
        Self {
            feed,
            analyzer,
            extractor: ListingExtractor::new(max_empty_passes),
        }
    }

    /// Runs every query and returns one Lead per distinct business name, in
    /// first-seen order. Only a session failure aborts; everything else
    /// degrades the affected record.
    pub async fn run(
        &mut self,
        area_label: &str,
        queries: &[String],
        per_query_limit: usize,
    ) -> Result<PipelineRun, FeedError> {
        let run_id = Uuid::new_v4().to_string();
        info!(run_id = %run_id, "Starting pipeline for city: {}", area_label);

        let mut leads: Vec<Lead> = Vec::new();
        let mut seen_names: HashSet<String> = HashSet::new();

        for template in queries {
            let query = expand_query(template, area_label);
            info!(run_id = %run_id, "Running query: {}", query);

            let listings = self
                .extractor
                .extract_listings(&mut self.feed, &query, per_query_limit)
                .await?;
            info!("Found {} listings from query \"{}\"", listings.len(), query);

            for listing in listings {
                if seen_names.contains(&listing.name) {
                    info!("Skipping duplicate: {}", listing.name);
                    continue;
                }

                let findings = if listing.website.is_empty() {
                    None
                } else {
                    info!("Visiting {}...", listing.website);
                    Some(self.analyzer.analyze(&listing.website).await)
                };

                if let Some(f) = &findings {
                    if f.quality_score == 10 && !f.notes.is_empty() {
                        warn!("Degraded record for {}: {}", listing.name, f.notes.trim());
                    }
                }

                seen_names.insert(listing.name.clone());
                leads.push(merge(listing, findings));
            }
        }

        info!(run_id = %run_id, "Total unique leads: {}", leads.len());
        Ok(PipelineRun { run_id, leads })
    }
}

fn expand_query(template: &str, area_label: &str) -> String {
    if template.contains(CITY_PLACEHOLDER) {
        template.replace(CITY_PLACEHOLDER, area_label)
    } else {
        template.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::fetcher::FetchedPage;
    use crate::directory::feed::{DetailView, EntryHandle};
    use crate::directory::fields::FieldStrategy;
    use crate::errors::FetchFailure;
    use crate::pipeline::filter::filter_leads;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const WEBSITE_SELECTOR: &str = r#"a[data-item-id="authority"]"#;
    const PHONE_SELECTOR: &str = r#"button[data-item-id^="phone"]"#;

    /// Feed scripted per query: every search serves the same entry list with
    /// optional website/phone fields keyed by entry label.
    struct QueryFeed {
        entries: Vec<(String, String, String)>, // (label, website, phone)
        searches: Vec<String>,
    }

    impl QueryFeed {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                entries: entries
                    .iter()
                    .map(|(label, website)| {
                        (label.to_string(), website.to_string(), String::new())
                    })
                    .collect(),
                searches: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl DirectoryFeed for QueryFeed {
        async fn open_search(&mut self, query: &str) -> Result<(), FeedError> {
            self.searches.push(query.to_string());
            Ok(())
        }

        async fn list_visible_entries(&mut self) -> Result<Vec<EntryHandle>, FeedError> {
            Ok(self
                .entries
                .iter()
                .map(|(label, _, _)| EntryHandle {
                    id: label.clone(),
                    label: label.clone(),
                })
                .collect())
        }

        async fn activate_entry(&mut self, entry: &EntryHandle) -> Result<DetailView, FeedError> {
            Ok(DetailView {
                url: format!("detail://{}", entry.id),
                body: entry.id.clone(),
            })
        }

        async fn trigger_incremental_load(&mut self) -> Result<(), FeedError> {
            Ok(())
        }

        fn read_field(&self, view: &DetailView, strategy: &FieldStrategy) -> Option<String> {
            let (_, website, phone) = self
                .entries
                .iter()
                .find(|(label, _, _)| *label == view.body)?;
            match strategy.selector {
                WEBSITE_SELECTOR if !website.is_empty() => Some(website.clone()),
                PHONE_SELECTOR if !phone.is_empty() => Some(phone.clone()),
                _ => None,
            }
        }
    }

    /// Serves one canned page body for every URL, counting fetches.
    struct CannedFetcher {
        body: String,
        final_url_of: fn(&str) -> String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PageFetcher for CannedFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(FetchedPage {
                final_url: (self.final_url_of)(url),
                status: 200,
                body: self.body.clone(),
            })
        }
    }

    fn plain_page_fetcher(calls: Arc<AtomicUsize>) -> CannedFetcher {
        CannedFetcher {
            body: r#"<html><head><meta name="viewport" content="w"></head>
                <body>Welcome to our practice.</body></html>"#
                .to_string(),
            // Sites redirect to their secure host.
            final_url_of: |url| url.replacen("http://", "https://", 1),
            calls,
        }
    }

    #[tokio::test]
    async fn end_to_end_scenario_with_keyword_filter() {
        let feed = QueryFeed::new(&[
            ("A Dental", "http://a.com"),
            ("Smile Brands Dental", ""),
        ]);
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = WebsiteAnalyzer::new(plain_page_fetcher(calls.clone()));
        let mut engine = EnrichmentEngine::new(feed, analyzer, 3);

        let run = engine
            .run(
                "Springfield",
                &["Dentist near {city}".to_string()],
                10,
            )
            .await
            .unwrap();

        assert_eq!(engine.feed.searches, vec!["Dentist near Springfield"]);
        assert_eq!(run.leads.len(), 2);
        assert_eq!(run.leads[0].business_name, "A Dental");
        assert_eq!(run.leads[0].quality_score, 5);
        assert!(run.leads[0].notes.contains("No booking system detected."));
        // Only A Dental has a website; no fetch for the other listing.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(run.leads[1].quality_score, 10);
        assert_eq!(run.leads[1].notes, "No Website listed on Maps.");

        let skip = vec!["Smile Brands".to_string()];

        // The chain-owned listing is dropped by keyword even though its
        // score 10 would pass the score gate.
        let kept = filter_leads(run.leads.clone(), &skip, 8);
        assert!(kept.iter().all(|l| l.business_name != "Smile Brands Dental"));

        let kept = filter_leads(run.leads, &skip, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].business_name, "A Dental");
    }

    #[tokio::test]
    async fn duplicate_names_keep_first_occurrence() {
        let feed = QueryFeed::new(&[("A Dental", "")]);
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = WebsiteAnalyzer::new(plain_page_fetcher(calls));
        let mut engine = EnrichmentEngine::new(feed, analyzer, 3);

        // Same listing surfaces in every query; merging must be idempotent.
        let queries = vec![
            "Dentist near {city}".to_string(),
            "Dental clinic near {city}".to_string(),
        ];
        let run = engine.run("Springfield", &queries, 10).await.unwrap();
        assert_eq!(run.leads.len(), 1);
        assert_eq!(run.leads[0].business_name, "A Dental");
    }

    #[tokio::test]
    async fn literal_queries_pass_through_unchanged() {
        let feed = QueryFeed::new(&[]);
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = WebsiteAnalyzer::new(plain_page_fetcher(calls));
        let mut engine = EnrichmentEngine::new(feed, analyzer, 1);

        engine
            .run("Springfield", &["Orthodontist 02134".to_string()], 5)
            .await
            .unwrap();
        assert_eq!(engine.feed.searches, vec!["Orthodontist 02134"]);
    }
}
