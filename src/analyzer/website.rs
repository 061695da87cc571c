use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::analyzer::fetcher::{FetchedPage, PageFetcher};
use crate::analyzer::quality;
use crate::models::{SocialLinks, WebsiteFindings};

const BOOKING_PHRASES: &[&str] = &[
    "book online",
    "schedule appointment",
    "request appointment",
    "book now",
];

pub struct WebsiteAnalyzer<P: PageFetcher> {
    fetcher: P,
    email_regex: Regex,
    phone_regex: Regex,
}

impl<P: PageFetcher> WebsiteAnalyzer<P> {
    pub fn new(fetcher: P) -> Self {
        Self {
            fetcher,
            email_regex: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap(),
            phone_regex: Regex::new(
                r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
            )
            .unwrap(),
        }
    }

    /// Visits the website once and extracts contact signals plus a quality
    /// score. Never fails: unreachable sites come back as score 10 with an
    /// explanatory note.
    pub async fn analyze(&self, url: &str) -> WebsiteFindings {
        if url.is_empty() {
            return WebsiteFindings::unreachable(url, "No Website".to_string());
        }

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                info!("Website fetch failed for {}: {}", url, e);
                return WebsiteFindings::unreachable(url, format!("Scraping Error: {}", e));
            }
        };

        self.analyze_page(url, &page)
    }

    fn analyze_page(&self, url: &str, page: &FetchedPage) -> WebsiteFindings {
        let text_content = extract_text(&page.body);

        let emails = self.extract_emails(&text_content);
        let phones = self.extract_phones(&text_content);
        let socials = extract_social_links(&page.body);

        let text_lower = text_content.to_lowercase();
        let has_booking_signal = BOOKING_PHRASES
            .iter()
            .any(|phrase| text_lower.contains(phrase));

        let quality_score = quality::score(url, Some(page));
        debug!(
            "Analyzed {}: {} emails, {} phones, score {}",
            url,
            emails.len(),
            phones.len(),
            quality_score
        );

        let mut notes = String::new();
        if !has_booking_signal {
            notes.push_str("No booking system detected. ");
        }

        WebsiteFindings {
            source_url: url.to_string(),
            emails,
            phones,
            socials,
            quality_score,
            has_booking_signal,
            notes,
        }
    }

    // Case-preserving, deduplicated, in discovery order.
    fn extract_emails(&self, text: &str) -> Vec<String> {
        let mut emails = Vec::new();
        for m in self.email_regex.find_iter(text) {
            let email = m.as_str().to_string();
            if !emails.contains(&email) {
                emails.push(email);
            }
        }
        emails
    }

    fn extract_phones(&self, text: &str) -> Vec<String> {
        let mut phones = Vec::new();
        for m in self.phone_regex.find_iter(text) {
            let phone = m.as_str().trim().to_string();
            if !phones.contains(&phone) {
                phones.push(phone);
            }
        }
        phones
    }
}

fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").unwrap();
    document
        .select(&body_selector)
        .next()
        .map(|body| {
            body.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Scans every hyperlink for recognized platform domains. The first match
/// per platform wins; later matches are ignored.
fn extract_social_links(html: &str) -> SocialLinks {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();
    let mut socials = SocialLinks::default();

    for element in document.select(&link_selector) {
        let href = match element.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        let lower = href.to_lowercase();

        let slot = if lower.contains("instagram.com") {
            &mut socials.instagram
        } else if lower.contains("facebook.com") {
            &mut socials.facebook
        } else if lower.contains("linkedin.com") {
            &mut socials.linkedin
        } else if lower.contains("twitter.com") || lower.contains("x.com") {
            &mut socials.twitter
        } else if lower.contains("tiktok.com") {
            &mut socials.tiktok
        } else if lower.contains("youtube.com") {
            &mut socials.youtube
        } else {
            continue;
        };

        if slot.is_empty() {
            *slot = href.to_string();
        }
    }

    socials
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchFailure;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fetch spy: serves one canned response and counts invocations.
    struct SpyFetcher {
        calls: AtomicUsize,
        response: Result<FetchedPage, FetchFailure>,
    }

    impl SpyFetcher {
        fn serving(final_url: &str, body: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Ok(FetchedPage {
                    final_url: final_url.to_string(),
                    status: 200,
                    body: body.to_string(),
                }),
            }
        }

        fn failing(failure: FetchFailure) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Err(failure),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for SpyFetcher {
        async fn fetch(&self, _url: &str) -> Result<FetchedPage, FetchFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(page) => Ok(page.clone()),
                Err(FetchFailure::Transport { url, reason }) => Err(FetchFailure::Transport {
                    url: url.clone(),
                    reason: reason.clone(),
                }),
                Err(FetchFailure::Status { status, url }) => Err(FetchFailure::Status {
                    status: *status,
                    url: url.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn empty_url_short_circuits_without_network() {
        let fetcher = SpyFetcher::serving("https://a.com", "<body></body>");
        let analyzer = WebsiteAnalyzer::new(fetcher);

        let findings = analyzer.analyze("").await;
        assert_eq!(findings.quality_score, 10);
        assert_eq!(findings.notes, "No Website");
        assert!(findings.emails.is_empty());
        assert!(findings.phones.is_empty());
        assert_eq!(analyzer.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_score_10() {
        let fetcher = SpyFetcher::failing(FetchFailure::Status {
            status: 503,
            url: "https://a.com".to_string(),
        });
        let analyzer = WebsiteAnalyzer::new(fetcher);

        let findings = analyzer.analyze("https://a.com").await;
        assert_eq!(findings.quality_score, 10);
        assert!(findings.notes.contains("Scraping Error"));
        assert!(findings.notes.contains("503"));
        assert_eq!(analyzer.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn extracts_contact_signals_from_page_text() {
        let body = r#"<html><head><meta name="viewport" content="w"></head><body>
            Call us at (555) 010-2030 or email Front.Desk@a-dental.com.
            Also Front.Desk@a-dental.com appears twice.
            <a href="https://instagram.com/adental">IG</a>
            <a href="https://instagram.com/adental-second">IG again</a>
            <a href="https://facebook.com/adental">FB</a>
        </body></html>"#;
        let analyzer = WebsiteAnalyzer::new(SpyFetcher::serving("https://a.com", body));

        let findings = analyzer.analyze("https://a.com").await;
        assert_eq!(findings.emails, vec!["Front.Desk@a-dental.com"]);
        assert_eq!(findings.phones, vec!["(555) 010-2030"]);
        // First match per platform wins.
        assert_eq!(findings.socials.instagram, "https://instagram.com/adental");
        assert_eq!(findings.socials.facebook, "https://facebook.com/adental");
        assert_eq!(findings.socials.tiktok, "");
        assert_eq!(findings.quality_score, 5);
    }

    #[tokio::test]
    async fn booking_phrase_sets_signal_and_suppresses_note() {
        let body = r#"<html><head><meta name="viewport" content="w"></head>
            <body>Book Online today!</body></html>"#;
        let analyzer = WebsiteAnalyzer::new(SpyFetcher::serving("https://a.com", body));

        let findings = analyzer.analyze("https://a.com").await;
        assert!(findings.has_booking_signal);
        assert!(!findings.notes.contains("No booking system detected."));
    }

    #[tokio::test]
    async fn missing_booking_phrase_appends_note() {
        let body = r#"<html><head><meta name="viewport" content="w"></head>
            <body>Welcome to our practice.</body></html>"#;
        let analyzer = WebsiteAnalyzer::new(SpyFetcher::serving("https://a.com", body));

        let findings = analyzer.analyze("https://a.com").await;
        assert!(!findings.has_booking_signal);
        assert!(findings.notes.contains("No booking system detected. "));
    }
}
