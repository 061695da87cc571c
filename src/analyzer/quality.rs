//! Website quality score: 10 = unreachable or no website, 8 = outdated,
//! 5 = average, 0 = modern high-quality site (skip outreach).
//!
//! The checks form an ordered chain and each verdict is terminal; a later
//! check never overrides an earlier one.

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::analyzer::fetcher::FetchedPage;

const MODERN_TECH_SIGNATURES: &[&str] = &[
    "react",
    "next.js",
    "gatsby",
    "vue",
    "nuxt",
    "tailwind",
    "bootstrap",
    "wix",
    "squarespace",
    "webflow",
    "shopify",
];

const COPYRIGHT_CUTOFF_YEAR: u32 = 2020;

pub fn score(url: &str, page: Option<&FetchedPage>) -> u8 {
    let page = match page {
        Some(page) if !url.is_empty() && (200..300).contains(&(page.status as u32)) => page,
        _ => return 10,
    };

    if !page.final_url.starts_with("https") {
        return 8;
    }

    let document = Html::parse_document(&page.body);
    let viewport = Selector::parse(r#"meta[name="viewport"]"#).unwrap();
    if document.select(&viewport).next().is_none() {
        return 8;
    }

    let html_lower = page.body.to_lowercase();
    if MODERN_TECH_SIGNATURES
        .iter()
        .any(|sig| html_lower.contains(sig))
    {
        return 0;
    }

    if let Some(year) = max_copyright_year(&html_lower) {
        debug!("Latest copyright year on {}: {}", page.final_url, year);
        if year < COPYRIGHT_CUTOFF_YEAR {
            return 8;
        }
    }

    5
}

/// Finds "copyright 20XX" / "© 20XX" markers and returns the largest year,
/// or `None` when no marker parses (that check is then skipped).
fn max_copyright_year(html_lower: &str) -> Option<u32> {
    let marker = Regex::new(r"(?:copyright|©)\s*(20\d{2})").unwrap();
    marker
        .captures_iter(html_lower)
        .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
        .max()
}
