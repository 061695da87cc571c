use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::directory::feed::{DirectoryFeed, EntryHandle};
use crate::directory::fields::{self, resolve_field};
use crate::errors::FeedError;
use crate::models::RawListing;

/// Incremental, deduplicating extraction of directory entries for one query.
///
/// The per-entry identifier set is local to one call; it is not the
/// cross-query identity key (that is the listing name, handled upstream).
pub struct ListingExtractor {
    max_empty_passes: usize,
}

impl ListingExtractor {
    pub fn new(max_empty_passes: usize) -> Self {
        Self { max_empty_passes }
    }

    /// Collects up to `limit` listings. A missing search surface yields zero
    /// listings, not an error; only a session failure propagates.
    pub async fn extract_listings<F: DirectoryFeed>(
        &self,
        feed: &mut F,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawListing>, FeedError> {
        match feed.open_search(query).await {
            Ok(()) => {}
            Err(FeedError::SurfaceNotFound { .. }) => {
                warn!("Search surface not found for \"{}\"; emitting no listings", query);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        }

        let mut listings: Vec<RawListing> = Vec::new();
        let mut processed: HashSet<String> = HashSet::new();
        let mut empty_passes = 0;

        while listings.len() < limit {
            let entries = match feed.list_visible_entries().await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Failed to read visible entries: {}", e);
                    Vec::new()
                }
            };

            let new_entries: Vec<EntryHandle> = entries
                .into_iter()
                .filter(|entry| !processed.contains(&entry.id))
                .collect();

            if new_entries.is_empty() {
                empty_passes += 1;
                if empty_passes >= self.max_empty_passes {
                    debug!("Feed exhausted after {} empty passes", empty_passes);
                    break;
                }
                if let Err(e) = feed.trigger_incremental_load().await {
                    warn!("Incremental load failed: {}", e);
                }
                continue;
            }
            empty_passes = 0;

            for entry in new_entries {
                if listings.len() >= limit {
                    break;
                }
                processed.insert(entry.id.clone());

                // Name invariant: no extractable name, no listing.
                if entry.label.trim().is_empty() {
                    continue;
                }

                info!("Processing: {}", entry.label);
                match feed.activate_entry(&entry).await {
                    Ok(view) => {
                        let mut listing = RawListing::named(entry.label.trim());
                        listing.website = resolve_field(feed, &view, &fields::WEBSITE);
                        listing.phone = resolve_field(feed, &view, &fields::PHONE);
                        listing.address = resolve_field(feed, &view, &fields::ADDRESS);
                        listing.rating = resolve_field(feed, &view, &fields::RATING);
                        listing.review_count = resolve_field(feed, &view, &fields::REVIEWS);
                        listing.category = resolve_field(feed, &view, &fields::CATEGORY);
                        listings.push(listing);
                    }
                    Err(e) => {
                        warn!("Skipping entry: {}", e);
                    }
                }
            }

            if listings.len() < limit {
                if let Err(e) = feed.trigger_incremental_load().await {
                    warn!("Incremental load failed: {}", e);
                }
            }
        }

        info!("Collected {} listings for \"{}\"", listings.len(), query);
        Ok(listings)
    }
}
