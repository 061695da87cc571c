use async_trait::async_trait;

use crate::directory::fields::FieldStrategy;
use crate::errors::FeedError;

/// One rendered result entry. `id` is stable for the lifetime of a single
/// extraction call only; `label` is the aria-style display label.
#[derive(Debug, Clone)]
pub struct EntryHandle {
    pub id: String,
    pub label: String,
}

/// Detail view of one activated entry, ready for field reads.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub url: String,
    pub body: String,
}

/// The stateful navigation session over a maps-style search surface.
/// Every call is fallible; only `open_search` failures can be fatal.
#[async_trait]
pub trait DirectoryFeed: Send {
    async fn open_search(&mut self, query: &str) -> Result<(), FeedError>;

    async fn list_visible_entries(&mut self) -> Result<Vec<EntryHandle>, FeedError>;

    async fn activate_entry(&mut self, entry: &EntryHandle) -> Result<DetailView, FeedError>;

    async fn trigger_incremental_load(&mut self) -> Result<(), FeedError>;

    /// Reads one value out of a detail view. Returns `None` when the
    /// strategy's selector matches nothing or yields an empty value.
    fn read_field(&self, view: &DetailView, strategy: &FieldStrategy) -> Option<String>;
}
