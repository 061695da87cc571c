pub mod extractor;
pub mod feed;
pub mod fields;
pub mod maps_session;

pub use extractor::ListingExtractor;
pub use feed::{DetailView, DirectoryFeed, EntryHandle};
pub use maps_session::MapsSession;
