pub mod fetcher;
pub mod quality;
pub mod website;

pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use website::WebsiteAnalyzer;
