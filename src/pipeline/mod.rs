pub mod engine;
pub mod filter;
pub mod merge;
pub mod runner;

pub use engine::{EnrichmentEngine, PipelineRun};
pub use filter::filter_leads;
pub use merge::merge;
pub use runner::run_harvest;
