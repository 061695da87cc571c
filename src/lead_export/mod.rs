pub mod exporter;
pub mod store;

pub use exporter::{ExportPaths, LeadExporter};
pub use store::LeadStore;
