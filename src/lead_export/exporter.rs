use chrono::Utc;
use tracing::info;

use crate::config::OutputConfig;
use crate::lead_export::store::LeadStore;
use crate::models::{Lead, Result};

#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub csv_file: String,
    pub json_file: String,
}

/// Writes the surviving lead set at the end of a run: CSV rows, a JSON
/// mirror of the full records and an appended run summary.
pub struct LeadExporter {
    store: LeadStore,
    directory: String,
    pretty_json: bool,
}

impl LeadExporter {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            store: LeadStore::new(&output.directory),
            directory: output.directory.clone(),
            pretty_json: output.pretty_json,
        }
    }

    pub async fn export(&self, leads: &[Lead], city: &str) -> Result<ExportPaths> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let stem = format!("leads_{}_{}", city.replace(' ', "_"), timestamp);

        let csv_file = format!("{}.csv", stem);
        self.store.append(leads, &csv_file).await?;

        let json_file = format!("{}.json", stem);
        let json_data = if self.pretty_json {
            serde_json::to_string_pretty(leads)?
        } else {
            serde_json::to_string(leads)?
        };
        tokio::fs::write(format!("{}/{}", self.directory, json_file), json_data).await?;

        self.append_summary(leads).await?;

        info!("Exported {} leads as {} / {}", leads.len(), csv_file, json_file);
        Ok(ExportPaths { csv_file, json_file })
    }

    async fn append_summary(&self, leads: &[Lead]) -> Result<()> {
        let high_quality = leads.iter().filter(|l| l.quality_score >= 8).count();
        let summary = format!(
            "--- Scraping Summary ---\n\
             Total Leads Scraped: {}\n\
             High Quality Leads (Score >= 8): {}\n\
             Timestamp: {}\n\n",
            leads.len(),
            high_quality,
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        );

        let path = format!("{}/summary.txt", self.directory);
        let existing = tokio::fs::read_to_string(&path).await.unwrap_or_default();
        tokio::fs::write(&path, existing + &summary).await?;
        Ok(())
    }
}
