use dialoguer::{theme::ColorfulTheme, Input};

use crate::models::{CliApp, Result};
use crate::pipeline::run_harvest;

impl CliApp {
    pub async fn run_harvest(&self) -> Result<()> {
        println!("\n🦷 Lead Harvest");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let city: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Target city")
            .interact_text()?;

        if city.trim().is_empty() {
            println!("❌ City is required");
            return Ok(());
        }

        let query: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Query override (empty for configured templates)")
            .allow_empty(true)
            .interact_text()?;
        let query_override = if query.trim().is_empty() {
            None
        } else {
            Some(query.trim().to_string())
        };

        let max_leads: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Max leads per query")
            .default(self.config.scraping.max_leads_per_query)
            .interact_text()?;

        println!("\n🚀 Starting harvest for {}...", city.trim());

        let report = run_harvest(&self.config, city.trim(), query_override, Some(max_leads)).await?;

        println!("\n🎉 Harvest Summary");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("🆔 Run: {}", report.run_id);
        println!("📊 Leads saved: {}", report.total_leads);
        if let Some(csv) = &report.csv_file {
            println!("📄 CSV: {}/{}", self.config.output.directory, csv);
        }
        if let Some(json) = &report.json_file {
            println!("📄 JSON: {}/{}", self.config.output.directory, json);
        }
        println!("💬 {}", report.message);

        Ok(())
    }
}
