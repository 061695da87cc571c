use dialoguer::{theme::ColorfulTheme, Select};

use crate::cli::cli::MenuAction;
use crate::models::{CliApp, Result};
use tracing::error;

impl CliApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🦷 Welcome to Lead Harvester!");
        println!("═══════════════════════════════════════");

        loop {
            let actions = vec![
                MenuAction::HarvestLeads,
                MenuAction::StartApiServer,
                MenuAction::ShowOutputs,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::HarvestLeads => {
                    if let Err(e) = self.run_harvest().await {
                        error!("Harvest failed: {}", e);
                    }
                }
                MenuAction::StartApiServer => {
                    if let Err(e) = self.run_server().await {
                        error!("API server failed: {}", e);
                    }
                }
                MenuAction::ShowOutputs => {
                    if let Err(e) = self.show_outputs().await {
                        error!("Failed to show outputs: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using Lead Harvester!");
                    break;
                }
            }
        }

        Ok(())
    }
}
