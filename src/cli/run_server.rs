use crate::models::{CliApp, Result};
use crate::server::build_rocket;

impl CliApp {
    pub async fn run_server(&self) -> Result<()> {
        println!("\n🌐 Starting API server on http://localhost:8000/api");
        println!("   Press Ctrl+C to stop");

        let _rocket = build_rocket(self.config.clone()).launch().await?;
        Ok(())
    }
}
