use crate::models::{CliApp, Result};

impl CliApp {
    pub async fn show_outputs(&self) -> Result<()> {
        println!("\n📂 Output Files ({})", self.config.output.directory);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let mut entries = match tokio::fs::read_dir(&self.config.output.directory).await {
            Ok(entries) => entries,
            Err(_) => {
                println!("❌ No output directory yet; run a harvest first");
                return Ok(());
            }
        };

        let mut count = 0;
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            count += 1;
            println!(
                "  📄 {} ({} bytes)",
                entry.file_name().to_string_lossy(),
                meta.len()
            );
        }

        if count == 0 {
            println!("  (empty)");
        }

        Ok(())
    }
}
