use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::models::{Lead, Result};

// Fixed column layout; City and State have no Lead counterpart and are
// written empty.
const HEADERS: &[&str] = &[
    "Business Name",
    "Website",
    "Phone",
    "Email",
    "Instagram",
    "Facebook",
    "LinkedIn",
    "WhatsApp",
    "City",
    "State",
    "Rating",
    "Reviews",
    "Quality Score",
    "Notes",
];

/// Flat append-only CSV record store. The header is written exactly once
/// per target file.
pub struct LeadStore {
    directory: PathBuf,
}

impl LeadStore {
    pub fn new(directory: &str) -> Self {
        Self {
            directory: PathBuf::from(directory),
        }
    }

    pub async fn append(&self, leads: &[Lead], filename: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(filename);

        let mut content = String::new();
        if !has_header(&path).await {
            content.push_str(&csv_row(HEADERS.iter().map(|h| h.to_string())));
        }
        for lead in leads {
            content.push_str(&csv_row(row_values(lead).into_iter()));
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        info!("Saved {} leads to {}", leads.len(), path.display());
        Ok(path)
    }
}

async fn has_header(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) => meta.len() > 0,
        Err(_) => false,
    }
}

fn row_values(lead: &Lead) -> Vec<String> {
    vec![
        lead.business_name.clone(),
        lead.website.clone(),
        lead.phone.clone(),
        lead.email.clone(),
        lead.instagram.clone(),
        lead.facebook.clone(),
        lead.linkedin.clone(),
        lead.whatsapp.clone(),
        String::new(),
        String::new(),
        lead.rating.clone(),
        lead.reviews.clone(),
        lead.quality_score.to_string(),
        lead.notes.clone(),
    ]
}

fn csv_row(values: impl Iterator<Item = String>) -> String {
    let quoted: Vec<String> = values
        .map(|v| format!("\"{}\"", v.replace('"', "\"\"")))
        .collect();
    format!("{}\n", quoted.join(","))
}
