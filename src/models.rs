use serde::{Deserialize, Serialize};

use crate::config::Config;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One directory-feed entry before enrichment. `name` is always non-empty;
/// every other field defaults to empty string when it could not be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListing {
    pub name: String,
    pub rating: String,
    pub review_count: String,
    pub address: String,
    pub website: String,
    pub phone: String,
    pub category: String,
}

impl RawListing {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rating: String::new(),
            review_count: String::new(),
            address: String::new(),
            website: String::new(),
            phone: String::new(),
            category: String::new(),
        }
    }
}

/// Recognized social platforms. Unmatched platforms stay empty, never omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub instagram: String,
    pub facebook: String,
    pub linkedin: String,
    pub twitter: String,
    pub tiktok: String,
    pub youtube: String,
}

/// Output of analyzing one website. Constructed fresh per analysis call and
/// never mutated after return; a failed analysis yields score 10 plus a note
/// instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteFindings {
    pub source_url: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub socials: SocialLinks,
    pub quality_score: u8,
    pub has_booking_signal: bool,
    pub notes: String,
}

impl WebsiteFindings {
    pub fn unreachable(url: &str, notes: String) -> Self {
        Self {
            source_url: url.to_string(),
            emails: Vec::new(),
            phones: Vec::new(),
            socials: SocialLinks::default(),
            quality_score: 10,
            has_booking_signal: false,
            notes,
        }
    }
}

/// The merged, deduplicated unit of output. Exactly one per distinct
/// business name within a run; first occurrence wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub business_name: String,
    pub website: String,
    pub phone: String,
    pub email: String,
    pub instagram: String,
    pub facebook: String,
    pub linkedin: String,
    pub whatsapp: String,
    pub rating: String,
    pub reviews: String,
    pub category: String,
    pub quality_score: u8,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub city: String,
    pub total_leads: usize,
    pub csv_file: Option<String>,
    pub json_file: Option<String>,
    pub success: bool,
    pub message: String,
}

pub struct CliApp {
    pub config: Config,
}
