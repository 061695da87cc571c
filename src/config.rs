use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub filtering: FilteringConfig,
    pub scraping: ScrapingConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub language: String,
    pub query_templates: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilteringConfig {
    pub skip_keywords: Vec<String>,
    pub min_quality_score: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapingConfig {
    pub max_leads_per_query: usize,
    pub max_empty_passes: usize,
    pub pagination_step: usize,
    pub session_timeout_seconds: u64,
    pub fetch_timeout_seconds: u64,
    pub action_delay_min_ms: u64,
    pub action_delay_max_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                base_url: "https://www.google.com/maps/search/".to_string(),
                language: "en".to_string(),
                query_templates: vec![
                    "Dentist near {city}".to_string(),
                    "Dental clinic near {city}".to_string(),
                    "Cosmetic dentist near {city}".to_string(),
                ],
            },
            filtering: FilteringConfig {
                skip_keywords: vec![
                    "Aspen Dental".to_string(),
                    "Smile Brands".to_string(),
                    "Pacific Dental Services".to_string(),
                    "Heartland Dental".to_string(),
                    "Western Dental".to_string(),
                    "Affordable Dentures & Implants".to_string(),
                    "Great Expressions".to_string(),
                    "Dental Care Alliance".to_string(),
                    "Smile medical".to_string(),
                ],
                min_quality_score: 8,
            },
            scraping: ScrapingConfig {
                max_leads_per_query: 100,
                max_empty_passes: 3,
                pagination_step: 20,
                session_timeout_seconds: 20,
                fetch_timeout_seconds: 15,
                action_delay_min_ms: 2000,
                action_delay_max_ms: 5000,
            },
            output: OutputConfig {
                directory: "output".to_string(),
                pretty_json: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
