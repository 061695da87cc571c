use tracing::info;

use crate::models::Lead;

/// Drops leads whose name contains a skip keyword (case-insensitive, first
/// match wins) and, for the rest, leads scoring below `min_quality_score`.
/// Survivors keep their input order. No I/O here.
pub fn filter_leads(leads: Vec<Lead>, skip_keywords: &[String], min_quality_score: u8) -> Vec<Lead> {
    let keywords_lower: Vec<String> = skip_keywords.iter().map(|k| k.to_lowercase()).collect();

    leads
        .into_iter()
        .filter(|lead| {
            let name_lower = lead.business_name.to_lowercase();
            if let Some(keyword) = keywords_lower.iter().find(|k| name_lower.contains(*k)) {
                info!("Skipping (Keyword match \"{}\"): {}", keyword, lead.business_name);
                return false;
            }
            if lead.quality_score < min_quality_score {
                info!(
                    "Skipping (Low Quality Score {}): {}",
                    lead.quality_score, lead.business_name
                );
                return false;
            }
            true
        })
        .collect()
}
