use tracing::{error, info};

use crate::analyzer::{HttpFetcher, WebsiteAnalyzer};
use crate::config::Config;
use crate::directory::MapsSession;
use crate::lead_export::LeadExporter;
use crate::models::{Result, RunReport};
use crate::pipeline::engine::EnrichmentEngine;
use crate::pipeline::filter::filter_leads;

/// One full harvest: fresh navigation session, pipeline run, filtering and
/// export. Shared by the CLI and the HTTP control surface.
pub async fn run_harvest(
    config: &Config,
    city: &str,
    query_override: Option<String>,
    max_leads: Option<usize>,
) -> Result<RunReport> {
    let queries = match query_override {
        Some(query) => vec![query],
        None => config.search.query_templates.clone(),
    };
    let per_query_limit = max_leads.unwrap_or(config.scraping.max_leads_per_query);

    let session = MapsSession::new(config);
    let fetcher = HttpFetcher::new(config.scraping.fetch_timeout_seconds);
    let mut engine = EnrichmentEngine::new(
        session,
        WebsiteAnalyzer::new(fetcher),
        config.scraping.max_empty_passes,
    );

    let run = match engine.run(city, &queries, per_query_limit).await {
        Ok(run) => run,
        Err(e) => {
            if e.is_fatal() {
                error!("Navigation session failed, aborting run: {}", e);
            }
            return Err(e.into());
        }
    };

    info!("Filtering {} leads...", run.leads.len());
    let final_leads = filter_leads(
        run.leads,
        &config.filtering.skip_keywords,
        config.filtering.min_quality_score,
    );

    if final_leads.is_empty() {
        return Ok(RunReport {
            run_id: run.run_id,
            city: city.to_string(),
            total_leads: 0,
            csv_file: None,
            json_file: None,
            success: false,
            message: "No leads found matching criteria.".to_string(),
        });
    }

    let exporter = LeadExporter::new(&config.output);
    let paths = exporter.export(&final_leads, city).await?;

    Ok(RunReport {
        run_id: run.run_id,
        city: city.to_string(),
        total_leads: final_leads.len(),
        csv_file: Some(paths.csv_file),
        json_file: Some(paths.json_file),
        success: true,
        message: format!("Successfully scraped {} leads.", final_leads.len()),
    })
}
