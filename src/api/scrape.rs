use rocket::{post, serde::json::Json, State};
use serde::Deserialize;
use tracing::error;

use crate::api::ApiResponse;
use crate::models::RunReport;
use crate::pipeline::run_harvest;
use crate::server::ServerState;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub city: String,
    pub query: Option<String>,
    pub max_leads: Option<usize>,
}

// Blocking by design: the whole pipeline occupies this request until the
// run completes.
#[post("/scrape", data = "<request>")]
pub async fn start_scrape(
    state: &State<ServerState>,
    request: Json<ScrapeRequest>,
) -> Json<ApiResponse<RunReport>> {
    if request.city.trim().is_empty() {
        return Json(ApiResponse::error("City is required".to_string()));
    }

    match run_harvest(
        &state.config,
        request.city.trim(),
        request.query.clone(),
        request.max_leads,
    )
    .await
    {
        Ok(report) => Json(ApiResponse::success(report)),
        Err(e) => {
            error!("Scraping error: {}", e);
            Json(ApiResponse::error(e.to_string()))
        }
    }
}
