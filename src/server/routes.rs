pub mod health {
    use rocket::{get, serde::json::Json};
    use serde_json::{json, Value};

    #[get("/health")]
    pub async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "service": "lead-harvester-api"
        }))
    }

    #[get("/")]
    pub async fn index() -> Json<Value> {
        Json(json!({
            "name": "Lead Harvester API",
            "version": "0.1.0",
            "description": "API for running lead harvests and fetching results",
            "endpoints": {
                "health": "/api/health",
                "scrape": "/api/scrape",
                "outputs": "/api/outputs",
                "download": "/api/download/<filename>"
            }
        }))
    }
}
