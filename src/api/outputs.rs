use std::path::Path;

use chrono::{DateTime, Utc};
use rocket::fs::NamedFile;
use rocket::{get, serde::json::Json, State};
use serde::Serialize;

use crate::api::ApiResponse;
use crate::server::ServerState;

#[derive(Serialize)]
pub struct OutputFile {
    pub name: String,
    pub size_bytes: u64,
    pub modified: Option<String>,
}

#[get("/outputs")]
pub async fn list_outputs(state: &State<ServerState>) -> Json<ApiResponse<Vec<OutputFile>>> {
    let directory = state.config.output.directory.clone();

    let mut entries = match tokio::fs::read_dir(&directory).await {
        Ok(entries) => entries,
        Err(e) => return Json(ApiResponse::error(e.to_string())),
    };

    let mut files = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let meta = match entry.metadata().await {
            Ok(meta) if meta.is_file() => meta,
            _ => continue,
        };
        let modified = meta
            .modified()
            .ok()
            .map(|t| DateTime::<Utc>::from(t).to_rfc3339());
        files.push(OutputFile {
            name: entry.file_name().to_string_lossy().to_string(),
            size_bytes: meta.len(),
            modified,
        });
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    Json(ApiResponse::success(files))
}

#[get("/download/<filename>")]
pub async fn download_output(state: &State<ServerState>, filename: &str) -> Option<NamedFile> {
    // Plain names only, never paths.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return None;
    }

    let path = Path::new(&state.config.output.directory).join(filename);
    NamedFile::open(path).await.ok()
}
