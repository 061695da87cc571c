use rocket::{routes, Build, Rocket};

use crate::api::{download_output, list_outputs, start_scrape};
use crate::config::Config;

pub mod routes;

pub struct ServerState {
    pub config: Config,
}

pub fn build_rocket(config: Config) -> Rocket<Build> {
    let state = ServerState { config };

    rocket::build().manage(state).mount(
        "/api",
        routes![
            routes::health::health_check,
            routes::health::index,
            start_scrape,
            list_outputs,
            download_output,
        ],
    )
}
