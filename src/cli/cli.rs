use crate::config::Config;
use crate::models::{CliApp, Result};

#[derive(Debug, Clone)]
pub enum MenuAction {
    HarvestLeads,
    StartApiServer,
    ShowOutputs,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::HarvestLeads => {
                write!(f, "🦷 Harvest leads for a city")
            }
            MenuAction::StartApiServer => {
                write!(f, "🌐 Start the API server")
            }
            MenuAction::ShowOutputs => write!(f, "📂 Show generated output files"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self { config })
    }
}
