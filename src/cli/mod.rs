pub mod cli;
pub mod run;
pub mod run_harvest;
pub mod run_server;
pub mod show_outputs;
