//! rubrohours library root.
//! Exposes the CLI parser, a high-level run() function, and the data
//! layer (store, repositories, audit log) used by the commands.

pub mod audit;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod repo;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::Principal;
use std::path::Path;

/// Central command dispatcher.
pub fn dispatch(cli: &Cli, cfg: &Config, who: &Principal) -> AppResult<()> {
    match &cli.command {
        Commands::Init { demo } => cli::commands::init::handle(cfg, who, *demo, cli.test),
        Commands::Worker { action } => cli::commands::worker::handle(action, cfg, who),
        Commands::Rubro { action } => cli::commands::rubro::handle(action, cfg, who),
        Commands::Hours { action } => cli::commands::hours::handle(action, cfg, who),
        Commands::Sweep { purge, yes } => cli::commands::sweep::handle(cfg, who, *purge, *yes),
        Commands::History { limit } => cli::commands::history::handle(cfg, *limit),
    }
}

/// Entry point used by main.rs.
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    // Command-line overrides win over the config file. A custom data dir
    // also relocates the sqlite file, so tests stay fully isolated.
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = dir.clone();
        cfg.sqlite_file = Path::new(dir)
            .join("rubrohours.sqlite")
            .to_string_lossy()
            .to_string();
    }
    if let Some(backend) = &cli.backend {
        cfg.backend = backend.parse()?;
    }

    let who = Principal::admin(cli.user.clone());
    dispatch(&cli, &cfg, &who)
}
