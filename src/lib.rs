//! racetimer library root.
//! Exposes the CLI parser, the high-level run() function and the timer engine.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::{DateTime, Utc};
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let now_override: Option<DateTime<Utc>> =
        cli.now.as_deref().map(crate::core::clock::parse_instant).transpose()?;
    let now = now_override.unwrap_or_else(crate::core::clock::now);

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Track { .. } => cli::commands::track::handle(&cli.command, cfg),
        Commands::Create { .. } => cli::commands::create::handle(&cli.command, cfg, now),
        Commands::Start { .. }
        | Commands::Pause { .. }
        | Commands::Reset { .. }
        | Commands::AddTime { .. }
        | Commands::Update { .. } => cli::commands::control::handle(&cli.command, cfg, now),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg, now),
        Commands::Board { .. } => cli::commands::board::handle(&cli.command, cfg, now),
        Commands::Watch { .. } => cli::commands::watch::handle(&cli.command, cfg, now_override),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
