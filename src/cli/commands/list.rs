use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projection;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::board::render_list;
use crate::ui::messages::info;
use chrono::{DateTime, Utc};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::List { json } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let views = projection::list(&mut pool, now)?;

        if *json {
            let out = serde_json::to_string_pretty(&views)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        if views.is_empty() {
            info("No timers.");
            return Ok(());
        }

        print!("{}", render_list(&views));
    }
    Ok(())
}
