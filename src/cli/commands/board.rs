use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projection;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::board::render_board;
use chrono::{DateTime, Utc};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::Board { json } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let views = projection::list(&mut pool, now)?;
        let board = projection::group(&views, &cfg.lane_order);

        if *json {
            let out = serde_json::to_string_pretty(&board)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print!("{}", render_board(&board, false));
        }
    }
    Ok(())
}
