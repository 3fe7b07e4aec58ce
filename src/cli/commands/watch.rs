use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock;
use crate::core::display::DisplayBoard;
use crate::core::projection;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::board::render_board;
use crate::ui::messages::{alert, warning};
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Polling display board.
///
/// Each cycle opens the store, projects every timer at the current instant
/// and renders the grouped view. A failed poll keeps the last known board
/// on screen and is retried on the next cycle.
pub fn handle(cmd: &Commands, cfg: &Config, now_override: Option<DateTime<Utc>>) -> AppResult<()> {
    let Commands::Watch {
        polls,
        interval_ms,
        no_bell,
    } = cmd
    else {
        return Ok(());
    };

    let interval = Duration::from_millis(interval_ms.unwrap_or(cfg.poll_interval_ms));
    let bell = cfg.alert_bell && !*no_bell;
    let interactive = polls.is_none();

    let mut board = DisplayBoard::new();
    let mut done: u64 = 0;

    loop {
        let now = now_override.unwrap_or_else(clock::now);

        let result =
            DbPool::new(&cfg.database).and_then(|mut pool| projection::list(&mut pool, now));
        if let Err(e) = &result {
            warning(format!("Poll failed, keeping last known times: {}", e));
        }

        let outcome = board.apply_poll(result);
        let grouped = projection::group(outcome.views, &cfg.lane_order);

        if interactive {
            print!("{CLEAR_SCREEN}");
        }
        println!("⏱  {}", now.with_timezone(&chrono::Local).format("%H:%M:%S"));
        print!("{}", render_board(&grouped, outcome.stale));

        for id in &outcome.alerts {
            let name = outcome
                .views
                .iter()
                .find(|v| v.id == *id)
                .map(|v| v.customer_name.as_str())
                .unwrap_or("?");
            alert(format!("Time's up: timer #{} ({})", id, name), bell);
        }
        let _ = io::stdout().flush();

        done += 1;
        if polls.is_some_and(|n| done >= n) {
            break;
        }
        thread::sleep(interval);
    }

    Ok(())
}
