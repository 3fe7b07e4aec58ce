//! start / pause / reset / add-time / update

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::lifecycle::Action;
use crate::core::remaining::display_remaining;
use crate::core::timer::TimerLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::format_clock;
use chrono::{DateTime, Utc};

fn resolve_action(cmd: &Commands) -> AppResult<Option<(i64, Action)>> {
    let resolved = match cmd {
        Commands::Start { id } => Some((*id, Action::Start)),
        Commands::Pause { id } => Some((*id, Action::Pause)),
        Commands::Reset { id } => Some((*id, Action::Reset)),
        Commands::AddTime { id, minutes } => Some((*id, Action::AddTime(*minutes))),
        Commands::Update {
            id,
            action,
            minutes,
        } => Some((*id, Action::from_request(action, *minutes)?)),
        _ => None,
    };
    Ok(resolved)
}

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    let Some((id, action)) = resolve_action(cmd)? else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let timer = TimerLogic::update(&mut pool, id, action, now)?;

    success(format!(
        "Timer #{} ({}): {} · {} remaining",
        timer.id,
        timer.customer_name,
        timer.status.to_db_str(),
        format_clock(display_remaining(&timer, now))
    ));

    Ok(())
}
