use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::TimerLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::target::Target;
use crate::ui::messages::success;
use chrono::{DateTime, Utc};

/// Create a paused timer.
pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::Create {
        customer,
        track,
        combo,
        minutes,
    } = cmd
    {
        let target = Target::from_request(*track, *combo)?;

        let mut pool = DbPool::new(&cfg.database)?;
        let timer = TimerLogic::create(&mut pool, cfg, customer, target, *minutes, now)?;

        success(format!(
            "Timer #{} created for {} ({} min, paused).",
            timer.id, timer.customer_name, timer.allocated_minutes
        ));
    }

    Ok(())
}
