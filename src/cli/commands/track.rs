//! `track` command: lane catalog maintenance by venue staff.
//!
//! Kept apart from the timer commands; timers only ever read the catalog.

use crate::cli::parser::{Commands, TrackCommand};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::tracks::{insert_track, load_tracks, set_track_active};
use crate::errors::{AppError, AppResult};
use crate::models::track::TrackKind;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Track { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TrackCommand::List { all } => {
            let tracks = load_tracks(&pool.conn, *all)?;
            if tracks.is_empty() {
                info("No tracks in the catalog.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID"),
                Column::new("Name"),
                Column::new("Kind"),
                Column::new("Active"),
            ]);
            for t in tracks {
                table.add_row(vec![
                    t.id.to_string(),
                    t.name,
                    t.kind.to_db_str().to_string(),
                    if t.active {
                        "yes".to_string()
                    } else {
                        format!("{GREY}no{RESET}")
                    },
                ]);
            }
            print!("{}", table.render());
        }

        TrackCommand::Add { name, kind } => {
            if name.trim().is_empty() {
                return Err(AppError::validation("name", "must not be empty"));
            }
            let kind = TrackKind::from_code(kind)?;
            let id = insert_track(&pool.conn, name.trim(), kind)?;
            ttlog(
                &pool.conn,
                "track",
                &format!("track #{id}"),
                &format!("Added {} ({})", name.trim(), kind.to_db_str()),
            )?;
            success(format!("Track #{} '{}' added.", id, name.trim()));
        }

        TrackCommand::Disable { id } | TrackCommand::Enable { id } => {
            let active = matches!(action, TrackCommand::Enable { .. });
            set_track_active(&pool.conn, *id, active)?;
            let verb = if active { "enabled" } else { "disabled" };
            ttlog(&pool.conn, "track", &format!("track #{id}"), &format!("Track {verb}"))?;
            success(format!("Track #{} {}.", id, verb));
        }
    }

    Ok(())
}
