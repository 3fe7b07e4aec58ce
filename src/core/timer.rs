use crate::config::Config;
use crate::core::clock;
use crate::core::lifecycle::{self, Action, Transition};
use crate::core::remaining::display_remaining;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_timer, insert_timer, load_timer, update_timer_cas};
use crate::db::tracks::load_track;
use crate::errors::{AppError, AppResult};
use crate::models::target::Target;
use crate::models::timer::Timer;
use chrono::{DateTime, Utc};
use rusqlite::TransactionBehavior;

/// Version mismatches tolerated before giving up on a mutation.
const MAX_CAS_ATTEMPTS: usize = 3;

/// High-level business logic for timer mutations.
pub struct TimerLogic;

impl TimerLogic {
    pub fn create(
        pool: &mut DbPool,
        cfg: &Config,
        customer_name: &str,
        target: Target,
        allocated_minutes: u32,
        now: DateTime<Utc>,
    ) -> AppResult<Timer> {
        let now = clock::instant(now);

        if customer_name.trim().is_empty() {
            return Err(AppError::validation("customer_name", "must not be empty"));
        }

        if !cfg.is_offered_package(allocated_minutes) {
            let offered: Vec<String> = cfg
                .session_packages
                .iter()
                .map(|m| m.to_string())
                .collect();
            return Err(AppError::validation(
                "allocated_minutes",
                format!(
                    "{} is not an offered package (choose one of {})",
                    allocated_minutes,
                    offered.join(", ")
                ),
            ));
        }

        pool.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            if let Target::Lane(track_id) = target {
                match load_track(&tx, track_id)? {
                    None => {
                        return Err(AppError::validation(
                            "track_id",
                            format!("track #{track_id} does not exist"),
                        ));
                    }
                    Some(t) if !t.active => {
                        return Err(AppError::validation(
                            "track_id",
                            format!("track '{}' is not active", t.name),
                        ));
                    }
                    Some(_) => {}
                }
            }

            let mut timer = Timer::new(customer_name, target, allocated_minutes, now);
            timer.id = insert_timer(&tx, &timer)?;

            let placement = match target {
                Target::Lane(id) => format!("track #{id}"),
                Target::Combo => "combo".to_string(),
            };
            ttlog(
                &tx,
                "create",
                &format!("timer #{}", timer.id),
                &format!(
                    "{} · {} min · {}",
                    timer.customer_name, allocated_minutes, placement
                ),
            )?;

            tx.commit()?;
            Ok(timer)
        })
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<Timer> {
        load_timer(&pool.conn, id)?.ok_or(AppError::NotFound(id))
    }

    pub fn start(pool: &mut DbPool, id: i64, now: DateTime<Utc>) -> AppResult<Timer> {
        Self::update(pool, id, Action::Start, now)
    }

    pub fn pause(pool: &mut DbPool, id: i64, now: DateTime<Utc>) -> AppResult<Timer> {
        Self::update(pool, id, Action::Pause, now)
    }

    pub fn reset(pool: &mut DbPool, id: i64, now: DateTime<Utc>) -> AppResult<Timer> {
        Self::update(pool, id, Action::Reset, now)
    }

    pub fn add_time(
        pool: &mut DbPool,
        id: i64,
        minutes: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Timer> {
        Self::update(pool, id, Action::AddTime(minutes), now)
    }

    /// Apply one lifecycle action atomically.
    ///
    /// The read and the compare-and-set write share one IMMEDIATE transaction,
    /// so concurrent operators on the same timer are serialized; a version
    /// mismatch is re-read and re-evaluated against the fresh state.
    pub fn update(
        pool: &mut DbPool,
        id: i64,
        action: Action,
        now: DateTime<Utc>,
    ) -> AppResult<Timer> {
        let now = clock::instant(now);

        pool.with_conn(|conn| {
            for _ in 0..MAX_CAS_ATTEMPTS {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

                let current = load_timer(&tx, id)?.ok_or(AppError::NotFound(id))?;

                let next = match lifecycle::apply(&current, action, now)? {
                    Transition::Unchanged => return Ok(current),
                    Transition::Changed(next) => next,
                };

                if !update_timer_cas(&tx, &next, current.version)? {
                    continue;
                }

                ttlog(
                    &tx,
                    action.name(),
                    &format!("timer #{id}"),
                    &format!(
                        "{}: {} → {}s remaining",
                        action,
                        current.status.to_db_str(),
                        display_remaining(&next, now)
                    ),
                )?;

                tx.commit()?;

                return Ok(Timer {
                    version: current.version + 1,
                    ..next
                });
            }

            Err(AppError::StateConflict(format!(
                "timer #{id} kept changing underneath '{action}', refresh and retry"
            )))
        })
    }

    /// Permanently remove a timer. Returns the deleted record.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Timer> {
        pool.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let timer = load_timer(&tx, id)?.ok_or(AppError::NotFound(id))?;
            if delete_timer(&tx, id)? == 0 {
                return Err(AppError::NotFound(id));
            }

            ttlog(
                &tx,
                "del",
                &format!("timer #{id}"),
                &format!("Deleted timer for {}", timer.customer_name),
            )?;

            tx.commit()?;
            Ok(timer)
        })
    }
}
