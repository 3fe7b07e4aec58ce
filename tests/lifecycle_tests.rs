use racetimer::core::lifecycle::{self, Action, Transition};
use racetimer::core::projection;
use racetimer::core::remaining::{compute_remaining, display_remaining, is_expired};
use racetimer::core::timer::TimerLogic;
use racetimer::db::pool::DbPool;
use racetimer::db::queries::{load_timer, update_timer_cas};
use racetimer::db::tracks::set_track_active;
use racetimer::errors::AppError;
use racetimer::models::status::TimerStatus;
use racetimer::models::target::Target;

mod common;
use common::{at, cfg, open_store, setup_test_db, t0};

/// Lane id of the seeded "Fast Track"
const FAST_TRACK: i64 = 1;

#[test]
fn test_create_starts_paused_with_full_package() {
    let mut pool = open_store("create_paused");

    let timer = TimerLogic::create(&mut pool, &cfg(), "Alice", Target::Combo, 30, t0()).unwrap();

    assert!(timer.id > 0);
    assert_eq!(timer.status, TimerStatus::Paused);
    assert_eq!(timer.started_at, None);
    assert_eq!(timer.banked_seconds, 1800);
    assert_eq!(timer.created_at, t0());

    let stored = TimerLogic::get(&mut pool, timer.id).unwrap();
    assert_eq!(stored.customer_name, "Alice");
    assert_eq!(stored.target, Target::Combo);
}

#[test]
fn test_create_validation_errors() {
    let mut pool = open_store("create_validation");
    let cfg = cfg();

    let err = TimerLogic::create(&mut pool, &cfg, "   ", Target::Combo, 30, t0()).unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "customer_name"));

    let err = TimerLogic::create(&mut pool, &cfg, "Bob", Target::Combo, 25, t0()).unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "allocated_minutes"));

    let err =
        TimerLogic::create(&mut pool, &cfg, "Bob", Target::Lane(999), 30, t0()).unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "track_id"));

    set_track_active(&pool.conn, FAST_TRACK, false).unwrap();
    let err = TimerLogic::create(&mut pool, &cfg, "Bob", Target::Lane(FAST_TRACK), 30, t0())
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    // nothing half-created
    assert!(projection::list(&mut pool, t0()).unwrap().is_empty());
}

#[test]
fn test_target_requires_exactly_one_of_track_or_combo() {
    assert_eq!(Target::from_request(Some(3), false).unwrap(), Target::Lane(3));
    assert_eq!(Target::from_request(None, true).unwrap(), Target::Combo);
    assert!(matches!(
        Target::from_request(Some(3), true),
        Err(AppError::Validation { .. })
    ));
    assert!(matches!(
        Target::from_request(None, false),
        Err(AppError::Validation { .. })
    ));
}

#[test]
fn test_scenario_pause_extend_and_run_out() {
    let mut pool = open_store("scenario_a");

    let timer = TimerLogic::create(&mut pool, &cfg(), "Carla", Target::Combo, 30, t0()).unwrap();
    let id = timer.id;

    TimerLogic::start(&mut pool, id, at(0)).unwrap();
    let paused = TimerLogic::pause(&mut pool, id, at(600)).unwrap();
    assert_eq!(compute_remaining(&paused, at(600)), 1200);

    let extended = TimerLogic::add_time(&mut pool, id, 5, at(650)).unwrap();
    assert_eq!(compute_remaining(&extended, at(650)), 1500);
    assert_eq!(extended.status, TimerStatus::Paused);

    TimerLogic::start(&mut pool, id, at(700)).unwrap();
    let stored = TimerLogic::get(&mut pool, id).unwrap();
    assert_eq!(display_remaining(&stored, at(700 + 1500)), 0);
    assert_eq!(stored.status, TimerStatus::Running);
    assert!(is_expired(&stored, at(700 + 1500)));

    // still RUNNING well past zero, no auto transition
    let views = projection::list(&mut pool, at(5000)).unwrap();
    assert_eq!(views[0].remaining_seconds, 0);
    assert_eq!(views[0].status, TimerStatus::Running);
    assert!(views[0].expired);
}

#[test]
fn test_start_twice_is_idempotent() {
    let mut pool = open_store("scenario_c");
    let id = TimerLogic::create(&mut pool, &cfg(), "Dan", Target::Lane(FAST_TRACK), 15, t0())
        .unwrap()
        .id;

    let first = TimerLogic::start(&mut pool, id, at(10)).unwrap();
    let second = TimerLogic::start(&mut pool, id, at(40)).unwrap();

    assert_eq!(second.started_at, Some(at(10)));
    assert_eq!(second.banked_seconds, first.banked_seconds);
    assert_eq!(second.version, first.version);
}

#[test]
fn test_pause_on_paused_is_idempotent() {
    let mut pool = open_store("pause_idempotent");
    let id = TimerLogic::create(&mut pool, &cfg(), "Eve", Target::Combo, 15, t0())
        .unwrap()
        .id;

    let before = TimerLogic::get(&mut pool, id).unwrap();
    let after = TimerLogic::pause(&mut pool, id, at(120)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_remaining_is_non_increasing_while_running_and_constant_while_paused() {
    let mut pool = open_store("monotonic");
    let id = TimerLogic::create(&mut pool, &cfg(), "Finn", Target::Combo, 15, t0())
        .unwrap()
        .id;

    let paused = TimerLogic::get(&mut pool, id).unwrap();
    for s in [0, 30, 600, 10_000] {
        assert_eq!(display_remaining(&paused, at(s)), 900);
    }

    let running = TimerLogic::start(&mut pool, id, at(0)).unwrap();
    let mut last = i64::MAX;
    for s in (0..1200).step_by(37) {
        let r = display_remaining(&running, at(s));
        assert!(r <= last, "remaining went up at +{s}s");
        last = r;
    }
}

#[test]
fn test_pause_resume_cycles_neither_gain_nor_lose_time() {
    let mut pool = open_store("round_trip");
    let id = TimerLogic::create(&mut pool, &cfg(), "Gus", Target::Combo, 60, t0())
        .unwrap()
        .id;

    let mut clock = 0;
    let mut banked = 3600;
    for delta in [1, 59, 120, 7, 300] {
        TimerLogic::start(&mut pool, id, at(clock)).unwrap();
        clock += delta;
        let paused = TimerLogic::pause(&mut pool, id, at(clock)).unwrap();
        assert_eq!(paused.banked_seconds, banked - delta);
        banked = paused.banked_seconds;
        // idle gap while paused costs nothing
        clock += 1000;
    }

    assert_eq!(banked, 3600 - (1 + 59 + 120 + 7 + 300));
}

#[test]
fn test_add_time_adds_exactly_in_both_states() {
    let mut pool = open_store("add_time_states");
    let cfg = cfg();

    let paused = TimerLogic::create(&mut pool, &cfg, "Hana", Target::Combo, 15, t0())
        .unwrap()
        .id;
    let running = TimerLogic::create(&mut pool, &cfg, "Ivan", Target::Combo, 15, t0())
        .unwrap()
        .id;
    TimerLogic::start(&mut pool, running, at(0)).unwrap();

    for id in [paused, running] {
        let before = TimerLogic::get(&mut pool, id).unwrap();
        let after = TimerLogic::add_time(&mut pool, id, 10, at(100)).unwrap();
        assert_eq!(
            display_remaining(&after, at(100)),
            display_remaining(&before, at(100)) + 600
        );
        assert_eq!(after.status, before.status);
        assert_eq!(after.started_at, before.started_at);
    }
}

#[test]
fn test_add_time_on_overrun_timer_keeps_start_instant() {
    let mut pool = open_store("add_time_overrun");
    let id = TimerLogic::create(&mut pool, &cfg(), "Jo", Target::Combo, 15, t0())
        .unwrap()
        .id;
    TimerLogic::start(&mut pool, id, at(0)).unwrap();

    // 900s package, 1000s later it is 100s past zero
    let before = TimerLogic::get(&mut pool, id).unwrap();
    assert_eq!(compute_remaining(&before, at(1000)), -100);

    let extended = TimerLogic::add_time(&mut pool, id, 5, at(1000)).unwrap();
    assert_eq!(
        compute_remaining(&extended, at(1000)) - compute_remaining(&before, at(1000)),
        300
    );
    assert_eq!(extended.started_at, Some(at(0)));
    assert_eq!(extended.status, TimerStatus::Running);
    assert_eq!(display_remaining(&extended, at(1000)), 200);

    let stored = TimerLogic::get(&mut pool, id).unwrap();
    assert_eq!(stored.started_at, Some(at(0)));
    assert_eq!(stored.banked_seconds, 900 + 300);
}

#[test]
fn test_add_time_out_of_range_is_rejected() {
    let mut pool = open_store("add_time_overflow");
    let id = TimerLogic::create(&mut pool, &cfg(), "Lev", Target::Combo, 15, t0())
        .unwrap()
        .id;

    for minutes in [i64::MAX / 2, i64::MAX, i64::MAX / 60] {
        let err = TimerLogic::add_time(&mut pool, id, minutes, at(0)).unwrap_err();
        assert!(
            matches!(err, AppError::Validation { ref field, .. } if field == "minutes"),
            "{minutes} minutes should be rejected"
        );
    }

    let stored = TimerLogic::get(&mut pool, id).unwrap();
    assert_eq!(stored.banked_seconds, 900);
    assert_eq!(stored.version, 0);
}

#[test]
fn test_add_time_rejects_zero_and_negative() {
    let mut pool = open_store("add_time_invalid");
    let id = TimerLogic::create(&mut pool, &cfg(), "Kai", Target::Combo, 15, t0())
        .unwrap()
        .id;

    let err = TimerLogic::add_time(&mut pool, id, 0, at(1)).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = TimerLogic::add_time(&mut pool, id, -5, at(1)).unwrap_err();
    assert!(matches!(err, AppError::StateConflict(_)));
    assert!(err.is_retryable());

    assert_eq!(TimerLogic::get(&mut pool, id).unwrap().banked_seconds, 900);
}

#[test]
fn test_reset_restores_full_package_from_any_state() {
    let mut pool = open_store("reset_any");
    let cfg = cfg();

    let running = TimerLogic::create(&mut pool, &cfg, "Lia", Target::Combo, 45, t0())
        .unwrap()
        .id;
    TimerLogic::start(&mut pool, running, at(0)).unwrap();
    TimerLogic::add_time(&mut pool, running, 10, at(5)).unwrap();

    let paused = TimerLogic::create(&mut pool, &cfg, "Max", Target::Combo, 45, t0())
        .unwrap()
        .id;
    TimerLogic::start(&mut pool, paused, at(0)).unwrap();
    TimerLogic::pause(&mut pool, paused, at(300)).unwrap();

    let fresh = TimerLogic::create(&mut pool, &cfg, "Noa", Target::Combo, 45, t0())
        .unwrap()
        .id;

    for id in [running, paused, fresh] {
        let reset = TimerLogic::reset(&mut pool, id, at(400)).unwrap();
        assert_eq!(compute_remaining(&reset, at(400)), 45 * 60);
        assert_eq!(reset.status, TimerStatus::Paused);
        assert_eq!(reset.started_at, None);
    }
}

#[test]
fn test_update_parses_actions() {
    assert_eq!(Action::from_request("start", None).unwrap(), Action::Start);
    assert_eq!(Action::from_request("PAUSE", None).unwrap(), Action::Pause);
    assert_eq!(
        Action::from_request("add_time", Some(10)).unwrap(),
        Action::AddTime(10)
    );
    assert!(matches!(
        Action::from_request("add_time", None),
        Err(AppError::Validation { .. })
    ));
    assert!(matches!(
        Action::from_request("reset", Some(5)),
        Err(AppError::Validation { .. })
    ));
    assert!(matches!(
        Action::from_request("stop", None),
        Err(AppError::Validation { .. })
    ));
}

#[test]
fn test_missing_timer_is_not_found() {
    let mut pool = open_store("not_found");

    assert!(matches!(
        TimerLogic::start(&mut pool, 42, at(0)),
        Err(AppError::NotFound(42))
    ));
    assert!(matches!(
        TimerLogic::delete(&mut pool, 42),
        Err(AppError::NotFound(42))
    ));
}

#[test]
fn test_delete_removes_timer() {
    let mut pool = open_store("delete");
    let id = TimerLogic::create(&mut pool, &cfg(), "Ola", Target::Combo, 15, t0())
        .unwrap()
        .id;

    let deleted = TimerLogic::delete(&mut pool, id).unwrap();
    assert_eq!(deleted.customer_name, "Ola");
    assert!(load_timer(&pool.conn, id).unwrap().is_none());
    assert!(matches!(
        TimerLogic::get(&mut pool, id),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_stale_version_write_is_rejected() {
    let mut pool = open_store("cas_stale");
    let id = TimerLogic::create(&mut pool, &cfg(), "Pia", Target::Combo, 15, t0())
        .unwrap()
        .id;

    let snapshot = TimerLogic::get(&mut pool, id).unwrap();
    TimerLogic::start(&mut pool, id, at(0)).unwrap();

    // a second operator acting on the old snapshot
    let Transition::Changed(next) = lifecycle::start(&snapshot, at(30)) else {
        panic!("expected a change");
    };
    assert!(!update_timer_cas(&pool.conn, &next, snapshot.version).unwrap());

    let stored = TimerLogic::get(&mut pool, id).unwrap();
    assert_eq!(stored.started_at, Some(at(0)));
}

#[test]
fn test_two_operators_pausing_the_same_timer() {
    let db_path = setup_test_db("two_operators");
    let mut desk = DbPool::new(&db_path).unwrap();
    racetimer::db::initialize::init_db(&desk.conn).unwrap();
    let mut tablet = DbPool::new(&db_path).unwrap();

    let id = TimerLogic::create(&mut desk, &cfg(), "Quinn", Target::Combo, 30, t0())
        .unwrap()
        .id;
    TimerLogic::start(&mut desk, id, at(0)).unwrap();

    let a = TimerLogic::pause(&mut desk, id, at(60)).unwrap();
    let b = TimerLogic::pause(&mut tablet, id, at(61)).unwrap();

    assert_eq!(a.banked_seconds, 1740);
    assert_eq!(b, a);
}

#[test]
fn test_list_is_deterministic_for_the_same_instant() {
    let db_path = setup_test_db("deterministic");
    let mut board_a = DbPool::new(&db_path).unwrap();
    racetimer::db::initialize::init_db(&board_a.conn).unwrap();
    let mut board_b = DbPool::new(&db_path).unwrap();

    let cfg = cfg();
    let x = TimerLogic::create(&mut board_a, &cfg, "Rae", Target::Combo, 30, t0())
        .unwrap()
        .id;
    TimerLogic::create(&mut board_a, &cfg, "Sol", Target::Lane(FAST_TRACK), 60, t0()).unwrap();
    TimerLogic::start(&mut board_a, x, at(3)).unwrap();

    let a = projection::list(&mut board_a, at(777)).unwrap();
    let b = projection::list(&mut board_b, at(777)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a[0].remaining_seconds, 1800 - 774);
    assert_eq!(a[0].remaining_minutes, (1800 - 774) / 60);
    assert_eq!(a[0].remaining_seconds_only, (1800 - 774) % 60);
}

#[test]
fn test_mutations_are_logged() {
    let mut pool = open_store("audit_log");
    let id = TimerLogic::create(&mut pool, &cfg(), "Tao", Target::Combo, 15, t0())
        .unwrap()
        .id;
    TimerLogic::start(&mut pool, id, at(0)).unwrap();
    TimerLogic::start(&mut pool, id, at(5)).unwrap();
    TimerLogic::pause(&mut pool, id, at(10)).unwrap();

    let ops: Vec<String> = racetimer::core::log::LogLogic::load(&mut pool, None)
        .unwrap()
        .into_iter()
        .filter(|e| e.target == format!("timer #{id}"))
        .map(|e| e.operation)
        .collect();

    // the idempotent second start is not recorded
    assert_eq!(ops, vec!["create", "start", "pause"]);
}
