//! Text rendering of timer projections (control-surface table and display board).

use crate::models::board::Board;
use crate::models::view::TimerView;
use crate::utils::colors::{CYAN, GREY, MAGENTA, RESET, color_for_remaining, colorize};
use crate::utils::formatting::{bold, describe_status, format_clock};
use crate::utils::table::{Column, Table, pad_right};

fn lane_label(v: &TimerView) -> String {
    match (&v.track, v.is_combo) {
        (_, true) => format!("{MAGENTA}COMBO{RESET}"),
        (Some(t), false) => t.name.clone(),
        (None, false) => format!("{GREY}?{RESET}"),
    }
}

fn remaining_cell(v: &TimerView) -> String {
    colorize(
        &format_clock(v.remaining_seconds),
        color_for_remaining(v.remaining_seconds, v.allocated_minutes),
    )
}

fn status_cell(v: &TimerView) -> String {
    let (label, color) = describe_status(v.status, v.expired);
    colorize(label, color)
}

/// Flat table, one row per timer (control surface).
pub fn render_list(views: &[TimerView]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Customer"),
        Column::new("Lane"),
        Column::new("Package"),
        Column::new("Remaining"),
        Column::new("Status"),
    ]);

    for v in views {
        table.add_row(vec![
            v.id.to_string(),
            v.customer_name.clone(),
            lane_label(v),
            format!("{} min", v.allocated_minutes),
            remaining_cell(v),
            status_cell(v),
        ]);
    }

    table.render()
}

fn render_bucket(out: &mut String, title: &str, timers: &[TimerView]) {
    out.push_str(&format!("{CYAN}{}{RESET}\n", bold(title)));
    for v in timers {
        out.push_str(&format!(
            "  #{:<4} {} {}  {}\n",
            v.id,
            pad_right(&v.customer_name, 20),
            remaining_cell(v),
            status_cell(v)
        ));
    }
    out.push('\n');
}

/// Grouped display board: combo pool first, then occupied lanes.
pub fn render_board(board: &Board, stale: bool) -> String {
    let mut out = String::new();

    if stale {
        out.push_str(&format!(
            "{GREY}(connection lost, showing last known times){RESET}\n\n"
        ));
    }

    if board.is_empty() {
        out.push_str(&format!("{GREY}No active timers{RESET}\n"));
        return out;
    }

    if !board.combo.is_empty() {
        render_bucket(&mut out, "COMBO", &board.combo);
    }

    for bucket in &board.lanes {
        let title = format!("{} [{}]", bucket.track.name, bucket.track.kind.label());
        render_bucket(&mut out, &title, &bucket.timers);
    }

    out
}
