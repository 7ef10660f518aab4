//! Plain-text rendering of a finished [`Schedule`].

use super::{ProcessRecord, Report, Schedule};
use std::fmt::Write;

const RULE_WIDTH: usize = 90;

/// The Gantt chart as a bar of labels with the boundary times underneath:
///
/// ```text
/// | P1 | P2 |
/// 0    3    5
/// ```
pub fn render_gantt(schedule: &Schedule) -> String {
    let segments = schedule.gantt();
    if segments.is_empty() {
        return String::from("(no processes)\n");
    }

    let mut bar = String::from("|");
    let mut times = String::new();
    for segment in segments {
        let cell = format!(" {} |", segment.label());
        let start = segment.start.to_string();
        let _ = write!(times, "{:<width$}", start, width = cell.len());
        bar.push_str(&cell);
    }
    let _ = writeln!(times, "{}", schedule.makespan());
    format!("{}\n{}", bar, times)
}

/// First dispatch time, or `-` for a process that never ran.
pub fn start_label(record: &ProcessRecord) -> String {
    record
        .start_time()
        .map_or_else(|| "-".to_owned(), |start| start.to_string())
}

pub fn render_table(schedule: &Schedule, show_priority: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{}", rule);
    let _ = write!(out, "{:<10} {:<10} {:<10} ", "Process", "Arrival", "Burst");
    if show_priority {
        let _ = write!(out, "{:<10} ", "Priority");
    }
    let _ = writeln!(
        out,
        "{:<8} {:<12} {:<12} {:<10}",
        "Start", "Completion", "Turnaround", "Waiting"
    );
    let _ = writeln!(out, "{}", rule);

    for record in schedule.records() {
        let _ = write!(
            out,
            "{:<10} {:<10} {:<10} ",
            record.pid(),
            record.arrival(),
            record.burst()
        );
        if show_priority {
            let _ = write!(out, "{:<10} ", record.priority());
        }
        let _ = writeln!(
            out,
            "{:<8} {:<12} {:<12} {:<10}",
            start_label(record),
            record.completion(),
            record.turnaround(),
            record.waiting()
        );
    }
    let _ = writeln!(out, "{}", rule);
    out
}

pub fn render_summary(schedule: &Schedule) -> String {
    format!(
        "{:<30} {:.2} units\n{:<30} {:.2} units\n{:<30} {:.2} units\n{:<30} {:.2}%\n",
        "Average Waiting Time:",
        schedule.average_waiting(),
        "Average Turnaround Time:",
        schedule.average_turnaround(),
        "Average Response Time:",
        schedule.average_response(),
        "CPU Utilization:",
        schedule.utilization() * 100.0
    )
}

pub fn render(report: &Report) -> String {
    format!(
        "\n=== {} ===\n\nGantt Chart:\n{}\n{}\n{}",
        report.title,
        render_gantt(&report.schedule),
        render_table(&report.schedule, report.show_priority),
        render_summary(&report.schedule)
    )
}
