//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `newme_core` linkage without the Flutter runtime.
//! - With a database path, print a dashboard summary.

use newme_core::AppService;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("newme_core ping={}", newme_core::ping());
    println!("newme_core version={}", newme_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let app = match AppService::open(&db_path) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = app.dashboard();
    println!("today={}", app.today());
    println!("points={} level={}", summary.points, summary.level);
    println!(
        "stage={} next={} progress={:.2}%",
        summary.stage_name,
        summary.next_stage_name.as_deref().unwrap_or("-"),
        summary.progress_percent
    );
    println!(
        "balanced={} lagging={}",
        summary.balance.is_overall_balanced,
        summary
            .balance
            .lagging()
            .map(|item| item.habit_id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    );
    println!(
        "tasks_today={}/{} badges={} completions={}",
        summary.today_tasks_done,
        summary.today_tasks_total,
        summary.unlocked_badges,
        summary.total_completions
    );
    ExitCode::SUCCESS
}
