//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `attendance_core` linkage.
//! - Print the overall attendance report for a database file when given one.
//!
//! Usage: `attendance_cli [db_path]`. Without an argument the path comes from
//! `ATTENDANCE_DB_PATH` when set; otherwise only version info is printed.

use attendance_core::{AttendanceApp, CoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("attendance_core ping={}", attendance_core::ping());
    println!("attendance_core version={}", attendance_core::core_version());

    let mut config = CoreConfig::from_env();
    match std::env::args().nth(1) {
        Some(path) => config.db_path = path.into(),
        None if std::env::var_os(attendance_core::config::ENV_DB_PATH).is_none() => {
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let app = match AttendanceApp::open(&config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("failed to open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    match app.overall_summary() {
        Ok(summary) => {
            println!(
                "classes={} students={} average_attendance={:.1}%",
                summary.total_classes, summary.total_students, summary.average_attendance
            );
            for class in &summary.classes {
                println!(
                    "  {} ({}) students={} present={} absent={} late={} average={:.1}% band={:?}",
                    class.class.name,
                    class.class.subject,
                    class.total_students,
                    class.total_present,
                    class.total_absent,
                    class.total_late,
                    class.average_attendance,
                    class.band()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("event=cli_report module=cli status=error error={err}");
            eprintln!("failed to build report: {err}");
            ExitCode::FAILURE
        }
    }
}
