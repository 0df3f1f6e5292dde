//! Terminal output helpers

use colored::*;
use hive_core::domain::execution::{ExecutionResult, ExecutionStatus};
use hive_core::domain::notification::{Notification, NotificationKind};
use hive_runner::service::Notifier;

/// Notifier that prints events to the terminal
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: Notification) {
        let message = event
            .data
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string);

        match event.kind {
            NotificationKind::Testing => {
                println!("{} {}", "…".cyan(), message.unwrap_or_default());
            }
            NotificationKind::Success => {
                println!("{} {}", "✓".green(), message.unwrap_or_default().green());
            }
            NotificationKind::Error => {
                eprintln!("{} {}", "✗".red(), message.unwrap_or_default().red());
            }
            NotificationKind::Generating => match event.data.get("progress") {
                Some(progress) => println!(
                    "  {} {}",
                    "progress".dimmed(),
                    format_progress(progress.as_f64().unwrap_or_default())
                ),
                None => println!(
                    "{} Running {}...",
                    "▸".cyan(),
                    event.data["slug"].as_str().unwrap_or("quick command").bold()
                ),
            },
            // The final payload is printed by the command itself.
            NotificationKind::Result => {}
        }
    }
}

/// Renders a progress value that may be a fraction or a percentage
pub fn format_progress(progress: f64) -> String {
    let percent = if progress <= 1.0 { progress * 100.0 } else { progress };
    format!("{:.0}%", percent)
}

/// Colorize execution status for display
pub fn colorize_status(status: ExecutionStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        ExecutionStatus::Pending => status_str.yellow(),
        ExecutionStatus::Running => status_str.cyan(),
        ExecutionStatus::Completed => status_str.green(),
        ExecutionStatus::Failed | ExecutionStatus::Error => status_str.red(),
        ExecutionStatus::Unknown => status_str.dimmed(),
    }
}

/// Print the final result of a run
pub fn print_result(result: &ExecutionResult) {
    println!("{} {}", "Status:".bold(), colorize_status(result.status));

    match &result.payload {
        // Plain-text answers are printed as-is.
        Some(serde_json::Value::String(text)) => {
            println!();
            println!("{}", text);
        }
        Some(payload) => {
            println!();
            if let Ok(pretty) = serde_json::to_string_pretty(payload) {
                println!("{}", pretty);
            } else {
                println!("{:?}", payload);
            }
        }
        None => println!("{}", "(no result payload)".dimmed()),
    }
}
