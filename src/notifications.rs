//! Cross-platform notification support
//! Currently only implements macOS notifications
use crate::domain::TimerPhase;

#[cfg(target_os = "macos")]
use std::process::Command;

#[cfg(target_os = "macos")]
fn display_notification(title: &str, message: &str) {
    let script = format!(
        r#"display notification "{}" with title "{}""#,
        message.replace('"', "\\\""),
        title.replace('"', "\\\"")
    );

    if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
        tracing::debug!(error = %e, "osascript notification failed");
    }
}

#[cfg(not(target_os = "macos"))]
fn display_notification(title: &str, message: &str) {
    tracing::trace!(title, message, "notifications unsupported on this platform");
}

/// Send a notification when a task is completed
pub fn notify_task_completed(task_title: &str) {
    display_notification("Pomotask - Task Completed", task_title);
}

/// Send a notification when a timer phase runs out
pub fn notify_phase_finished(from: TimerPhase, to: TimerPhase) {
    let message = format!("{} {} is over. Next: {}", from.symbol(), from.name(), to.name());
    display_notification("Pomotask", &message);
}
