//! Time Tracking Helpers
//!
//! Pure pieces of the card timer: elapsed-time formatting and the
//! start/stop/switch decision. The network calls live with the card
//! component; wall-clock reads stay at the call sites so these run native.

use crate::models::TimeLog;

/// `M:SS` under an hour, `H:MM:SS` above
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Whole seconds between two millisecond timestamps, clamped at zero
pub fn elapsed_secs(start_ms: f64, now_ms: f64) -> u64 {
    let secs = (now_ms - start_ms) / 1000.0;
    if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    }
}

/// What the time button should do for this task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingAction {
    /// Nothing is tracked; start on this task
    Start,
    /// This task is tracked; stop its log
    Stop { time_log_id: String },
    /// Another task is tracked; ask before switching
    ConfirmSwitch { stop_log_id: String },
}

pub fn toggle_action(active: Option<&TimeLog>, task_id: &str) -> TrackingAction {
    match active {
        Some(log) if log.task_id == task_id => TrackingAction::Stop {
            time_log_id: log.id.clone(),
        },
        Some(log) => TrackingAction::ConfirmSwitch {
            stop_log_id: log.id.clone(),
        },
        None => TrackingAction::Start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_log(id: &str, task_id: &str) -> TimeLog {
        TimeLog {
            id: id.to_string(),
            task_id: task_id.to_string(),
            user_id: "3".to_string(),
            start_time: Some("2024-05-01T09:30:00".to_string()),
            end_time: None,
            duration_hours: None,
            description: None,
        }
    }

    #[test]
    fn test_format_elapsed_boundaries() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(59), "0:59");
        assert_eq!(format_elapsed(60), "1:00");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(3661), "1:01:01");
    }

    #[test]
    fn test_elapsed_secs_clamps_and_truncates() {
        assert_eq!(elapsed_secs(1_000.0, 62_500.0), 61);
        assert_eq!(elapsed_secs(62_500.0, 1_000.0), 0);
        assert_eq!(elapsed_secs(f64::NAN, 1_000.0), 0);
    }

    #[test]
    fn test_toggle_stops_the_tracked_task() {
        let log = make_log("9", "42");
        assert_eq!(
            toggle_action(Some(&log), "42"),
            TrackingAction::Stop {
                time_log_id: "9".to_string()
            }
        );
    }

    #[test]
    fn test_toggle_confirms_before_switching_tasks() {
        let log = make_log("9", "42");
        assert_eq!(
            toggle_action(Some(&log), "7"),
            TrackingAction::ConfirmSwitch {
                stop_log_id: "9".to_string()
            }
        );
    }

    #[test]
    fn test_toggle_starts_when_idle() {
        assert_eq!(toggle_action(None, "42"), TrackingAction::Start);
    }
}
