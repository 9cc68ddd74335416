//! Status Transition Submitter
//!
//! Server-confirmed drag-and-drop status changes. The board store is mutated
//! only after the backend answers `{success: true}`; failures leave it
//! untouched and surface a notification.
//!
//! Overlapping submissions for the same task are ordered by a per-task
//! sequence number: a success response applies only when it is newer than
//! the last applied one, so the final board position follows the last drop
//! the user made, not whichever response happened to arrive last. Stale
//! responses and their notifications are discarded.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::models::TaskStatus;
use crate::notify::NoticeKind;
use crate::store::{self, BoardStore};

/// Per-task bookkeeping for in-flight status submissions
#[derive(Clone, Debug, Default)]
pub struct TransitionLedger {
    issued: HashMap<String, u64>,
    applied: HashMap<String, u64>,
    in_flight: HashMap<String, u32>,
}

impl TransitionLedger {
    /// Take a ticket for a new submission and mark the task in flight
    pub fn begin(&mut self, task_id: &str) -> u64 {
        let seq = self.issued.entry(task_id.to_string()).or_insert(0);
        *seq += 1;
        *self.in_flight.entry(task_id.to_string()).or_insert(0) += 1;
        *seq
    }

    /// A submission settled (success or failure); drop its in-flight mark
    pub fn settle(&mut self, task_id: &str) {
        if let Some(count) = self.in_flight.get_mut(task_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.in_flight.remove(task_id);
            }
        }
    }

    /// True while any submission for this task is unresolved
    pub fn is_in_flight(&self, task_id: &str) -> bool {
        self.in_flight.contains_key(task_id)
    }

    /// Record a success response. Returns false for stale responses, which
    /// must not touch the board.
    pub fn try_apply(&mut self, task_id: &str, seq: u64) -> bool {
        let last = self.applied.get(task_id).copied().unwrap_or(0);
        if seq > last {
            self.applied.insert(task_id.to_string(), seq);
            true
        } else {
            false
        }
    }

    /// A newer submission already applied; failures never advance this
    pub fn is_superseded(&self, task_id: &str, seq: u64) -> bool {
        seq <= self.applied.get(task_id).copied().unwrap_or(0)
    }
}

/// Reactive ledger handle; cards read it for their loading mark
pub type Ledger = RwSignal<TransitionLedger>;

pub fn provide_ledger() {
    provide_context(RwSignal::new(TransitionLedger::default()));
}

pub fn use_ledger() -> Ledger {
    expect_context::<Ledger>()
}

/// Submit one status change for `task_id` and reconcile the store with the
/// server's verdict. One request per drop, no retry, no cancellation.
pub fn submit_status_change(
    store: BoardStore,
    ctx: AppContext,
    ledger: Ledger,
    task_id: String,
    new_status: TaskStatus,
) {
    // a drop with an id the board no longer knows: no request, no notification
    if store::store_task(&store, &task_id).is_none() {
        web_sys::console::warn_1(
            &format!("[BOARD] Ignoring drop for unknown task {task_id}").into(),
        );
        return;
    }

    let seq = ledger
        .try_update(|ledger| ledger.begin(&task_id))
        .unwrap_or_default();
    if seq == 0 {
        return;
    }

    spawn_local(async move {
        match api::update_task_status(&task_id, new_status).await {
            Ok(()) => {
                let apply = ledger
                    .try_update(|ledger| ledger.try_apply(&task_id, seq))
                    .unwrap_or(false);
                if apply {
                    store::store_set_task_status(&store, &task_id, new_status);
                    ctx.notifier
                        .push("Task status updated successfully!", NoticeKind::Success);
                } else {
                    web_sys::console::log_1(
                        &format!("[BOARD] Discarding stale status response for task {task_id}")
                            .into(),
                    );
                }
            }
            Err(err) => {
                if err.is_transport() {
                    web_sys::console::error_1(
                        &format!("[BOARD] Status update failed for task {task_id}: {err}").into(),
                    );
                }
                let superseded =
                    ledger.with_untracked(|ledger| ledger.is_superseded(&task_id, seq));
                if !superseded {
                    ctx.notifier.push(err.user_message(), NoticeKind::Error);
                }
            }
        }
        ledger.try_update(|ledger| ledger.settle(&task_id));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::filters::{column_counts, TaskFilter};
    use crate::models::{Task, TaskPriority};
    use crate::store::set_task_status;

    fn make_task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            complexity: "medium".to_string(),
            assignee_id: None,
            created_by: "1".to_string(),
            team_id: None,
            estimated_hours: None,
            actual_hours: None,
            started_at: None,
            due_date: None,
            completed_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn counts(tasks: &[Task]) -> [(TaskStatus, usize); 4] {
        column_counts(tasks, &TaskFilter::default())
    }

    #[test]
    fn test_in_order_responses_apply() {
        let mut ledger = TransitionLedger::default();
        let first = ledger.begin("42");
        let second = ledger.begin("42");
        assert!(ledger.try_apply("42", first));
        assert!(ledger.try_apply("42", second));
    }

    #[test]
    fn test_out_of_order_response_is_discarded() {
        let mut ledger = TransitionLedger::default();
        let first = ledger.begin("42");
        let second = ledger.begin("42");
        // the later drop's response arrives first
        assert!(ledger.try_apply("42", second));
        assert!(!ledger.try_apply("42", first));
        assert!(ledger.is_superseded("42", first));
    }

    #[test]
    fn test_failures_never_advance_the_ledger() {
        let mut ledger = TransitionLedger::default();
        let failed = ledger.begin("42");
        // no try_apply for the failure; the next submission still applies
        assert!(!ledger.is_superseded("42", failed));
        let retry = ledger.begin("42");
        assert!(ledger.try_apply("42", retry));
    }

    #[test]
    fn test_superseded_failure_is_suppressed() {
        let mut ledger = TransitionLedger::default();
        let first = ledger.begin("42");
        let second = ledger.begin("42");
        assert!(ledger.try_apply("42", second));
        // the older submission now fails; its notification must not show
        assert!(ledger.is_superseded("42", first));
    }

    #[test]
    fn test_tasks_are_ordered_independently() {
        let mut ledger = TransitionLedger::default();
        let a = ledger.begin("42");
        let b = ledger.begin("7");
        assert!(ledger.try_apply("7", b));
        assert!(!ledger.is_superseded("42", a));
        assert!(ledger.try_apply("42", a));
    }

    #[test]
    fn test_in_flight_counts_overlapping_submissions() {
        let mut ledger = TransitionLedger::default();
        ledger.begin("42");
        ledger.begin("42");
        assert!(ledger.is_in_flight("42"));
        ledger.settle("42");
        assert!(ledger.is_in_flight("42"));
        ledger.settle("42");
        assert!(!ledger.is_in_flight("42"));
        // settling an already-clear task is harmless
        ledger.settle("42");
        assert!(!ledger.is_in_flight("42"));
    }

    #[test]
    fn test_successful_drop_moves_card_and_counts() {
        // card "42" in todo, dropped on in_progress, server confirms
        let mut tasks = vec![
            make_task("42", TaskStatus::Todo),
            make_task("7", TaskStatus::Todo),
        ];
        let before = counts(&tasks);
        assert_eq!(before[0].1, 2);

        let mut ledger = TransitionLedger::default();
        let seq = ledger.begin("42");
        assert!(ledger.try_apply("42", seq));
        assert!(set_task_status(&mut tasks, "42", TaskStatus::InProgress));
        ledger.settle("42");

        let after = counts(&tasks);
        assert_eq!(after[0].1, 1);
        assert_eq!(after[1].1, 1);
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert!(!ledger.is_in_flight("42"));
    }

    #[test]
    fn test_rejected_drop_leaves_card_in_place() {
        let mut tasks = vec![make_task("42", TaskStatus::Todo)];
        let before = counts(&tasks);

        let mut ledger = TransitionLedger::default();
        let seq = ledger.begin("42");
        let err = ApiError::Rejected("Permission denied".to_string());
        // failure path: store untouched, reason surfaces verbatim
        assert!(!ledger.is_superseded("42", seq));
        assert_eq!(err.user_message(), "Permission denied");
        ledger.settle("42");

        assert_eq!(counts(&tasks), before);
        assert_eq!(tasks[0].status, TaskStatus::Todo);
        assert!(!ledger.is_in_flight("42"));
        // the failure never advanced the ledger
        let retry = ledger.begin("42");
        assert!(ledger.try_apply("42", retry));
        assert!(set_task_status(&mut tasks, "42", TaskStatus::InProgress));
    }

    #[test]
    fn test_drop_on_own_column_is_idempotent() {
        let mut tasks = vec![
            make_task("42", TaskStatus::Todo),
            make_task("7", TaskStatus::InReview),
        ];
        let before = counts(&tasks);

        let mut ledger = TransitionLedger::default();
        let seq = ledger.begin("42");
        assert!(ledger.try_apply("42", seq));
        assert!(set_task_status(&mut tasks, "42", TaskStatus::Todo));

        assert_eq!(counts(&tasks), before);
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }
}
