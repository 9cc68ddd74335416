//! Global Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is the
//! source of truth for the board; the rendered columns and badge counts are
//! derived projections of it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::models::{Task, TaskStatus, TimeLog, User};

/// Board state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// All tasks, every column included
    pub tasks: Vec<Task>,
    /// Team roster
    pub users: Vec<User>,
    /// Logged-in user (injected by the host page)
    pub current_user_id: Option<String>,
    /// Debounced search query
    pub search_query: String,
    /// "My tasks" assignee filter
    pub mine_only: bool,
    /// Currently running time log, if any
    pub active_log: Option<TimeLog>,
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

/// Get the board store from context
pub fn use_board_store() -> BoardStore {
    expect_context::<BoardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Set a task's status in a task list. Returns false when the id is unknown.
pub fn set_task_status(tasks: &mut [Task], task_id: &str, status: TaskStatus) -> bool {
    match tasks.iter_mut().find(|task| task.id == task_id) {
        Some(task) => {
            task.status = status;
            true
        }
        None => false,
    }
}

/// Set a task's status in the store by id
pub fn store_set_task_status(store: &BoardStore, task_id: &str, status: TaskStatus) {
    set_task_status(&mut store.tasks().write(), task_id, status);
}

/// Remove a task from the store by id
pub fn store_remove_task(store: &BoardStore, task_id: &str) {
    store.tasks().write().retain(|task| task.id != task_id);
}

/// Untracked lookup, for event handlers
pub fn store_task(store: &BoardStore, task_id: &str) -> Option<Task> {
    store
        .tasks()
        .get_untracked()
        .into_iter()
        .find(|task| task.id == task_id)
}

/// Re-fetch the active time log into the store
pub fn sync_active_log(store: BoardStore) {
    spawn_local(async move {
        match api::active_time_log().await {
            Ok(active) => {
                let log = if active.active { active.time_log } else { None };
                store.active_log().set(log);
            }
            Err(err) => {
                web_sys::console::error_1(
                    &format!("[TIME] Failed to check active time log: {err}").into(),
                );
            }
        }
    });
}
