//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::notify::Notifier;

/// Top-level views of the single-page app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Board,
    Team,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload board data from backend - read
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    /// Current view - read
    pub view: ReadSignal<AppView>,
    set_view: WriteSignal<AppView>,
    /// Task open in the edit panel (None = closed) - read
    pub editing_task: ReadSignal<Option<String>>,
    set_editing_task: WriteSignal<Option<String>>,
    /// Wall-clock tick (ms), driving elapsed time displays
    pub now_ms: ReadSignal<f64>,
    /// Notification queue handle
    pub notifier: Notifier,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        view: (ReadSignal<AppView>, WriteSignal<AppView>),
        editing_task: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        now_ms: ReadSignal<f64>,
        notifier: Notifier,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            view: view.0,
            set_view: view.1,
            editing_task: editing_task.0,
            set_editing_task: editing_task.1,
            now_ms,
            notifier,
        }
    }

    /// Trigger a reload of tasks and users
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn switch_view(&self, view: AppView) {
        self.set_view.set(view);
    }

    pub fn open_editor(&self, task_id: String) {
        self.set_editing_task.set(Some(task_id));
    }

    pub fn close_editor(&self) {
        self.set_editing_task.set(None);
    }
}
