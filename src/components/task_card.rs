//! Task Card Component
//!
//! One draggable card. While a status submission is in flight the card is
//! marked loading and not draggable; its position only changes after the
//! server confirms. Also hosts the per-task time tracking button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dnd::{attach_payload, DndSignals, DragSession};
use web_sys::DragEvent;

use crate::api;
use crate::context::AppContext;
use crate::models::{Task, TimeLog};
use crate::notify::NoticeKind;
use crate::store::{self, BoardStore, BoardStateStoreFields};
use crate::timelog::{self, TrackingAction};
use crate::transitions;

#[component]
pub fn TaskCard(task: Task, dnd: DndSignals) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = store::use_board_store();
    let ledger = transitions::use_ledger();

    let id = StoredValue::new(task.id.clone());
    let status = task.status;
    let priority = task.priority;
    let title = task.title.clone();
    let description = task.description.clone();
    let assignee_id = task.assignee_id.clone();

    let is_loading = move || id.with_value(|id| ledger.with(|l| l.is_in_flight(id)));
    let is_dragging = move || id.with_value(|id| dnd.is_dragging(id));

    let assignee_name = move || {
        let assignee_id = assignee_id.clone()?;
        store
            .users()
            .get()
            .iter()
            .find(|user| user.id == assignee_id)
            .map(|user| user.name().to_string())
    };

    let is_tracked = move || {
        store
            .active_log()
            .get()
            .is_some_and(|log| id.with_value(|id| &log.task_id == id))
    };
    let elapsed = move || {
        let log = store.active_log().get()?;
        if !id.with_value(|id| &log.task_id == id) {
            return None;
        }
        let secs = timelog::elapsed_secs(log_start_ms(&log), ctx.now_ms.get());
        Some(timelog::format_elapsed(secs))
    };

    let on_dragstart = move |ev: DragEvent| {
        if is_loading() {
            ev.prevent_default();
            return;
        }
        let item_id = id.get_value();
        attach_payload(&ev, &item_id);
        dnd.begin(DragSession {
            item_id,
            from_zone: status.as_str().to_string(),
        });
    };
    let on_dragend = move |_: DragEvent| dnd.end_drag();

    let on_click = move |_| {
        // no click-to-edit mid-drag
        if dnd.dragging_id_untracked().is_some() {
            return;
        }
        ctx.open_editor(id.get_value());
    };

    let on_time_toggle = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let task_id = id.get_value();
        let active = store.active_log().get_untracked();
        match timelog::toggle_action(active.as_ref(), &task_id) {
            TrackingAction::Stop { time_log_id } => stop_tracking(store, ctx, time_log_id, None),
            TrackingAction::ConfirmSwitch { stop_log_id } => {
                let confirmed = web_sys::window()
                    .and_then(|win| {
                        win.confirm_with_message(
                            "You are already tracking time on another task. Switch to this task?",
                        )
                        .ok()
                    })
                    .unwrap_or(false);
                if confirmed {
                    stop_tracking(store, ctx, stop_log_id, Some(task_id));
                }
            }
            TrackingAction::Start => start_tracking(store, ctx, task_id),
        }
    };

    let card_class = move || {
        let mut c = format!("task-card priority-{}", priority.as_str());
        if is_dragging() {
            c.push_str(" dragging");
        }
        if is_loading() {
            c.push_str(" loading");
        }
        c
    };

    view! {
        <div
            class=card_class
            draggable=move || if is_loading() { "false" } else { "true" }
            on:dragstart=on_dragstart
            on:dragend=on_dragend
            on:click=on_click
        >
            <div class="card-top">
                <h6 class="card-title">{title}</h6>
                <span class=format!("priority-badge priority-{}", priority.as_str())>
                    {priority.label()}
                </span>
            </div>

            {(!description.is_empty()).then(|| view! {
                <p class="card-text">{description.clone()}</p>
            })}

            <div class="card-footer">
                <span class="assignee">{assignee_name}</span>
                <button
                    type="button"
                    class=move || if is_tracked() { "time-tracking-btn tracking" } else { "time-tracking-btn" }
                    title=move || if is_tracked() { "Stop time tracking" } else { "Start time tracking" }
                    on:click=on_time_toggle
                >
                    {move || if is_tracked() { "■" } else { "▶" }}
                </button>
                {move || elapsed().map(|text| view! {
                    <span class="time-duration">{text}</span>
                })}
            </div>
        </div>
    }
}

/// Start of a time log in epoch milliseconds; falls back to "now" when the
/// timestamp is missing or unparseable so the timer shows 0:00 rather than
/// garbage
fn log_start_ms(log: &TimeLog) -> f64 {
    log.start_time
        .as_deref()
        .map(|iso| js_sys::Date::new(&iso.into()).get_time())
        .filter(|ms| ms.is_finite())
        .unwrap_or_else(js_sys::Date::now)
}

fn start_tracking(store: BoardStore, ctx: AppContext, task_id: String) {
    spawn_local(async move {
        match api::start_time_tracking(&task_id, "").await {
            Ok(message) => {
                ctx.notifier.push(
                    message.unwrap_or_else(|| "Time tracking started".to_string()),
                    NoticeKind::Success,
                );
                store::sync_active_log(store);
            }
            Err(err) => {
                if err.is_transport() {
                    web_sys::console::error_1(
                        &format!("[TIME] Failed to start tracking task {task_id}: {err}").into(),
                    );
                }
                ctx.notifier.push(err.user_message(), NoticeKind::Error);
            }
        }
    });
}

fn stop_tracking(store: BoardStore, ctx: AppContext, time_log_id: String, then_start: Option<String>) {
    spawn_local(async move {
        match api::stop_time_tracking(&time_log_id).await {
            Ok(message) => {
                ctx.notifier.push(
                    message.unwrap_or_else(|| "Time tracking stopped".to_string()),
                    NoticeKind::Success,
                );
                store.active_log().set(None);
                match then_start {
                    Some(next_task) => start_tracking(store, ctx, next_task),
                    None => store::sync_active_log(store),
                }
            }
            Err(err) => {
                if err.is_transport() {
                    web_sys::console::error_1(
                        &format!("[TIME] Failed to stop time log {time_log_id}: {err}").into(),
                    );
                }
                ctx.notifier.push(err.user_message(), NoticeKind::Error);
            }
        }
    });
}
