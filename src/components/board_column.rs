//! Kanban Column Component
//!
//! One status bucket: a drop target with a badge counting its visible
//! cards. The badge is derived from store and filters, never cached.

use leptos::prelude::*;
use leptos_dnd::{leaves_element, read_payload, DndSignals};
use web_sys::DragEvent;

use crate::components::TaskCard;
use crate::context::AppContext;
use crate::filters::TaskFilter;
use crate::models::TaskStatus;
use crate::store::{use_board_store, BoardStateStoreFields};
use crate::transitions;

#[component]
pub fn BoardColumn(status: TaskStatus, dnd: DndSignals) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_board_store();
    let ledger = transitions::use_ledger();

    let zone = status.as_str();

    let visible = move || {
        let filter = TaskFilter {
            query: store.search_query().get(),
            mine_only: store.mine_only().get(),
            current_user: store.current_user_id().get(),
        };
        store
            .tasks()
            .get()
            .into_iter()
            .filter(|task| task.status == status && filter.matches(task))
            .collect::<Vec<_>>()
    };
    let badge_count = move || visible().len();

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
    };
    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        dnd.enter_zone(zone);
    };
    let on_dragleave = move |ev: DragEvent| {
        dnd.leave_zone(zone, leaves_element(&ev));
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        // the affordance goes regardless of what the drop resolves to
        dnd.clear_over();
        let Some(task_id) = read_payload(&ev) else {
            return;
        };
        transitions::submit_status_change(store, ctx, ledger, task_id, status);
    };

    let column_class = move || {
        let mut c = String::from("kanban-column");
        if dnd.is_over(zone) {
            c.push_str(" drag-over");
        }
        c
    };

    view! {
        <div
            class=column_class
            data-status=zone
            on:dragover=on_dragover
            on:dragenter=on_dragenter
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <div class="column-header">
                <h5>{status.title()}</h5>
                <span class="badge">{badge_count}</span>
            </div>
            <div class="task-container">
                <For
                    each=visible
                    key=|task| (
                        task.id.clone(),
                        task.status,
                        task.priority,
                        task.title.clone(),
                        task.assignee_id.clone(),
                        task.updated_at.clone(),
                    )
                    children=move |task| view! { <TaskCard task=task dnd=dnd /> }
                />
            </div>
        </div>
    }
}
