//! Edit Task Panel
//!
//! Side panel for editing a task opened from its card. Prefills from the
//! store copy, saves via a full form POST and reloads the board; only the
//! drag-and-drop status path reconciles in place.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, TaskEdit};
use crate::components::{AssigneeAutocomplete, AttachmentList, DeleteConfirmButton};
use crate::context::AppContext;
use crate::models::{date_part, TaskPriority, TaskStatus};
use crate::notify::NoticeKind;
use crate::store::{self, use_board_store, BoardStateStoreFields};

const COMPLEXITIES: &[(&str, &str)] = &[
    ("very_simple", "Very simple"),
    ("simple", "Simple"),
    ("medium", "Medium"),
    ("complex", "Complex"),
    ("very_complex", "Very complex"),
];

#[component]
pub fn EditTaskPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_board_store();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (assignee_query, set_assignee_query) = signal(String::new());
    let (assignee_id, set_assignee_id) = signal::<Option<String>>(None);
    let (priority, set_priority) = signal(String::new());
    let (complexity, set_complexity) = signal(String::new());
    let (status, set_status) = signal(String::new());
    let (team_id, set_team_id) = signal(String::new());
    let (estimated_hours, set_estimated_hours) = signal(String::new());
    let (started_at, set_started_at) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());
    let (completed_at, set_completed_at) = signal(String::new());

    // which task the fields were filled from, so a board reload mid-edit
    // does not clobber the user's input
    let (loaded_for, set_loaded_for) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let Some(task_id) = ctx.editing_task.get() else {
            set_loaded_for.set(None);
            return;
        };
        if loaded_for.get_untracked().as_deref() == Some(task_id.as_str()) {
            return;
        }
        match store::store_task(&store, &task_id) {
            Some(task) => {
                set_loaded_for.set(Some(task_id));
                set_title.set(task.title);
                set_description.set(task.description);
                let assignee_name = task.assignee_id.as_ref().and_then(|aid| {
                    store
                        .users()
                        .get_untracked()
                        .iter()
                        .find(|user| &user.id == aid)
                        .map(|user| user.name().to_string())
                });
                set_assignee_query.set(assignee_name.unwrap_or_default());
                set_assignee_id.set(task.assignee_id);
                set_priority.set(task.priority.as_str().to_string());
                set_complexity.set(task.complexity);
                set_status.set(task.status.as_str().to_string());
                set_team_id.set(task.team_id.unwrap_or_default());
                set_estimated_hours.set(
                    task.estimated_hours
                        .map(|h| h.to_string())
                        .unwrap_or_default(),
                );
                set_started_at.set(
                    task.started_at
                        .as_deref()
                        .map(|iso| date_part(iso).to_string())
                        .unwrap_or_default(),
                );
                set_due_date.set(
                    task.due_date
                        .as_deref()
                        .map(|iso| date_part(iso).to_string())
                        .unwrap_or_default(),
                );
                set_completed_at.set(
                    task.completed_at
                        .as_deref()
                        .map(|iso| date_part(iso).to_string())
                        .unwrap_or_default(),
                );
            }
            None => {
                ctx.notifier.push(
                    "Task data not found. Please refresh the page.",
                    NoticeKind::Error,
                );
                ctx.close_editor();
            }
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(task_id) = ctx.editing_task.get_untracked() else {
            return;
        };
        let title_value = title.get();
        if title_value.trim().is_empty() {
            ctx.notifier
                .push("Task title is required", NoticeKind::Error);
            return;
        }
        let edit = TaskEdit {
            title: title_value,
            description: description.get(),
            assignee_id: assignee_id.get().unwrap_or_default(),
            priority: priority.get(),
            complexity: complexity.get(),
            task_status: status.get(),
            team_id: team_id.get(),
            estimated_hours: estimated_hours.get(),
            started_at: started_at.get(),
            due_date: due_date.get(),
            completed_at: completed_at.get(),
        };
        spawn_local(async move {
            match api::update_task_details(&task_id, &edit).await {
                Ok(()) => {
                    ctx.notifier
                        .push("Task updated successfully!", NoticeKind::Success);
                    ctx.close_editor();
                    ctx.reload();
                }
                Err(err) => {
                    if err.is_transport() {
                        web_sys::console::error_1(
                            &format!("[BOARD] Failed to update task {task_id}: {err}").into(),
                        );
                    }
                    ctx.notifier.push(err.user_message(), NoticeKind::Error);
                }
            }
        });
    };

    let on_estimate_save = move |_| {
        let Some(task_id) = ctx.editing_task.get_untracked() else {
            return;
        };
        let Ok(hours) = estimated_hours.get_untracked().trim().parse::<f64>() else {
            ctx.notifier
                .push("Enter a valid number of hours", NoticeKind::Warning);
            return;
        };
        spawn_local(async move {
            match api::update_task_estimate(&task_id, hours).await {
                Ok(message) => {
                    ctx.notifier.push(
                        message.unwrap_or_else(|| "Estimate updated".to_string()),
                        NoticeKind::Success,
                    );
                }
                Err(err) => {
                    if err.is_transport() {
                        web_sys::console::error_1(
                            &format!("[BOARD] Failed to update estimate for task {task_id}: {err}")
                                .into(),
                        );
                    }
                    ctx.notifier.push(err.user_message(), NoticeKind::Error);
                }
            }
        });
    };

    let on_delete = move |_: ()| {
        let Some(task_id) = ctx.editing_task.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::delete_task(&task_id).await {
                Ok(()) => {
                    store::store_remove_task(&store, &task_id);
                    ctx.notifier
                        .push("Task deleted successfully!", NoticeKind::Success);
                    ctx.close_editor();
                    ctx.reload();
                }
                Err(err) => {
                    if err.is_transport() {
                        web_sys::console::error_1(
                            &format!("[BOARD] Failed to delete task {task_id}: {err}").into(),
                        );
                    }
                    ctx.notifier.push(err.user_message(), NoticeKind::Error);
                }
            }
        });
    };

    view! {
        <Show when=move || ctx.editing_task.get().is_some()>
            <aside class="edit-panel">
                <div class="edit-panel-header">
                    <h4>"Edit Task"</h4>
                    <button type="button" class="close-btn" on:click=move |_| ctx.close_editor()>"×"</button>
                </div>

                <form class="edit-task-form" on:submit=on_submit>
                    <label>
                        "Title"
                        <input
                            type="text"
                            prop:value=move || title.get()
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                        />
                    </label>

                    <label>
                        "Description"
                        <textarea
                            prop:value=move || description.get()
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                        />
                    </label>

                    <label>
                        "Assignee"
                        <AssigneeAutocomplete
                            query=assignee_query
                            set_query=set_assignee_query
                            on_select=move |id| set_assignee_id.set(id)
                        />
                    </label>

                    <label>
                        "Priority"
                        <select
                            prop:value=move || priority.get()
                            on:change=move |ev| set_priority.set(event_target_value(&ev))
                        >
                            {TaskPriority::ALL.iter().map(|p| view! {
                                <option value=p.as_str()>{p.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <label>
                        "Complexity"
                        <select
                            prop:value=move || complexity.get()
                            on:change=move |ev| set_complexity.set(event_target_value(&ev))
                        >
                            {COMPLEXITIES.iter().map(|(value, label)| view! {
                                <option value=*value>{*label}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <label>
                        "Status"
                        <select
                            prop:value=move || status.get()
                            on:change=move |ev| set_status.set(event_target_value(&ev))
                        >
                            {TaskStatus::ALL.iter().map(|s| view! {
                                <option value=s.as_str()>{s.title()}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <label>
                        "Estimated hours"
                        <div class="estimate-row">
                            <input
                                type="number"
                                step="0.5"
                                min="0"
                                prop:value=move || estimated_hours.get()
                                on:input=move |ev| set_estimated_hours.set(event_target_value(&ev))
                            />
                            <button type="button" class="estimate-save-btn" on:click=on_estimate_save>
                                "Save estimate"
                            </button>
                        </div>
                    </label>

                    <label>
                        "Started"
                        <input
                            type="date"
                            prop:value=move || started_at.get()
                            on:input=move |ev| set_started_at.set(event_target_value(&ev))
                        />
                    </label>

                    <label>
                        "Due"
                        <input
                            type="date"
                            prop:value=move || due_date.get()
                            on:input=move |ev| set_due_date.set(event_target_value(&ev))
                        />
                    </label>

                    <label>
                        "Completed"
                        <input
                            type="date"
                            prop:value=move || completed_at.get()
                            on:input=move |ev| set_completed_at.set(event_target_value(&ev))
                        />
                    </label>

                    <div class="edit-panel-actions">
                        <button type="submit">"Update Task"</button>
                        <DeleteConfirmButton
                            button_class="delete-btn"
                            label="Delete"
                            on_confirm=on_delete
                        />
                    </div>
                </form>

                {move || ctx.editing_task.get().map(|task_id| view! {
                    <AttachmentList task_id=task_id />
                })}
            </aside>
        </Show>
    }
}
