//! New Task Form Component
//!
//! Form for creating tasks: title, description, assignee, priority.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::AssigneeAutocomplete;
use crate::context::AppContext;
use crate::models::TaskPriority;
use crate::notify::NoticeKind;

#[component]
pub fn TaskForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (assignee_query, set_assignee_query) = signal(String::new());
    let (assignee_id, set_assignee_id) = signal::<Option<String>>(None);
    let (priority, set_priority) = signal(TaskPriority::Medium.as_str().to_string());

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title_value = title.get();
        if title_value.trim().is_empty() {
            return;
        }
        let description_value = description.get();
        let assignee = assignee_id.get().unwrap_or_default();
        let priority_value = priority.get();

        spawn_local(async move {
            match api::create_task(&title_value, &description_value, &assignee, &priority_value)
                .await
            {
                Ok(()) => {
                    set_title.set(String::new());
                    set_description.set(String::new());
                    set_assignee_query.set(String::new());
                    set_assignee_id.set(None);
                    ctx.notifier
                        .push("Task created successfully!", NoticeKind::Success);
                    ctx.reload();
                }
                Err(err) => {
                    if err.is_transport() {
                        web_sys::console::error_1(
                            &format!("[BOARD] Failed to create task: {err}").into(),
                        );
                    }
                    ctx.notifier.push(err.user_message(), NoticeKind::Error);
                }
            }
        });
    };

    view! {
        <form class="new-task-form" on:submit=create_task>
            <div class="new-task-row">
                <input
                    type="text"
                    placeholder="Add new task..."
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </div>

            <div class="new-task-row">
                <input
                    type="text"
                    placeholder="Description (optional)"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />
                <AssigneeAutocomplete
                    query=assignee_query
                    set_query=set_assignee_query
                    on_select=move |id| set_assignee_id.set(id)
                />
            </div>

            <div class="priority-selector-row">
                {TaskPriority::ALL.iter().map(|p| {
                    let value = p.as_str();
                    let is_selected = move || priority.get() == value;
                    view! {
                        <button
                            type="button"
                            class=move || if is_selected() { "priority-btn small active" } else { "priority-btn small" }
                            on:click=move |_| set_priority.set(value.to_string())
                        >
                            {p.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
        </form>
    }
}
