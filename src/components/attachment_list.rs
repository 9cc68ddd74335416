//! Attachment List Component
//!
//! Existing attachments of a task plus a file-input upload. Type and size
//! validation is the backend's job; failures surface as notifications.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::context::AppContext;
use crate::models::TaskAttachment;
use crate::notify::NoticeKind;

#[component]
pub fn AttachmentList(task_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = StoredValue::new(task_id);
    let (attachments, set_attachments) = signal(Vec::<TaskAttachment>::new());

    Effect::new(move |_| {
        let task_id = id.get_value();
        spawn_local(async move {
            match api::fetch_attachments(&task_id).await {
                Ok(list) => set_attachments.set(list),
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[ATTACH] Failed to load attachments for task {task_id}: {err}")
                            .into(),
                    );
                }
            }
        });
    });

    let on_file_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        let task_id = id.get_value();
        spawn_local(async move {
            match api::upload_attachment(&task_id, &file).await {
                Ok(attachment) => {
                    ctx.notifier
                        .push("Attachment uploaded!", NoticeKind::Success);
                    set_attachments.update(|list| list.push(attachment));
                }
                Err(err) => {
                    if err.is_transport() {
                        web_sys::console::error_1(
                            &format!("[ATTACH] Upload failed for task {task_id}: {err}").into(),
                        );
                    }
                    ctx.notifier.push(err.user_message(), NoticeKind::Error);
                }
            }
        });
    };

    view! {
        <div class="attachment-list">
            <h6>"Attachments"</h6>
            <For
                each=move || attachments.get()
                key=|attachment| attachment.id.clone()
                children=|attachment| {
                    let size = attachment.human_size();
                    view! {
                        <div class="attachment-row">
                            <span class="attachment-name">{attachment.original_filename.clone()}</span>
                            <span class="attachment-size">{size}</span>
                        </div>
                    }
                }
            />
            <input type="file" class="attachment-upload" on:change=on_file_change />
        </div>
    }
}
