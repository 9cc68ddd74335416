//! Notification Stack Component
//!
//! Renders the notification queue as a fixed stack of dismissible banners.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn NotificationStack() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let notifier = ctx.notifier;

    view! {
        <div class="notification-stack">
            <For
                each=move || notifier.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=format!("notification {}", notice.kind.css_class())>
                            <span class="notification-text">{notice.message.clone()}</span>
                            <button
                                type="button"
                                class="dismiss-btn"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
