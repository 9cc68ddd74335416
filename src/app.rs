//! Main Application Component
//!
//! Wires up the store, shared context and background polling, then renders
//! the active view with the edit panel and notification stack on top.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{BoardView, EditTaskPanel, NotificationStack, TeamRoster};
use crate::config;
use crate::context::{AppContext, AppView};
use crate::notify::Notifier;
use crate::store::{self, BoardState, BoardStateStoreFields, BoardStore};
use crate::transitions;

/// Active time log poll interval
const ACTIVE_LOG_POLL_MS: u32 = 30_000;

#[component]
pub fn App() -> impl IntoView {
    let store: BoardStore = Store::new(BoardState::default());
    provide_context(store);

    let reload_trigger = signal(0u32);
    let view_mode = signal(AppView::Board);
    let editing_task = signal::<Option<String>>(None);
    let (now_ms, set_now_ms) = signal(js_sys::Date::now());

    let ctx = AppContext::new(reload_trigger, view_mode, editing_task, now_ms, Notifier::new());
    provide_context(ctx);
    transitions::provide_ledger();

    store.current_user_id().set(config::current_user_id());

    // Load board data on start and whenever a reload is requested
    Effect::new(move |_| {
        ctx.reload_trigger.get();
        spawn_local(async move {
            match api::fetch_tasks().await {
                Ok(tasks) => store.tasks().set(tasks),
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[APP] Failed to load tasks: {err}").into(),
                    );
                }
            }
            match api::fetch_users().await {
                Ok(users) => store.users().set(users),
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[APP] Failed to load users: {err}").into(),
                    );
                }
            }
        });
        store::sync_active_log(store);
    });

    Interval::new(ACTIVE_LOG_POLL_MS, move || store::sync_active_log(store)).forget();
    Interval::new(1_000, move || set_now_ms.set(js_sys::Date::now())).forget();

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"TaskFlow"</h1>
                <nav class="app-nav">
                    <button
                        class=move || nav_class(ctx.view.get() == AppView::Board)
                        on:click=move |_| ctx.switch_view(AppView::Board)
                    >
                        "Board"
                    </button>
                    <button
                        class=move || nav_class(ctx.view.get() == AppView::Team)
                        on:click=move |_| ctx.switch_view(AppView::Team)
                    >
                        "Team"
                    </button>
                </nav>
            </header>

            <main class="app-main">
                {move || match ctx.view.get() {
                    AppView::Board => view! { <BoardView /> }.into_any(),
                    AppView::Team => view! { <TeamRoster /> }.into_any(),
                }}
            </main>

            <EditTaskPanel />
            <NotificationStack />
        </div>
    }
}

fn nav_class(active: bool) -> &'static str {
    if active {
        "nav-btn active"
    } else {
        "nav-btn"
    }
}
