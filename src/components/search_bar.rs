//! Search Bar Component
//!
//! Debounced task search plus the "my tasks" assignee filter. Both write
//! into the store; column membership and badges follow reactively.

use leptos::prelude::*;

use crate::store::{use_board_store, BoardStateStoreFields};

const SEARCH_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn SearchBar() -> impl IntoView {
    let store = use_board_store();

    let (pending, set_pending) = signal(String::new());
    // bumped per keystroke; a timeout only commits if it is still the latest
    let (generation, set_generation) = signal(0u32);

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        set_pending.set(value.clone());
        let this_generation = generation.get_untracked() + 1;
        set_generation.set(this_generation);
        gloo_timers::callback::Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            if generation.get_untracked() == this_generation {
                store.search_query().set(value);
            }
        })
        .forget();
    };

    view! {
        <div class="search-bar">
            <input
                type="search"
                class="search-input"
                placeholder="Search tasks..."
                prop:value=move || pending.get()
                on:input=on_input
            />
            <label class="my-tasks-filter">
                <input
                    type="checkbox"
                    prop:checked=move || store.mine_only().get()
                    on:change=move |ev| store.mine_only().set(event_target_checked(&ev))
                />
                "My tasks"
            </label>
        </div>
    }
}
