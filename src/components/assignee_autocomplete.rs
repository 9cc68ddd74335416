//! Assignee Autocomplete Component
//!
//! User picker with fuzzy search suggestions and keyboard navigation.
//! The parent owns the query text; selection is reported as a user id.

use leptos::prelude::*;

use crate::store::{use_board_store, BoardStateStoreFields};

/// Simple fuzzy match: check if query chars appear in order in the target
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let mut target_chars = target.chars();
    for query_char in query.chars() {
        loop {
            match target_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

/// Assignee input with suggestions
///
/// Props:
/// - query/set_query: the input text, owned by the parent so it can prefill
///   and clear it
/// - on_select: Some(user_id) when a suggestion is picked, None when the
///   text is edited afterwards
#[component]
pub fn AssigneeAutocomplete(
    query: ReadSignal<String>,
    set_query: WriteSignal<String>,
    #[prop(into)] on_select: Callback<Option<String>>,
) -> impl IntoView {
    let store = use_board_store();
    let (open, set_open) = signal(false);
    let (selected_idx, set_selected_idx) = signal(0usize);

    let suggestions = move || {
        let current = query.get();
        let current = current.trim();
        if !open.get() || current.is_empty() {
            return vec![];
        }
        store
            .users()
            .get()
            .into_iter()
            .filter(|user| {
                fuzzy_match(current, user.name()) || fuzzy_match(current, &user.username)
            })
            .take(5)
            .collect::<Vec<_>>()
    };

    let pick = move |user_id: String, name: String| {
        set_query.set(name);
        set_open.set(false);
        set_selected_idx.set(0);
        on_select.run(Some(user_id));
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        let sugg = suggestions();

        match key.as_str() {
            "Tab" => {
                if !sugg.is_empty() {
                    ev.prevent_default();
                    let sel = selected_idx.get();
                    if sel < sugg.len() {
                        pick(sugg[sel].id.clone(), sugg[sel].name().to_string());
                    }
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel > 0 {
                    set_selected_idx.set(sel - 1);
                }
            }
            _ => {}
        }
    };

    view! {
        <div class="assignee-input-wrapper">
            <input
                type="text"
                placeholder="Assignee..."
                autocomplete="off"
                prop:value=move || query.get()
                on:input=move |ev| {
                    set_query.set(event_target_value(&ev));
                    set_open.set(true);
                    set_selected_idx.set(0);
                    // typed text invalidates any previous pick
                    on_select.run(None);
                }
                on:keydown=on_keydown
            />

            {move || {
                let sugg = suggestions();
                if sugg.is_empty() {
                    view! { <div></div> }.into_any()
                } else {
                    let selected = selected_idx.get();
                    view! {
                        <div class="autocomplete-list">
                            {sugg.into_iter().enumerate().map(|(i, user)| {
                                let user_id = user.id.clone();
                                let name = user.name().to_string();
                                let shown = name.clone();
                                let is_selected = i == selected;
                                view! {
                                    <button
                                        type="button"
                                        class=if is_selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            pick(user_id.clone(), name.clone());
                                        }
                                    >
                                        {shown}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
