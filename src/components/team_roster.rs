//! Team Roster Component
//!
//! Member cards with per-member task stats, searchable and sortable.
//! Role changes are a manager-only affordance; they post immediately and
//! refresh the board data.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::models::User;
use crate::notify::NoticeKind;
use crate::stats::{self, RosterSort, ASSIGNABLE_ROLES};
use crate::store::{use_board_store, BoardStateStoreFields};

#[component]
pub fn TeamRoster() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_board_store();

    let (query, set_query) = signal(String::new());
    let (role_filter, set_role_filter) = signal(String::new());
    let (sort, set_sort) = signal(RosterSort::Name);

    let can_manage = move || {
        stats::can_manage_roles(
            store.current_user_id().get().as_deref(),
            &store.users().get(),
        )
    };

    let roster = move || {
        let tasks = store.tasks().get();
        let q = query.get();
        let role = role_filter.get();
        let mut members: Vec<User> = store
            .users()
            .get()
            .into_iter()
            .filter(|user| stats::member_matches(user, &q, &role))
            .collect();
        stats::sort_roster(&mut members, &tasks, sort.get());
        members
    };

    let on_role_change = move |user_id: String, role: String| {
        spawn_local(async move {
            match api::update_user_role(&user_id, &role).await {
                Ok(message) => {
                    ctx.notifier.push(
                        message.unwrap_or_else(|| "Role updated".to_string()),
                        NoticeKind::Success,
                    );
                    ctx.reload();
                }
                Err(err) => {
                    if err.is_transport() {
                        web_sys::console::error_1(
                            &format!("[TEAM] Failed to update role for user {user_id}: {err}")
                                .into(),
                        );
                    }
                    ctx.notifier.push(err.user_message(), NoticeKind::Error);
                }
            }
        });
    };

    view! {
        <section class="team-roster">
            <div class="roster-controls">
                <input
                    type="text"
                    class="roster-search"
                    placeholder="Search members..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />

                <select
                    class="roster-role-filter"
                    on:change=move |ev| set_role_filter.set(event_target_value(&ev))
                >
                    <option value="">"All roles"</option>
                    {ASSIGNABLE_ROLES.iter().map(|role| view! {
                        <option value=*role>{*role}</option>
                    }).collect_view()}
                </select>

                <select
                    class="roster-sort"
                    on:change=move |ev| {
                        if let Some(picked) = RosterSort::from_key(&event_target_value(&ev)) {
                            set_sort.set(picked);
                        }
                    }
                >
                    <option value="name">"Name"</option>
                    <option value="role">"Role"</option>
                    <option value="tasks">"Tasks"</option>
                    <option value="completion">"Completion"</option>
                </select>
            </div>

            <div class="roster-grid">
                <For
                    each=roster
                    key=|user| (user.id.clone(), user.role.clone())
                    children=move |user| {
                        let user_id = user.id.clone();
                        let role_user_id = user.id.clone();
                        let current_role = user.role.clone();
                        let stats_for = move || {
                            stats::member_stats(&user_id, &store.tasks().get())
                        };
                        view! {
                            <div class="member-card">
                                <div class="member-identity">
                                    <span class="member-name">{user.name().to_string()}</span>
                                    <span class="member-username">{format!("@{}", user.username)}</span>
                                </div>

                                {move || {
                                    if can_manage() {
                                        let change_id = role_user_id.clone();
                                        view! {
                                            <select
                                                class="member-role"
                                                prop:value=current_role.clone()
                                                on:change=move |ev| {
                                                    on_role_change(change_id.clone(), event_target_value(&ev));
                                                }
                                            >
                                                {ASSIGNABLE_ROLES.iter().map(|role| view! {
                                                    <option value=*role>{*role}</option>
                                                }).collect_view()}
                                            </select>
                                        }.into_any()
                                    } else {
                                        view! {
                                            <span class="member-role">{current_role.clone()}</span>
                                        }.into_any()
                                    }
                                }}

                                <div class="member-stats">
                                    {move || {
                                        let s = stats_for();
                                        view! {
                                            <span class="stat">{format!("{} tasks", s.total_tasks)}</span>
                                            <span class="stat">{format!("{} active", s.active_tasks)}</span>
                                            <span class="stat">{format!("{:.0}% done", s.completion_rate)}</span>
                                        }
                                    }}
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            <Show when=move || roster().is_empty()>
                <p class="roster-empty">"No members match the current filters."</p>
            </Show>
        </section>
    }
}
