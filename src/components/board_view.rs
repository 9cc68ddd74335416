//! Kanban Board View
//!
//! Search and create controls above the four status columns. One drag
//! session is shared across the whole board.

use leptos::prelude::*;
use leptos_dnd::create_dnd_signals;

use crate::components::{BoardColumn, SearchBar, TaskForm};
use crate::models::TaskStatus;

#[component]
pub fn BoardView() -> impl IntoView {
    let dnd = create_dnd_signals();

    view! {
        <div class="board-view">
            <SearchBar />
            <TaskForm />
            <div class="kanban-board">
                {TaskStatus::ALL.iter().map(|status| view! {
                    <BoardColumn status=*status dnd=dnd />
                }).collect_view()}
            </div>
        </div>
    }
}
