//! UI Components
//!
//! Leptos components for the board and team views.

mod assignee_autocomplete;
mod attachment_list;
mod board_column;
mod board_view;
mod delete_confirm_button;
mod edit_task_panel;
mod notification_stack;
mod search_bar;
mod task_card;
mod task_form;
mod team_roster;

pub use assignee_autocomplete::AssigneeAutocomplete;
pub use attachment_list::AttachmentList;
pub use board_column::BoardColumn;
pub use board_view::BoardView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use edit_task_panel::EditTaskPanel;
pub use notification_stack::NotificationStack;
pub use search_bar::SearchBar;
pub use task_card::TaskCard;
pub use task_form::TaskForm;
pub use team_roster::TeamRoster;
