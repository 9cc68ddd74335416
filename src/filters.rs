//! Task Visibility Filters
//!
//! Pure predicates over the task list. Column membership and badge counts
//! derive from (tasks, filter), so they can never drift from what is
//! actually rendered.

use crate::models::{Task, TaskStatus};

/// Active board filters. `current_user` backs the "my tasks" toggle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskFilter {
    pub query: String,
    pub mine_only: bool,
    pub current_user: Option<String>,
}

impl TaskFilter {
    /// Case-insensitive substring match over title and description;
    /// an empty query matches everything
    pub fn matches(&self, task: &Task) -> bool {
        let query = self.query.trim().to_lowercase();
        let text_ok = query.is_empty()
            || task.title.to_lowercase().contains(&query)
            || task.description.to_lowercase().contains(&query);
        let mine_ok = !self.mine_only
            || (task.assignee_id.is_some() && task.assignee_id == self.current_user);
        text_ok && mine_ok
    }
}

/// Visible cards of one column, in task-list order
pub fn visible_in_column<'a>(
    tasks: &'a [Task],
    status: TaskStatus,
    filter: &TaskFilter,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| task.status == status && filter.matches(task))
        .collect()
}

/// Badge count of one column
pub fn column_count(tasks: &[Task], status: TaskStatus, filter: &TaskFilter) -> usize {
    visible_in_column(tasks, status, filter).len()
}

/// Badge counts for every column, in board order
pub fn column_counts(tasks: &[Task], filter: &TaskFilter) -> [(TaskStatus, usize); 4] {
    TaskStatus::ALL.map(|status| (status, column_count(tasks, status, filter)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;

    fn make_task(id: &str, title: &str, status: TaskStatus, assignee: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            complexity: "medium".to_string(),
            assignee_id: assignee.map(str::to_string),
            created_by: "1".to_string(),
            team_id: None,
            estimated_hours: None,
            actual_hours: None,
            started_at: None,
            due_date: None,
            completed_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn board() -> Vec<Task> {
        vec![
            make_task("1", "Fix login flow", TaskStatus::Todo, Some("3")),
            make_task("2", "Write docs", TaskStatus::Todo, Some("4")),
            make_task("3", "Refactor search", TaskStatus::InProgress, Some("3")),
            make_task("4", "Ship release", TaskStatus::Completed, None),
        ]
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let filter = TaskFilter::default();
        for task in board() {
            assert!(filter.matches(&task));
        }
    }

    #[test]
    fn test_query_matches_title_and_description() {
        let mut task = make_task("1", "Fix login flow", TaskStatus::Todo, None);
        task.description = "OAuth redirect loops".to_string();
        let filter = TaskFilter {
            query: "LOGIN".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&task));
        let filter = TaskFilter {
            query: "redirect".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&task));
        let filter = TaskFilter {
            query: "billing".to_string(),
            ..Default::default()
        };
        assert!(!filter.matches(&task));
    }

    #[test]
    fn test_mine_only_requires_matching_assignee() {
        let filter = TaskFilter {
            mine_only: true,
            current_user: Some("3".to_string()),
            ..Default::default()
        };
        let tasks = board();
        assert!(filter.matches(&tasks[0]));
        assert!(!filter.matches(&tasks[1]));
        // unassigned tasks are never "mine"
        assert!(!filter.matches(&tasks[3]));
    }

    #[test]
    fn test_filters_compose() {
        let filter = TaskFilter {
            query: "refactor".to_string(),
            mine_only: true,
            current_user: Some("3".to_string()),
        };
        let tasks = board();
        let visible = visible_in_column(&tasks, TaskStatus::InProgress, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "3");
        assert!(visible_in_column(&tasks, TaskStatus::Todo, &filter).is_empty());
    }

    #[test]
    fn test_column_counts_cover_every_column() {
        let tasks = board();
        let counts = column_counts(&tasks, &TaskFilter::default());
        assert_eq!(counts[0], (TaskStatus::Todo, 2));
        assert_eq!(counts[1], (TaskStatus::InProgress, 1));
        assert_eq!(counts[2], (TaskStatus::InReview, 0));
        assert_eq!(counts[3], (TaskStatus::Completed, 1));
    }

    #[test]
    fn test_counts_are_idempotent_under_recomputation() {
        let tasks = board();
        let filter = TaskFilter {
            query: "o".to_string(),
            ..Default::default()
        };
        let first = column_counts(&tasks, &filter);
        let second = column_counts(&tasks, &filter);
        assert_eq!(first, second);
    }
}
