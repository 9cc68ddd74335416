//! Team Member Statistics
//!
//! Per-member task stats and roster filtering/sorting, all pure functions
//! over the store snapshot.

use crate::models::{Task, TaskStatus, User};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemberStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Assigned and not yet completed
    pub active_tasks: usize,
    /// Percent, 0.0 when no tasks are assigned
    pub completion_rate: f64,
}

pub fn member_stats(user_id: &str, tasks: &[Task]) -> MemberStats {
    let assigned: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.assignee_id.as_deref() == Some(user_id))
        .collect();
    let total_tasks = assigned.len();
    let completed_tasks = assigned
        .iter()
        .filter(|task| task.status == TaskStatus::Completed)
        .count();
    let completion_rate = if total_tasks > 0 {
        completed_tasks as f64 / total_tasks as f64 * 100.0
    } else {
        0.0
    };
    MemberStats {
        total_tasks,
        completed_tasks,
        active_tasks: total_tasks - completed_tasks,
        completion_rate,
    }
}

/// Roster sort keys. Name and role sort ascending, task and completion
/// figures descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSort {
    Name,
    Role,
    Tasks,
    Completion,
}

impl RosterSort {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(RosterSort::Name),
            "role" => Some(RosterSort::Role),
            "tasks" => Some(RosterSort::Tasks),
            "completion" => Some(RosterSort::Completion),
            _ => None,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            RosterSort::Name => "name",
            RosterSort::Role => "role",
            RosterSort::Tasks => "tasks",
            RosterSort::Completion => "completion",
        }
    }
}

/// Roles the backend accepts for a role update
pub const ASSIGNABLE_ROLES: &[&str] = &["member", "manager"];

/// Changing roles is a manager affordance; everyone else gets a read-only
/// roster
pub fn can_manage_roles(current_user_id: Option<&str>, users: &[User]) -> bool {
    current_user_id
        .and_then(|id| users.iter().find(|user| user.id == id))
        .is_some_and(|user| user.role == "manager")
}

/// Roster search (name/username substring) and role filter; empty filter
/// values match everyone
pub fn member_matches(user: &User, query: &str, role_filter: &str) -> bool {
    let query = query.trim().to_lowercase();
    let search_ok = query.is_empty()
        || user.name().to_lowercase().contains(&query)
        || user.username.to_lowercase().contains(&query);
    let role_ok = role_filter.is_empty() || user.role.to_lowercase().contains(role_filter);
    search_ok && role_ok
}

pub fn sort_roster(users: &mut [User], tasks: &[Task], sort: RosterSort) {
    match sort {
        RosterSort::Name => {
            users.sort_by(|a, b| a.name().to_lowercase().cmp(&b.name().to_lowercase()));
        }
        RosterSort::Role => {
            users.sort_by(|a, b| a.role.cmp(&b.role));
        }
        RosterSort::Tasks => {
            users.sort_by(|a, b| {
                let a_total = member_stats(&a.id, tasks).total_tasks;
                let b_total = member_stats(&b.id, tasks).total_tasks;
                b_total.cmp(&a_total)
            });
        }
        RosterSort::Completion => {
            users.sort_by(|a, b| {
                let a_rate = member_stats(&a.id, tasks).completion_rate;
                let b_rate = member_stats(&b.id, tasks).completion_rate;
                b_rate.partial_cmp(&a_rate).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;

    fn make_task(id: &str, status: TaskStatus, assignee: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
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

    fn make_user(id: &str, name: &str, role: &str) -> User {
        User {
            id: id.to_string(),
            username: name.to_lowercase(),
            display_name: Some(name.to_string()),
            email: None,
            role: role.to_string(),
            team_id: None,
        }
    }

    fn board() -> Vec<Task> {
        vec![
            make_task("1", TaskStatus::Completed, Some("a")),
            make_task("2", TaskStatus::InProgress, Some("a")),
            make_task("3", TaskStatus::Todo, Some("a")),
            make_task("4", TaskStatus::Completed, Some("b")),
            make_task("5", TaskStatus::Todo, None),
        ]
    }

    #[test]
    fn test_member_stats() {
        let stats = member_stats("a", &board());
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.active_tasks, 2);
        assert!((stats.completion_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_tasks_means_zero_completion_rate() {
        let stats = member_stats("nobody", &board());
        assert_eq!(stats, MemberStats::default());
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let mut users = vec![
            make_user("a", "Zoe", "member"),
            make_user("b", "adam", "manager"),
        ];
        sort_roster(&mut users, &board(), RosterSort::Name);
        assert_eq!(users[0].id, "b");
    }

    #[test]
    fn test_sort_by_tasks_descending() {
        let mut users = vec![
            make_user("b", "Beth", "member"),
            make_user("a", "Ada", "member"),
            make_user("c", "Cal", "member"),
        ];
        sort_roster(&mut users, &board(), RosterSort::Tasks);
        assert_eq!(users[0].id, "a");
        assert_eq!(users[1].id, "b");
        assert_eq!(users[2].id, "c");
    }

    #[test]
    fn test_sort_by_completion_descending() {
        let mut users = vec![
            make_user("a", "Ada", "member"),
            make_user("b", "Beth", "member"),
        ];
        sort_roster(&mut users, &board(), RosterSort::Completion);
        // b completed 1 of 1, a completed 1 of 3
        assert_eq!(users[0].id, "b");
    }

    #[test]
    fn test_sort_by_role() {
        let mut users = vec![
            make_user("a", "Ada", "member"),
            make_user("b", "Beth", "manager"),
        ];
        sort_roster(&mut users, &board(), RosterSort::Role);
        assert_eq!(users[0].role, "manager");
    }

    #[test]
    fn test_member_matches() {
        let user = make_user("a", "Ada Lovelace", "manager");
        assert!(member_matches(&user, "", ""));
        assert!(member_matches(&user, "love", ""));
        assert!(member_matches(&user, "", "manager"));
        assert!(!member_matches(&user, "grace", ""));
        assert!(!member_matches(&user, "ada", "member"));
    }

    #[test]
    fn test_only_managers_can_change_roles() {
        let users = vec![
            make_user("a", "Ada", "manager"),
            make_user("b", "Beth", "member"),
        ];
        assert!(can_manage_roles(Some("a"), &users));
        assert!(!can_manage_roles(Some("b"), &users));
        assert!(!can_manage_roles(Some("ghost"), &users));
        assert!(!can_manage_roles(None, &users));
    }

    #[test]
    fn test_assignable_roles_match_backend_contract() {
        assert_eq!(ASSIGNABLE_ROLES, &["member", "manager"]);
    }

    #[test]
    fn test_sort_key_round_trip() {
        for sort in [
            RosterSort::Name,
            RosterSort::Role,
            RosterSort::Tasks,
            RosterSort::Completion,
        ] {
            assert_eq!(RosterSort::from_key(sort.as_key()), Some(sort));
        }
        assert_eq!(RosterSort::from_key("bogus"), None);
    }
}
