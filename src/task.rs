use chrono::Local;
use serde::{Deserialize, Serialize};

/// A single actionable item. Owned by exactly one list; `id` is unique
/// within that list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub priority: bool,
    pub today: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_rate: u32,
}

fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

/// Appends a new task with all flags off. Whitespace-only text is rejected
/// and leaves the list untouched.
pub fn create_task<'a>(tasks: &'a mut Vec<Task>, text: &str) -> Option<&'a Task> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    tasks.push(Task {
        id: next_id(tasks),
        text: text.to_string(),
        completed: false,
        priority: false,
        today: false,
        created_at: Local::now().to_rfc3339(),
    });
    tasks.last()
}

pub fn toggle_completed(tasks: &mut [Task], id: u64) {
    if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
        task.completed = !task.completed;
    }
}

pub fn toggle_priority(tasks: &mut [Task], id: u64) {
    if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
        task.priority = !task.priority;
    }
}

pub fn toggle_today(tasks: &mut [Task], id: u64) {
    if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
        task.today = !task.today;
    }
}

/// Replaces the text of the matching task. Whitespace-only input or an
/// unknown id leaves everything unchanged; returns whether the edit applied.
pub fn edit_text(tasks: &mut [Task], id: u64, new_text: &str) -> bool {
    let new_text = new_text.trim();
    if new_text.is_empty() {
        return false;
    }
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.text = new_text.to_string();
            true
        }
        None => false,
    }
}

pub fn delete_task(tasks: &mut Vec<Task>, id: u64) {
    tasks.retain(|t| t.id != id);
}

/// Display order: completed last; among incomplete, priority first, then
/// today-flagged. Ties keep insertion order (stable sort over an explicit
/// key, so ordering does not depend on the host sort's quirks).
pub fn sort_for_display(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| (t.completed, !t.priority, !t.today));
    sorted
}

pub fn filter_today(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.today && !t.completed).collect()
}

pub fn filter_priority(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.priority && !t.completed).collect()
}

pub fn count_incomplete(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

pub fn compute_stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let completion_rate = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };
    TaskStats {
        total,
        completed,
        pending: total - completed,
        completion_rate,
    }
}
