use crate::storage::Storage;
use crate::task::Task;
use serde::{Deserialize, Serialize};

pub const LISTS_KEY: &str = "taskLists";
pub const DEFAULT_LIST_NAME: &str = "Personal";
pub const DEFAULT_LIST_ICON: &str = "🏠";

/// A named, ordered collection of tasks. Deleting a list takes its tasks
/// with it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskList {
    pub id: u64,
    pub name: String,
    pub icon: String,
    pub tasks: Vec<Task>,
}

fn next_id(lists: &[TaskList]) -> u64 {
    lists.iter().map(|l| l.id).max().unwrap_or(0) + 1
}

pub fn default_lists() -> Vec<TaskList> {
    vec![TaskList {
        id: 1,
        name: DEFAULT_LIST_NAME.to_string(),
        icon: DEFAULT_LIST_ICON.to_string(),
        tasks: Vec::new(),
    }]
}

/// Appends a new empty list. Whitespace-only names are rejected.
pub fn create_list<'a>(lists: &'a mut Vec<TaskList>, name: &str, icon: &str) -> Option<&'a TaskList> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    lists.push(TaskList {
        id: next_id(lists),
        name: name.to_string(),
        icon: icon.to_string(),
        tasks: Vec::new(),
    });
    lists.last()
}

pub fn delete_list(lists: &mut Vec<TaskList>, id: u64) {
    lists.retain(|l| l.id != id);
}

pub fn find_list(lists: &[TaskList], id: u64) -> Option<&TaskList> {
    lists.iter().find(|l| l.id == id)
}

pub fn find_list_mut(lists: &mut [TaskList], id: u64) -> Option<&mut TaskList> {
    lists.iter_mut().find(|l| l.id == id)
}

/// Reads the persisted collection. A missing key or malformed JSON falls
/// back to a single default "Personal" list.
pub fn load_lists(storage: &dyn Storage) -> Vec<TaskList> {
    storage
        .load(LISTS_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_else(default_lists)
}

pub fn save_lists(storage: &mut dyn Storage, lists: &[TaskList]) {
    match serde_json::to_string_pretty(lists) {
        Ok(json) => storage.save(LISTS_KEY, &json),
        Err(err) => eprintln!("Failed to serialize lists: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::task;

    #[test]
    fn create_list_trims_name() {
        let mut lists = Vec::new();
        let created = create_list(&mut lists, "  Work  ", "💼").unwrap();
        assert_eq!(created.name, "Work");
        assert_eq!(created.icon, "💼");
        assert!(created.tasks.is_empty());
    }

    #[test]
    fn create_list_rejects_whitespace_only_name() {
        let mut lists = default_lists();
        assert!(create_list(&mut lists, "  ", "💼").is_none());
        assert_eq!(lists.len(), 1);
    }

    #[test]
    fn list_ids_are_unique() {
        let mut lists = default_lists();
        create_list(&mut lists, "Work", "💼");
        create_list(&mut lists, "Errands", "🛒");
        delete_list(&mut lists, 2);
        create_list(&mut lists, "Reading", "📚");

        let mut ids: Vec<u64> = lists.iter().map(|l| l.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), lists.len());
    }

    #[test]
    fn delete_list_leaves_other_lists_untouched() {
        let mut lists = Vec::new();
        create_list(&mut lists, "Work", "💼");
        create_list(&mut lists, "Home", "🏠");
        task::create_task(&mut lists[0].tasks, "write report");
        task::create_task(&mut lists[1].tasks, "water plants");

        delete_list(&mut lists, 1);

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "Home");
        assert_eq!(lists[0].tasks.len(), 1);
        assert_eq!(lists[0].tasks[0].text, "water plants");
    }

    #[test]
    fn find_list_by_id() {
        let mut lists = Vec::new();
        create_list(&mut lists, "Work", "💼");
        assert_eq!(find_list(&lists, 1).map(|l| l.name.as_str()), Some("Work"));
        assert!(find_list(&lists, 9).is_none());
        assert!(find_list_mut(&mut lists, 1).is_some());
    }

    #[test]
    fn load_lists_defaults_when_key_missing() {
        let storage = MemoryStorage::new();
        let lists = load_lists(&storage);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, 1);
        assert_eq!(lists[0].name, "Personal");
        assert!(lists[0].tasks.is_empty());
    }

    #[test]
    fn load_lists_defaults_on_malformed_json() {
        let mut storage = MemoryStorage::new();
        storage.save(LISTS_KEY, "not json at all");
        let lists = load_lists(&storage);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "Personal");
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut storage = MemoryStorage::new();
        let mut lists = default_lists();
        create_list(&mut lists, "Work", "💼");
        task::create_task(&mut lists[1].tasks, "write report");

        save_lists(&mut storage, &lists);
        let loaded = load_lists(&storage);
        assert_eq!(loaded, lists);
    }
}
