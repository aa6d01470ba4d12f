//! Task list widget state

use serde::{Deserialize, Serialize};

/// Storage key for the persisted task list
pub const TASKS_KEY: &str = "Tasks";

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub task: String,
    pub completed: bool,
}

/// Ordered task list with its id counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    /// `None` once every id has been handed out
    next_id: Option<u64>,
}

impl TaskList {
    /// Create an empty list; ids start at 1
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Rebuild a list from stored tasks, continuing ids after the highest one
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = match tasks.iter().map(|t| t.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self { tasks, next_id }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a new, uncompleted task. `None` when ids are exhausted.
    pub fn add(&mut self, text: String) -> Option<Task> {
        let id = self.next_id?;
        let task = Task {
            id,
            task: text,
            completed: false,
        };
        self.next_id = id.checked_add(1);
        self.tasks.push(task.clone());
        Some(task)
    }

    /// Flip completion of the task with `id`, returning the updated task
    pub fn toggle(&mut self, id: u64) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.clone())
    }

    /// Remove the task with `id`
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_continue_after_highest_stored_id() {
        let stored = vec![
            Task { id: 3, task: "read".into(), completed: false },
            Task { id: 7, task: "write".into(), completed: true },
        ];
        let mut list = TaskList::from_tasks(stored);
        assert_eq!(list.add("review".into()).unwrap().id, 8);
        assert_eq!(TaskList::from_tasks(Vec::new()).add("x".into()).unwrap().id, 1);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut list = TaskList::new();
        let first = list.add("a".into()).unwrap();
        let second = list.add("b".into()).unwrap();
        list.remove(second.id);
        assert_eq!(list.add("c".into()).unwrap().id, 3);
        assert_eq!(list.tasks()[0], first);
    }

    #[test]
    fn add_refuses_once_ids_are_exhausted() {
        let stored = vec![Task { id: u64::MAX, task: "last".into(), completed: false }];
        let mut list = TaskList::from_tasks(stored);
        assert!(list.add("overflow".into()).is_none());
        assert_eq!(list.tasks().len(), 1);

        let mut list = TaskList::from_tasks(vec![
            Task { id: u64::MAX - 1, task: "almost".into(), completed: false },
        ]);
        assert_eq!(list.add("last".into()).unwrap().id, u64::MAX);
        assert!(list.add("overflow".into()).is_none());
    }

    #[test]
    fn toggle_flips_completion() {
        let mut list = TaskList::new();
        let task = list.add("study".into()).unwrap();
        assert!(list.toggle(task.id).unwrap().completed);
        assert!(!list.toggle(task.id).unwrap().completed);
        assert!(list.toggle(99).is_none());
    }

    #[test]
    fn remove_unknown_id_leaves_list_untouched() {
        let mut list = TaskList::new();
        list.add("study".into()).unwrap();
        assert!(list.remove(42).is_none());
        assert_eq!(list.tasks().len(), 1);
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let task = Task { id: 1, task: "math".into(), completed: false };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":1,"task":"math","completed":false}"#);
    }
}
