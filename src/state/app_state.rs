//! Main application state management

use std::sync::{Arc, Mutex, MutexGuard};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};

use super::{
    flash_cards::{FlashCard, FlashDeck, FLASH_CARDS_KEY},
    pomodoro::Pomodoro,
    task_list::{Task, TaskList, TASKS_KEY},
};
use crate::services::{KeyValueStore, Notifier};

/// Shared state behind every widget endpoint
pub struct AppState {
    pub pomodoro: Pomodoro,
    tasks: Mutex<TaskList>,
    flash_cards: Mutex<FlashDeck>,
    store: Arc<dyn KeyValueStore>,
    pub notifier: Notifier,
}

impl AppState {
    /// Create the state and load the persisted task list and deck
    pub fn new(pomodoro_minutes: u64, store: Arc<dyn KeyValueStore>, notifier: Notifier) -> Self {
        let tasks: Vec<Task> = load_collection(
            store.as_ref(),
            &notifier,
            TASKS_KEY,
            "Error getting stored tasks!",
        );
        let cards: Vec<FlashCard> = load_collection(
            store.as_ref(),
            &notifier,
            FLASH_CARDS_KEY,
            "Error Getting Flash Cards",
        );
        info!("Loaded {} tasks and {} flash cards", tasks.len(), cards.len());

        Self {
            pomodoro: Pomodoro::new(pomodoro_minutes, notifier.clone()),
            tasks: Mutex::new(TaskList::from_tasks(tasks)),
            flash_cards: Mutex::new(FlashDeck::from_cards(cards)),
            store,
            notifier,
        }
    }

    /// Cancel background work owned by the widgets
    pub fn shutdown(&self) {
        self.pomodoro.shutdown();
    }

    fn lock_tasks(&self) -> Result<MutexGuard<'_, TaskList>, String> {
        self.tasks.lock()
            .map_err(|e| format!("Failed to lock task list: {}", e))
    }

    fn lock_flash_cards(&self) -> Result<MutexGuard<'_, FlashDeck>, String> {
        self.flash_cards.lock()
            .map_err(|e| format!("Failed to lock flash cards: {}", e))
    }

    fn persist<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), String> {
        let value = serde_json::to_string(items)
            .map_err(|e| format!("Failed to serialize {}: {}", key, e))?;
        self.store.set(key, &value)
    }

    /// Get all tasks in creation order
    pub fn list_tasks(&self) -> Result<Vec<Task>, String> {
        Ok(self.lock_tasks()?.tasks().to_vec())
    }

    /// Create a task and persist the list
    pub fn add_task(&self, text: String) -> Result<Task, String> {
        let mut tasks = self.lock_tasks()?;
        let mut updated = tasks.clone();
        let Some(task) = updated.add(text) else {
            warn!("Task ids are exhausted, refusing to create a task");
            self.notifier.error("Error creating task");
            return Err("No task ids left".to_string());
        };

        if let Err(e) = self.persist(TASKS_KEY, updated.tasks()) {
            error!("Failed to persist new task: {}", e);
            self.notifier.error("Error creating task");
            return Err(e);
        }

        *tasks = updated;
        drop(tasks);
        debug!("Created task #{}", task.id);
        self.notifier.success("Task created!");
        Ok(task)
    }

    /// Flip a task's completion. `Ok(None)` when no task has this id.
    pub fn toggle_task(&self, id: u64) -> Result<Option<Task>, String> {
        let mut tasks = self.lock_tasks()?;
        let mut updated = tasks.clone();
        let Some(task) = updated.toggle(id) else {
            return Ok(None);
        };

        if let Err(e) = self.persist(TASKS_KEY, updated.tasks()) {
            error!("Failed to persist task #{}: {}", id, e);
            self.notifier.error("Error updating task");
            return Err(e);
        }

        *tasks = updated;
        drop(tasks);
        if task.completed {
            self.notifier.success("Task Completed!");
        } else {
            self.notifier.warning("Task is not completed!");
        }
        Ok(Some(task))
    }

    /// Delete a task. `Ok(None)` when no task has this id.
    pub fn delete_task(&self, id: u64) -> Result<Option<Task>, String> {
        let mut tasks = self.lock_tasks()?;
        let mut updated = tasks.clone();
        let Some(task) = updated.remove(id) else {
            return Ok(None);
        };

        if let Err(e) = self.persist(TASKS_KEY, updated.tasks()) {
            error!("Failed to persist deletion of task #{}: {}", id, e);
            self.notifier.error("Error deleting task");
            return Err(e);
        }

        *tasks = updated;
        drop(tasks);
        self.notifier.success("Task deleted!");
        Ok(Some(task))
    }

    pub fn list_flash_cards(&self) -> Result<Vec<FlashCard>, String> {
        Ok(self.lock_flash_cards()?.cards().to_vec())
    }

    /// Create a flash card and persist the deck
    pub fn add_flash_card(&self, question: String, answer: String) -> Result<FlashCard, String> {
        let mut deck = self.lock_flash_cards()?;
        let mut updated = deck.clone();
        let Some(card) = updated.add(question, answer) else {
            warn!("Flash card ids are exhausted, refusing to create a card");
            self.notifier.error("Error Creating Flash Card");
            return Err("No flash card ids left".to_string());
        };

        if let Err(e) = self.persist(FLASH_CARDS_KEY, updated.cards()) {
            error!("Failed to persist new flash card: {}", e);
            self.notifier.error("Error Creating Flash Card");
            return Err(e);
        }

        *deck = updated;
        drop(deck);
        debug!("Created flash card #{}", card.id);
        self.notifier.success("Flash Card Created!");
        Ok(card)
    }

    /// Turn a card over. `Ok(None)` when no card has this id.
    pub fn flip_flash_card(&self, id: u64) -> Result<Option<FlashCard>, String> {
        let mut deck = self.lock_flash_cards()?;
        let mut updated = deck.clone();
        let Some(card) = updated.flip(id) else {
            return Ok(None);
        };

        // Flipping is silent; only a failure is surfaced
        if let Err(e) = self.persist(FLASH_CARDS_KEY, updated.cards()) {
            error!("Failed to persist flash card #{}: {}", id, e);
            self.notifier.error("Error Flipping Flash Card");
            return Err(e);
        }

        *deck = updated;
        Ok(Some(card))
    }

    /// Delete a card. `Ok(None)` when no card has this id.
    pub fn delete_flash_card(&self, id: u64) -> Result<Option<FlashCard>, String> {
        let mut deck = self.lock_flash_cards()?;
        let mut updated = deck.clone();
        let Some(card) = updated.remove(id) else {
            return Ok(None);
        };

        if let Err(e) = self.persist(FLASH_CARDS_KEY, updated.cards()) {
            error!("Failed to persist deletion of flash card #{}: {}", id, e);
            self.notifier.error("Error Deleting Flash Card");
            return Err(e);
        }

        *deck = updated;
        drop(deck);
        self.notifier.warning("Deleted Flash Card!");
        Ok(Some(card))
    }
}

/// Read a JSON array stored under `key`.
///
/// Missing data yields an empty collection. Unreadable or malformed data is
/// reported through the notifier and also treated as empty.
fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    notifier: &Notifier,
    key: &str,
    error_message: &str,
) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored value for {}", key);
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read {} from store: {}", key, e);
            notifier.error(error_message);
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Stored {} could not be parsed: {}", key, e);
            notifier.error(error_message);
            Vec::new()
        }
    }
}
