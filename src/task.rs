use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Signed 64-bit, so any integer id that fits in an `i64` loads.
pub type TaskId = i64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// The to-do list, kept in creation order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Appends a new incomplete task and returns its id.
    ///
    /// Blank text is rejected with `None`. The id is one past the largest id
    /// currently in the list, so ids freed by deletion at the tail get reused.
    /// When the largest id is already `TaskId::MAX` nothing is added.
    pub fn add_task(&mut self, text: impl Into<String>) -> Option<TaskId> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let Some(id) = max.checked_add(1) else {
            warn!(max, "task id space exhausted, task not added");
            return None;
        };
        debug!(id, "task added");
        self.tasks.push(Task {
            id,
            text,
            completed: false,
        });
        Some(id)
    }

    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!(id, completed = task.completed, "task toggled");
                true
            }
            None => false,
        }
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!(id, "task deleted");
        }
        removed
    }

    pub fn list_incomplete(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    pub fn list_completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }
}
