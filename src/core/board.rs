use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::notation::{self, TiePrecedence};
use super::task::Task;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board is full ({limit} tasks)")]
    Full { limit: usize },
}

/// The in-memory task list and every mutation the UI can apply to it.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    precedence: TiePrecedence,
    max_tasks: Option<usize>,
}

impl TaskBoard {
    pub fn new(precedence: TiePrecedence, max_tasks: Option<usize>) -> Self {
        Self {
            tasks: Vec::new(),
            precedence,
            max_tasks,
        }
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

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Appends a new incomplete task. The text is stored as given, empty included.
    pub fn add_task(&mut self, text: impl Into<String>, now: DateTime<Utc>) -> Result<Uuid, BoardError> {
        if let Some(limit) = self.max_tasks {
            if self.tasks.len() >= limit {
                return Err(BoardError::Full { limit });
            }
        }
        let task = Task::new(text, now);
        let id = task.id;
        self.tasks.push(task);
        Ok(id)
    }

    /// Adds the input text as a task and clears the input. On error the input is kept.
    pub fn add_from_input(&mut self, input: &mut String, now: DateTime<Utc>) -> Result<Uuid, BoardError> {
        let id = self.add_task(input.as_str(), now)?;
        input.clear();
        Ok(id)
    }

    /// Flips completion. Completing freezes the duration at `now`.
    /// Returns false when no task has `id`.
    pub fn toggle(&mut self, id: Uuid, now: DateTime<Utc>) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        if task.completed {
            task.duration = Some(task.elapsed(now));
        }
        self.recompute_notations();
        true
    }

    pub fn toggle_at(&mut self, index: usize, now: DateTime<Utc>) -> bool {
        match self.tasks.get(index).map(|t| t.id) {
            Some(id) => self.toggle(id, now),
            None => false,
        }
    }

    pub fn delete(&mut self, id: Uuid) -> Option<Task> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        self.recompute_notations();
        Some(removed)
    }

    pub fn delete_at(&mut self, index: usize) -> Option<Task> {
        let id = self.tasks.get(index)?.id;
        self.delete(id)
    }

    /// Swaps in a freshly loaded list. Nothing is merged.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.recompute_notations();
    }

    /// One recomputation pass: durations first, then notations from the same snapshot.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for task in self.tasks.iter_mut().filter(|t| !t.completed) {
            task.duration = Some(task.elapsed(now));
        }
        self.recompute_notations();
    }

    fn recompute_notations(&mut self) {
        notation::annotate(&mut self.tasks, self.precedence);
    }
}
