//! Daily planner task collection.
//!
//! # Invariants
//! - New tasks are inserted newest-first.
//! - Completion awards points only on the open-to-done transition; reopening
//!   a task neither awards nor deducts.

use crate::model::date_key::DateKey;
use crate::model::entry::EntryId;
use crate::model::task::Task;
use crate::store::points::{awards, PointSink};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: EntryId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks owned by `date`, in stored order.
    pub fn for_date(&self, date: &DateKey) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.date == *date).collect()
    }

    /// Creates a task for `date`. Blank titles are rejected.
    pub fn add(
        &mut self,
        title: &str,
        date: DateKey,
        points: &mut impl PointSink,
    ) -> Option<EntryId> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let task = Task::new(title, date);
        let id = task.id;
        self.tasks.insert(0, task);
        points.add_points(awards::TASK_CREATED);
        Some(id)
    }

    /// Flips completion. Returns the new state, or `None` for unknown tasks.
    pub fn toggle(&mut self, id: EntryId, points: &mut impl PointSink) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        if task.completed {
            points.add_points(awards::TASK_COMPLETED);
        }
        Some(task.completed)
    }

    pub fn delete(&mut self, id: EntryId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }
}
