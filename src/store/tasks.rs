//! Task record store
//!
//! All records live as one JSON array under `activeTasks`. Every mutation
//! writes the whole new list first and only then replaces the in-memory copy,
//! so a failed write changes nothing. Newest tasks come first.

use chrono::{DateTime, Utc};

use crate::errors::{IntakeError, Result};
use crate::schemas::{NewTask, TaskRecord, TaskStatus, TaskUpdate, TotalStepsPolicy};
use crate::session::{CompletionEvent, CompletionSink};

use super::storage::KeyValueStore;

/// Storage key holding the task list
pub const TASKS_KEY: &str = "activeTasks";

/// Title used when a flow does not name its task
pub const DEFAULT_TASK_TITLE: &str = "Processing your request";

/// Task records backed by a key-value store
pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    tasks: Vec<TaskRecord>,
    total_steps: TotalStepsPolicy,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the task list from `storage`.
    ///
    /// A blob that does not parse is logged and the store starts empty; the
    /// bad blob is only overwritten by the next mutation.
    pub fn open(storage: S, total_steps: TotalStepsPolicy) -> Result<Self> {
        let tasks = match storage.get(TASKS_KEY)? {
            Some(blob) => match serde_json::from_str::<Vec<TaskRecord>>(&blob) {
                Ok(tasks) => tasks,
                Err(e) => {
                    tracing::error!(error = %e, "failed to parse stored tasks, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        tracing::debug!(count = tasks.len(), "task store opened");
        Ok(TaskStore {
            storage,
            tasks,
            total_steps,
        })
    }

    /// Create a task and return its id
    pub fn add(&mut self, task: NewTask) -> Result<String> {
        self.add_at(task, Utc::now())
    }

    /// Create a task stamped with `now`
    pub fn add_at(&mut self, task: NewTask, now: DateTime<Utc>) -> Result<String> {
        let id = self.unique_id(now.timestamp_millis());
        let record = TaskRecord::from_new(id.clone(), task, now);
        let flow_id = record.flow_id.clone();

        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(record);
        tasks.extend(self.tasks.iter().cloned());
        self.commit(tasks)?;
        tracing::info!(task = %id, flow = %flow_id, "task created");
        Ok(id)
    }

    fn unique_id(&self, millis: i64) -> String {
        let base = format!("task-{}", millis);
        if self.get(&base).is_none() {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.get(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `TaskNotFound` - If no task has this id
    pub fn update(&mut self, id: &str, update: &TaskUpdate) -> Result<&TaskRecord> {
        let index = self.position(id)?;
        let mut tasks = self.tasks.clone();
        tasks[index] = tasks[index].clone().with_update(update);
        self.commit(tasks)?;
        tracing::info!(task = %id, "task updated");
        Ok(&self.tasks[index])
    }

    /// Set the status of a task
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<&TaskRecord> {
        self.update(id, &TaskUpdate::status(status))
    }

    /// Delete a task and return it.
    ///
    /// # Errors
    /// * `TaskNotFound` - If no task has this id
    pub fn remove(&mut self, id: &str) -> Result<TaskRecord> {
        let index = self.position(id)?;
        let mut tasks = self.tasks.clone();
        let record = tasks.remove(index);
        self.commit(tasks)?;
        tracing::info!(task = %id, "task removed");
        Ok(record)
    }

    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks, newest first
    pub fn list(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| IntakeError::TaskNotFound(id.to_string()))
    }

    /// Persist `tasks`, then adopt it as the current list
    fn commit(&mut self, tasks: Vec<TaskRecord>) -> Result<()> {
        let blob =
            serde_json::to_string(&tasks).map_err(|e| IntakeError::InvalidJson(e.to_string()))?;
        if let Err(e) = self.storage.set(TASKS_KEY, &blob) {
            tracing::error!(error = %e, "failed to save tasks");
            return Err(e);
        }
        self.tasks = tasks;
        Ok(())
    }
}

impl<S: KeyValueStore> CompletionSink for TaskStore<S> {
    fn emit_completion(&mut self, event: CompletionEvent) -> Result<String> {
        let task = NewTask {
            flow_id: event.flow_id,
            title: event
                .task_title
                .unwrap_or_else(|| DEFAULT_TASK_TITLE.to_string()),
            description: event.flow_name,
            progress: 1,
            total_steps: self.total_steps.resolve(event.visible_steps),
            status: TaskStatus::InProgress,
            answers: event.answers,
        };
        self.add(task)
    }
}
