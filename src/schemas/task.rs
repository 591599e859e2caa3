//! Task schema - The record persisted when a flow completes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    InProgress,
    Completed,
    NeedsInfo,
}

impl TaskStatus {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::NeedsInfo => "Needs More Info",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::NeedsInfo => write!(f, "needs_info"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "needs_info" => Ok(TaskStatus::NeedsInfo),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Summarized answer value as handed to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskAnswerValue {
    Text(String),
    List(Vec<String>),
}

impl std::fmt::Display for TaskAnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskAnswerValue::Text(value) => write!(f, "{}", value),
            TaskAnswerValue::List(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

/// One question/answer pair of a completed flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnswer {
    pub step_id: String,
    pub question: String,
    pub answer: TaskAnswerValue,
}

/// Task fields supplied by the caller; the store assigns id and creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub flow_id: String,
    pub title: String,
    pub description: String,
    pub progress: u32,
    pub total_steps: u32,
    pub status: TaskStatus,
    pub answers: Vec<TaskAnswer>,
}

/// Partial update applied by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<u32>,
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        TaskUpdate {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn progress(progress: u32) -> Self {
        TaskUpdate {
            progress: Some(progress),
            ..Default::default()
        }
    }
}

/// A persisted task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,

    pub flow_id: String,

    pub title: String,

    pub description: String,

    /// 1..=total_steps
    pub progress: u32,

    pub total_steps: u32,

    pub status: TaskStatus,

    #[serde(default)]
    pub answers: Vec<TaskAnswer>,

    /// Serialized as RFC 3339 text
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Build a record from caller-supplied fields
    pub fn from_new(id: String, task: NewTask, created_at: DateTime<Utc>) -> Self {
        TaskRecord {
            id,
            flow_id: task.flow_id,
            title: task.title,
            description: task.description,
            progress: task.progress,
            total_steps: task.total_steps,
            status: task.status,
            answers: task.answers,
            created_at,
        }
    }

    /// Return a new record with the update applied.
    ///
    /// Progress is kept within 1..=total_steps.
    pub fn with_update(mut self, update: &TaskUpdate) -> Self {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(progress) = update.progress {
            self.progress = progress.clamp(1, self.total_steps.max(1));
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self
    }
}
