//! Schema types for intake
//!
//! Flow definitions, in-session answers, persisted task records and configuration.

mod answer;
mod config;
mod flow;
mod task;

pub use answer::{Answer, AnswerSet};
pub use config::{Config, TotalStepsPolicy, UiMode};
pub use flow::{Flow, InputKind, RuleValue, SelectOption, Step, VisibilityRule};
pub use task::{NewTask, TaskAnswer, TaskAnswerValue, TaskRecord, TaskStatus, TaskUpdate};
