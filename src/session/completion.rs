//! Completion hand-off to the task store
//!
//! A finished session is summarized into question/answer pairs in flow order
//! and handed to a `CompletionSink` exactly once.

use crate::domain::{is_visible, visible_count};
use crate::errors::Result;
use crate::schemas::{Answer, AnswerSet, Flow, TaskAnswer, TaskAnswerValue};

/// Everything the store needs to create a task for a finished flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub flow_id: String,
    pub flow_name: String,
    pub task_title: Option<String>,
    /// Steps visible under the final answers
    pub visible_steps: usize,
    pub answers: Vec<TaskAnswer>,
}

impl CompletionEvent {
    /// Build the event for a flow and its final answers
    pub fn new(flow: &Flow, answers: &AnswerSet) -> Self {
        CompletionEvent {
            flow_id: flow.id.clone(),
            flow_name: flow.name.clone(),
            task_title: flow.task_title.clone(),
            visible_steps: visible_count(&flow.steps, answers),
            answers: summarize_answers(flow, answers),
        }
    }
}

/// Receiver of completed flows
pub trait CompletionSink {
    /// Persist a completed flow and return the id of the created task
    fn emit_completion(&mut self, event: CompletionEvent) -> Result<String>;
}

/// Collects events in memory; ids are `completion-<n>`
impl CompletionSink for Vec<CompletionEvent> {
    fn emit_completion(&mut self, event: CompletionEvent) -> Result<String> {
        self.push(event);
        Ok(format!("completion-{}", self.len()))
    }
}

/// Store-safe value for one answer; attachments travel as a bracketed name
pub fn summarize_answer(answer: &Answer) -> TaskAnswerValue {
    match answer {
        Answer::Text(value) => TaskAnswerValue::Text(value.clone()),
        Answer::Choices(values) => TaskAnswerValue::List(values.clone()),
        Answer::Attachment { name, .. } => TaskAnswerValue::Text(format!("[File: {}]", name)),
        Answer::Skipped => TaskAnswerValue::Text("[Skipped]".to_string()),
    }
}

/// Question/answer pairs in flow order.
///
/// Only steps that are visible under the final answers are included, so an
/// answer left behind by a branch the user backed out of is dropped.
pub fn summarize_answers(flow: &Flow, answers: &AnswerSet) -> Vec<TaskAnswer> {
    flow.steps
        .iter()
        .filter(|step| is_visible(step, answers))
        .filter_map(|step| {
            answers.get(&step.id).map(|answer| TaskAnswer {
                step_id: step.id.clone(),
                question: step.question.clone(),
                answer: summarize_answer(answer),
            })
        })
        .collect()
}

/// Fails the first `failures` emissions, then records like a `Vec`
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FlakySink {
    pub failures: usize,
    pub events: Vec<CompletionEvent>,
}

#[cfg(test)]
impl CompletionSink for FlakySink {
    fn emit_completion(&mut self, event: CompletionEvent) -> Result<String> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(crate::errors::IntakeError::Storage("disk full".into()));
        }
        self.events.push(event);
        Ok(format!("task-{}", self.events.len()))
    }
}
