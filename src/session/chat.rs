//! Chat driver - one question at a time, append-only
//!
//! Wraps the sequential navigator. Answers are never revisited; once the
//! completion has been recorded every further submission is ignored.

use crate::domain::{progress_percent, NavigatorState, SequentialNavigator};
use crate::errors::Result;
use crate::schemas::{Answer, AnswerSet, Flow, Step};

use super::completion::{CompletionEvent, CompletionSink};
use super::input::{display_value, prepare_answer, RawInput};
use super::transcript::Message;
use super::Advance;

/// Closing line appended once the flow is complete
pub const COMPLETION_MESSAGE: &str = "Thanks! I have everything I need. We'll get started on this right away and text you with updates.";

/// A conversational session over one flow
pub struct ChatSession<'a> {
    flow: &'a Flow,
    sink: &'a mut dyn CompletionSink,
    navigator: SequentialNavigator,
    answers: AnswerSet,
    transcript: Vec<Message>,
    task_id: Option<String>,
}

impl<'a> ChatSession<'a> {
    pub fn new(flow: &'a Flow, sink: &'a mut dyn CompletionSink) -> Self {
        ChatSession {
            flow,
            sink,
            navigator: SequentialNavigator::new(),
            answers: AnswerSet::new(),
            transcript: Vec::new(),
            task_id: None,
        }
    }

    /// Ask the first visible question.
    ///
    /// A flow with no visible step completes here. Calling `start` again is
    /// ignored.
    pub fn start(&mut self) -> Result<Advance> {
        if self.navigator.state() != NavigatorState::Idle {
            tracing::warn!(flow = %self.flow.id, "chat session already started");
            return Ok(Advance::Ignored);
        }
        let state = self.navigator.start(&self.flow.steps, &self.answers);
        self.after_transition(state)
    }

    /// Submit an answer for the current step.
    ///
    /// Rejected input (missing required answer, bad format) returns an error
    /// and leaves the session where it was. After the last answer, if the
    /// completion could not be recorded, a submission retries it and its input
    /// is dropped.
    pub fn submit(&mut self, raw: RawInput) -> Result<Advance> {
        let flow = self.flow;
        let index = match self.navigator.state() {
            NavigatorState::AwaitingAnswer(index) => index,
            NavigatorState::Complete if self.task_id.is_none() => return self.retry_completion(),
            state => {
                tracing::warn!(flow = %flow.id, ?state, "submission outside an open question ignored");
                return Ok(Advance::Ignored);
            }
        };
        let step = &flow.steps[index];
        let answer = prepare_answer(step, raw)?;

        let attachment = match &answer {
            Answer::Attachment { name, .. } => Some(name.clone()),
            _ => None,
        };
        self.transcript.push(Message::user(
            display_value(step, &answer),
            step.id.clone(),
            attachment,
        ));
        self.answers.record(step.id.clone(), answer);
        tracing::debug!(flow = %flow.id, step = %step.id, "answer recorded");

        let state = self.navigator.advance(&flow.steps, &self.answers);
        self.after_transition(state)
    }

    fn after_transition(&mut self, state: NavigatorState) -> Result<Advance> {
        let flow = self.flow;
        match state {
            NavigatorState::AwaitingAnswer(index) => {
                let step = &flow.steps[index];
                self.transcript
                    .push(Message::bot(step.question.clone(), Some(step.id.clone())));
                tracing::debug!(flow = %flow.id, step = %step.id, index, "asking");
                Ok(Advance::Next {
                    step_id: step.id.clone(),
                })
            }
            NavigatorState::Complete => self.complete(),
            NavigatorState::Idle => Ok(Advance::Ignored),
        }
    }

    /// Emit the completion again after the sink failed.
    ///
    /// Ignored before the last answer and once a task has been created.
    pub fn retry_completion(&mut self) -> Result<Advance> {
        if !self.navigator.state().is_terminal() {
            tracing::warn!(flow = %self.flow.id, "no completion pending");
            return Ok(Advance::Ignored);
        }
        tracing::debug!(flow = %self.flow.id, "retrying completion");
        self.complete()
    }

    fn complete(&mut self) -> Result<Advance> {
        if self.task_id.is_some() {
            return Ok(Advance::Ignored);
        }
        let flow = self.flow;
        let event = CompletionEvent::new(flow, &self.answers);
        let task_id = match self.sink.emit_completion(event) {
            Ok(task_id) => task_id,
            Err(e) => {
                tracing::warn!(flow = %flow.id, error = %e, "completion not recorded");
                return Err(e);
            }
        };

        self.transcript.push(Message::system(COMPLETION_MESSAGE));
        tracing::info!(flow = %flow.id, task = %task_id, answers = self.answers.len(), "chat flow complete");
        self.task_id = Some(task_id.clone());
        Ok(Advance::Completed { task_id })
    }

    /// The step waiting for an answer
    pub fn current_step(&self) -> Option<&'a Step> {
        let flow = self.flow;
        self.navigator.state().index().map(|index| &flow.steps[index])
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent(&self.flow.steps, &self.answers)
    }

    /// True once the completion has been recorded
    pub fn is_complete(&self) -> bool {
        self.task_id.is_some()
    }

    pub fn state(&self) -> NavigatorState {
        self.navigator.state()
    }

    /// Id of the task created on completion
    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn flow(&self) -> &'a Flow {
        self.flow
    }
}
