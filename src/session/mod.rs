//! Presentation drivers over the traversal engine
//!
//! `ChatSession` asks one question at a time; `FormSession` pages through the
//! visible steps and allows going back. Both validate input before it reaches
//! a navigator and hand the finished answers to a `CompletionSink` once.

mod chat;
mod completion;
mod form;
mod input;
mod transcript;

pub use chat::{ChatSession, COMPLETION_MESSAGE};
pub use completion::{summarize_answer, summarize_answers, CompletionEvent, CompletionSink};
pub use form::FormSession;
pub use input::{display_value, prepare_answer, RawInput};
pub use transcript::{Message, Role};

/// What a submission did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The session now waits on this step
    Next { step_id: String },
    /// The flow finished and the store created this task
    Completed { task_id: String },
    /// The session was not accepting input; nothing changed
    Ignored,
}
