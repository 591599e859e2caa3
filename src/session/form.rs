//! Form driver - paginated steps with back navigation
//!
//! The visible-step list is recomputed from the answers on every query, so
//! going back and changing an earlier answer re-filters the pages after it.

use crate::domain::{progress_percent, visible_count, PageMove, PagedNavigator};
use crate::errors::Result;
use crate::schemas::{Answer, AnswerSet, Flow, Step};

use super::completion::{CompletionEvent, CompletionSink};
use super::input::{prepare_answer, RawInput};
use super::Advance;

/// A paginated session over one flow
pub struct FormSession<'a> {
    flow: &'a Flow,
    sink: &'a mut dyn CompletionSink,
    navigator: PagedNavigator,
    answers: AnswerSet,
    complete: bool,
    task_id: Option<String>,
}

impl<'a> FormSession<'a> {
    /// Open a form on the first visible page.
    ///
    /// A flow with no visible step completes immediately.
    pub fn open(flow: &'a Flow, sink: &'a mut dyn CompletionSink) -> Result<Self> {
        let mut session = FormSession {
            flow,
            sink,
            navigator: PagedNavigator::new(),
            answers: AnswerSet::new(),
            complete: false,
            task_id: None,
        };
        if session.total_visible_steps() == 0 {
            session.complete()?;
        }
        Ok(session)
    }

    /// The page being shown
    pub fn current_step(&self) -> Option<&'a Step> {
        if self.complete {
            return None;
        }
        self.navigator.current(&self.flow.steps, &self.answers)
    }

    /// 1-based page number
    pub fn step_number(&self) -> usize {
        self.navigator.position() + 1
    }

    pub fn total_visible_steps(&self) -> usize {
        visible_count(&self.flow.steps, &self.answers)
    }

    pub fn is_first(&self) -> bool {
        self.navigator.is_first()
    }

    /// Previously stored answer for the current page, for pre-filling its input
    pub fn prefill(&self) -> Option<&Answer> {
        self.current_step().and_then(|step| self.answers.get(&step.id))
    }

    /// Store the answer for the current page and move to the next one.
    ///
    /// Rejected input leaves the session on the same page. So does a failed
    /// completion on the last page; submitting that page again retries it.
    pub fn go_next(&mut self, raw: RawInput) -> Result<Advance> {
        let step = match self.current_step() {
            Some(step) => step,
            None => {
                tracing::warn!(flow = %self.flow.id, "form submission after completion ignored");
                return Ok(Advance::Ignored);
            }
        };
        let answer = prepare_answer(step, raw)?;
        let replaced = self.answers.record(step.id.clone(), answer).is_some();
        tracing::debug!(flow = %self.flow.id, step = %step.id, replaced, "answer recorded");

        match self.navigator.go_next(&self.flow.steps, &self.answers) {
            PageMove::Advanced(position) => {
                let next = self
                    .navigator
                    .current(&self.flow.steps, &self.answers)
                    .map(|s| s.id.clone())
                    .unwrap_or_default();
                tracing::debug!(flow = %self.flow.id, position, step = %next, "page advanced");
                Ok(Advance::Next { step_id: next })
            }
            PageMove::Finished => self.complete(),
        }
    }

    /// Move back one page; returns whether the position changed
    pub fn go_back(&mut self) -> bool {
        if self.complete || self.navigator.is_first() {
            return false;
        }
        self.navigator.go_back();
        true
    }

    fn complete(&mut self) -> Result<Advance> {
        if self.complete {
            return Ok(Advance::Ignored);
        }
        let event = CompletionEvent::new(self.flow, &self.answers);
        let task_id = match self.sink.emit_completion(event) {
            Ok(task_id) => task_id,
            Err(e) => {
                tracing::warn!(flow = %self.flow.id, error = %e, "completion not recorded");
                return Err(e);
            }
        };

        self.complete = true;
        tracing::info!(flow = %self.flow.id, task = %task_id, answers = self.answers.len(), "form flow complete");
        self.task_id = Some(task_id.clone());
        Ok(Advance::Completed { task_id })
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent(&self.flow.steps, &self.answers)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn flow(&self) -> &'a Flow {
        self.flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IntakeError;
    use crate::schemas::{InputKind, SelectOption, VisibilityRule};
    use crate::session::completion::FlakySink;

    fn yes_no(id: &str) -> Step {
        Step::new(id, format!("{}?", id), InputKind::SingleSelect, true).with_options(vec![
            SelectOption::new("yes", "Yes"),
            SelectOption::new("no", "No"),
        ])
    }

    fn flow() -> Flow {
        Flow::new(
            "demo",
            "Demo",
            vec![
                yes_no("contacted"),
                Step::new("outcome", "What happened?", InputKind::Text, false)
                    .conditional_on(VisibilityRule::new("contacted", "yes")),
                Step::new("notes", "Anything else?", InputKind::Text, false),
            ],
        )
    }

    #[test]
    fn test_open_on_first_page() {
        let flow = flow();
        let mut sink: Vec<CompletionEvent> = Vec::new();
        let session = FormSession::open(&flow, &mut sink).unwrap();

        assert_eq!(session.current_step().unwrap().id, "contacted");
        assert_eq!(session.step_number(), 1);
        assert_eq!(session.total_visible_steps(), 2);
        assert!(session.is_first());
        assert!(session.prefill().is_none());
    }

    #[test]
    fn test_branch_changes_total() {
        let flow = flow();
        let mut sink: Vec<CompletionEvent> = Vec::new();
        let mut session = FormSession::open(&flow, &mut sink).unwrap();

        let advance = session.go_next(RawInput::text("yes")).unwrap();
        assert_eq!(advance, Advance::Next { step_id: "outcome".into() });
        assert_eq!(session.total_visible_steps(), 3);
        assert_eq!(session.step_number(), 2);
    }

    #[test]
    fn test_back_prefills_previous_answer() {
        let flow = flow();
        let mut sink: Vec<CompletionEvent> = Vec::new();
        let mut session = FormSession::open(&flow, &mut sink).unwrap();
        session.go_next(RawInput::text("yes")).unwrap();

        assert!(session.go_back());
        assert_eq!(session.current_step().unwrap().id, "contacted");
        assert_eq!(session.prefill(), Some(&Answer::text("yes")));
        assert!(!session.go_back());
    }

    #[test]
    fn test_changing_answer_refilters_pages() {
        let flow = flow();
        let mut sink: Vec<CompletionEvent> = Vec::new();
        let mut session = FormSession::open(&flow, &mut sink).unwrap();
        session.go_next(RawInput::text("yes")).unwrap();
        session.go_next(RawInput::text("They said no")).unwrap();
        assert_eq!(session.current_step().unwrap().id, "notes");

        session.go_back();
        session.go_back();
        let advance = session.go_next(RawInput::text("no")).unwrap();
        assert_eq!(advance, Advance::Next { step_id: "notes".into() });
        assert_eq!(session.total_visible_steps(), 2);
    }

    #[test]
    fn test_progress_skips_answer_on_hidden_page() {
        let flow = flow();
        let mut sink: Vec<CompletionEvent> = Vec::new();
        let mut session = FormSession::open(&flow, &mut sink).unwrap();
        session.go_next(RawInput::text("yes")).unwrap();
        session.go_next(RawInput::text("They said no")).unwrap();
        session.go_back();
        session.go_back();
        session.go_next(RawInput::text("no")).unwrap();

        assert_eq!(session.current_step().unwrap().id, "notes");
        assert_eq!((session.step_number(), session.total_visible_steps()), (2, 2));
        // outcome still holds an answer but is hidden
        assert_eq!(session.answers().len(), 2);
        assert_eq!(session.progress_percent(), 50);
    }

    #[test]
    fn test_completion_emits_once_and_ignores_later_calls() {
        let flow = flow();
        let mut sink: Vec<CompletionEvent> = Vec::new();
        {
            let mut session = FormSession::open(&flow, &mut sink).unwrap();
            session.go_next(RawInput::text("no")).unwrap();
            let advance = session.go_next(RawInput::Skip).unwrap();
            assert_eq!(advance, Advance::Completed { task_id: "completion-1".into() });
            assert!(session.is_complete());
            assert!(session.current_step().is_none());
            assert_eq!(session.go_next(RawInput::text("again")).unwrap(), Advance::Ignored);
            assert!(!session.go_back());
        }
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_stale_answer_left_out_of_summary() {
        let flow = flow();
        let mut sink: Vec<CompletionEvent> = Vec::new();
        {
            let mut session = FormSession::open(&flow, &mut sink).unwrap();
            session.go_next(RawInput::text("yes")).unwrap();
            session.go_next(RawInput::text("They said no")).unwrap();
            session.go_back();
            session.go_back();
            session.go_next(RawInput::text("no")).unwrap();
            session.go_next(RawInput::text("thanks")).unwrap();
        }
        let ids: Vec<&str> = sink[0].answers.iter().map(|a| a.step_id.as_str()).collect();
        assert_eq!(ids, vec!["contacted", "notes"]);
    }

    #[test]
    fn test_empty_flow_completes_on_open() {
        let flow = Flow::new("empty", "Empty", vec![]);
        let mut sink: Vec<CompletionEvent> = Vec::new();
        {
            let session = FormSession::open(&flow, &mut sink).unwrap();
            assert!(session.is_complete());
            assert!(session.current_step().is_none());
        }
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_failed_completion_stays_on_last_page() {
        let flow = flow();
        let mut sink = FlakySink {
            failures: 1,
            ..Default::default()
        };
        {
            let mut session = FormSession::open(&flow, &mut sink).unwrap();
            session.go_next(RawInput::text("no")).unwrap();

            let err = session.go_next(RawInput::text("call back")).unwrap_err();
            assert!(matches!(err, IntakeError::Storage(_)));
            assert!(!session.is_complete());
            assert!(session.task_id().is_none());
            assert_eq!(session.current_step().unwrap().id, "notes");
            assert_eq!(session.prefill(), Some(&Answer::text("call back")));

            let advance = session.go_next(RawInput::text("call back")).unwrap();
            assert_eq!(advance, Advance::Completed { task_id: "task-1".into() });
            assert!(session.is_complete());
            assert_eq!(session.go_next(RawInput::text("again")).unwrap(), Advance::Ignored);
        }
        assert_eq!(sink.events.len(), 1);
        let ids: Vec<&str> = sink.events[0].answers.iter().map(|a| a.step_id.as_str()).collect();
        assert_eq!(ids, vec!["contacted", "notes"]);
    }

    #[test]
    fn test_empty_flow_open_fails_when_sink_fails() {
        let flow = Flow::new("empty", "Empty", vec![]);
        let mut sink = FlakySink {
            failures: 1,
            ..Default::default()
        };
        assert!(FormSession::open(&flow, &mut sink).is_err());
        assert!(sink.events.is_empty());

        let session = FormSession::open(&flow, &mut sink).unwrap();
        assert_eq!(session.task_id(), Some("task-1"));
    }
}
