//! Sequential navigator state machine
//!
//! Walks the step list front to back, one visible step at a time:
//! idle → awaiting_answer(i) → ... → complete
//!
//! The index only moves forward and `Complete` is terminal.

use crate::schemas::{AnswerSet, Step};

use super::engine::next_visible_index;

/// State of a sequential traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    /// Not started yet
    Idle,
    /// Waiting for the answer to the step at this index
    AwaitingAnswer(usize),
    /// No visible step remains
    Complete,
}

impl NavigatorState {
    pub fn is_terminal(self) -> bool {
        self == NavigatorState::Complete
    }

    /// Index of the step being asked, if any
    pub fn index(self) -> Option<usize> {
        match self {
            NavigatorState::AwaitingAnswer(index) => Some(index),
            _ => None,
        }
    }
}

/// Forward-only cursor over a flow's steps
#[derive(Debug, Clone)]
pub struct SequentialNavigator {
    state: NavigatorState,
}

impl Default for SequentialNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl SequentialNavigator {
    pub fn new() -> Self {
        SequentialNavigator {
            state: NavigatorState::Idle,
        }
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    /// Move from `Idle` to the first visible step, or straight to `Complete`.
    ///
    /// Calling it in any other state returns the current state unchanged.
    pub fn start(&mut self, steps: &[Step], answers: &AnswerSet) -> NavigatorState {
        if self.state != NavigatorState::Idle {
            return self.state;
        }
        self.state = match next_visible_index(steps, 0, answers) {
            Some(index) => NavigatorState::AwaitingAnswer(index),
            None => NavigatorState::Complete,
        };
        self.state
    }

    /// Move past the current step, re-evaluating visibility against `answers`.
    ///
    /// The caller records the answer before advancing. Outside
    /// `AwaitingAnswer` this is a no-op.
    pub fn advance(&mut self, steps: &[Step], answers: &AnswerSet) -> NavigatorState {
        let NavigatorState::AwaitingAnswer(current) = self.state else {
            return self.state;
        };
        self.state = match next_visible_index(steps, current + 1, answers) {
            Some(index) => NavigatorState::AwaitingAnswer(index),
            None => NavigatorState::Complete,
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Answer, InputKind, VisibilityRule};

    fn steps() -> Vec<Step> {
        vec![
            Step::new("urgency", "Urgent?", InputKind::SingleSelect, true),
            Step::new("deadline", "Deadline?", InputKind::Text, true)
                .conditional_on(VisibilityRule::new("urgency", "urgent")),
            Step::new("issue-type", "Issue?", InputKind::Text, true),
        ]
    }

    #[test]
    fn test_start_finds_first_visible() {
        let steps = steps();
        let mut nav = SequentialNavigator::new();
        assert_eq!(nav.state(), NavigatorState::Idle);
        assert_eq!(nav.start(&steps, &AnswerSet::new()), NavigatorState::AwaitingAnswer(0));
    }

    #[test]
    fn test_start_on_degenerate_flow_completes() {
        let steps = vec![Step::new("only", "Only?", InputKind::Text, true)
            .conditional_on(VisibilityRule::new("ghost", "x"))];
        let mut nav = SequentialNavigator::new();
        assert_eq!(nav.start(&steps, &AnswerSet::new()), NavigatorState::Complete);
        assert!(nav.state().is_terminal());
    }

    #[test]
    fn test_start_on_empty_flow_completes() {
        let mut nav = SequentialNavigator::new();
        assert_eq!(nav.start(&[], &AnswerSet::new()), NavigatorState::Complete);
    }

    #[test]
    fn test_advance_reveals_conditional_step() {
        let steps = steps();
        let mut nav = SequentialNavigator::new();
        nav.start(&steps, &AnswerSet::new());

        let answers: AnswerSet = [("urgency", Answer::text("urgent"))].into_iter().collect();
        assert_eq!(nav.advance(&steps, &answers), NavigatorState::AwaitingAnswer(1));
    }

    #[test]
    fn test_advance_skips_hidden_step() {
        let steps = steps();
        let mut nav = SequentialNavigator::new();
        nav.start(&steps, &AnswerSet::new());

        let answers: AnswerSet = [("urgency", Answer::text("not-urgent"))].into_iter().collect();
        assert_eq!(nav.advance(&steps, &answers), NavigatorState::AwaitingAnswer(2));
        assert_eq!(nav.advance(&steps, &answers), NavigatorState::Complete);
    }

    #[test]
    fn test_complete_is_terminal() {
        let steps = steps();
        let mut nav = SequentialNavigator::new();
        nav.start(&[], &AnswerSet::new());

        assert_eq!(nav.advance(&steps, &AnswerSet::new()), NavigatorState::Complete);
        assert_eq!(nav.start(&steps, &AnswerSet::new()), NavigatorState::Complete);
    }

    #[test]
    fn test_advance_while_idle_is_noop() {
        let steps = steps();
        let mut nav = SequentialNavigator::new();
        assert_eq!(nav.advance(&steps, &AnswerSet::new()), NavigatorState::Idle);
    }

    #[test]
    fn test_state_index() {
        assert_eq!(NavigatorState::AwaitingAnswer(3).index(), Some(3));
        assert_eq!(NavigatorState::Idle.index(), None);
        assert_eq!(NavigatorState::Complete.index(), None);
    }
}
