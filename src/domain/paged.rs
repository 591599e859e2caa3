//! Paged navigator for the form presentation
//!
//! Holds a plain position into the visible-step list. The list itself is never
//! cached: every move recomputes it from the answers, because going back and
//! changing an earlier answer can re-filter everything after it.

use crate::schemas::{AnswerSet, Step};

use super::engine::visible_steps;

/// Outcome of moving forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    /// Now positioned at this index of the recomputed list
    Advanced(usize),
    /// No page after the current one
    Finished,
}

/// Position into the visible-step list
#[derive(Debug, Clone, Default)]
pub struct PagedNavigator {
    position: usize,
}

impl PagedNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    /// The step at the current position of the list visible under `answers`
    pub fn current<'a>(&self, steps: &'a [Step], answers: &AnswerSet) -> Option<&'a Step> {
        visible_steps(steps, answers).get(self.position).copied()
    }

    /// Advance after the current page's answer was recorded in `answers`.
    ///
    /// Validity of the next position is checked against the list recomputed
    /// from `answers`, which may be shorter than the one the page came from.
    pub fn go_next(&mut self, steps: &[Step], answers: &AnswerSet) -> PageMove {
        let visible = visible_steps(steps, answers);
        let next = self.position + 1;
        if next < visible.len() {
            self.position = next;
            PageMove::Advanced(next)
        } else {
            PageMove::Finished
        }
    }

    /// Step back one page; no-op on the first page
    pub fn go_back(&mut self) -> usize {
        if self.position > 0 {
            self.position -= 1;
        }
        self.position
    }
}
