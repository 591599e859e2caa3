//! Visibility predicates for conditional steps
//!
//! Pure functions: the same step and answers always give the same result.

use crate::schemas::{AnswerSet, Step, VisibilityRule};

/// Whether the rule's referenced answer is present and one of the rule's values.
///
/// An absent answer, or one without a scalar value, never matches.
pub fn rule_matches(rule: &VisibilityRule, answers: &AnswerSet) -> bool {
    answers
        .get(&rule.step_id)
        .and_then(|answer| answer.scalar())
        .map(|value| rule.value.contains(value))
        .unwrap_or(false)
}

/// Decide whether a step should be shown for the given answers.
///
/// `conditional_on` is evaluated first; `skip_if` may only turn a visible
/// step hidden, never the reverse.
pub fn is_visible(step: &Step, answers: &AnswerSet) -> bool {
    if let Some(rule) = &step.conditional_on {
        if !rule_matches(rule, answers) {
            return false;
        }
    }

    if let Some(rule) = &step.skip_if {
        if rule_matches(rule, answers) {
            return false;
        }
    }

    true
}
