//! Flow traversal over a step list
//!
//! Both navigators go through these functions so the visibility logic lives
//! in one place.

use crate::schemas::{AnswerSet, Step};

use super::visibility::is_visible;

/// Filter the steps by visibility, preserving definition order
pub fn visible_steps<'a>(steps: &'a [Step], answers: &AnswerSet) -> Vec<&'a Step> {
    steps.iter().filter(|step| is_visible(step, answers)).collect()
}

/// Count of steps visible under the given answers
pub fn visible_count(steps: &[Step], answers: &AnswerSet) -> usize {
    steps.iter().filter(|step| is_visible(step, answers)).count()
}

/// Index of the first visible step at or after `from`, if any
pub fn next_visible_index(steps: &[Step], from: usize, answers: &AnswerSet) -> Option<usize> {
    steps
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, step)| is_visible(step, answers))
        .map(|(index, _)| index)
}

/// Percentage of visible steps that hold an answer.
///
/// Rounds half up. Both counts follow the live answers: a branching answer can
/// reveal more steps and move the value backwards, and answers left behind on
/// steps that are now hidden do not count. Zero visible steps reports 100.
pub fn progress_percent(steps: &[Step], answers: &AnswerSet) -> u8 {
    let visible = visible_steps(steps, answers);
    if visible.is_empty() {
        return 100;
    }
    let visible_len = visible.len();
    let answered = visible.iter().filter(|step| answers.contains(&step.id)).count();
    ((200 * answered + visible_len) / (2 * visible_len)) as u8
}
