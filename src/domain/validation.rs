//! Referential-integrity checks for flow definitions
//!
//! Run once when a flow is loaded, so a rule pointing at a missing or later
//! step is reported to the flow author instead of silently evaluating to a
//! constant at traversal time.

use std::collections::HashSet;

use crate::errors::{IntakeError, Result};
use crate::schemas::{Flow, Step, VisibilityRule};

/// A single authoring problem in a flow definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowIssue {
    /// Flow id is blank
    EmptyFlowId,
    /// Two steps share an id
    DuplicateStepId { step_id: String },
    /// Rule references a step that does not exist
    UnknownRuleTarget { step_id: String, target: String },
    /// Rule references its own step
    SelfReference { step_id: String },
    /// Rule references a step that comes later in the flow
    ForwardReference { step_id: String, target: String },
    /// Rule has an empty value set and can never match
    EmptyRuleValue { step_id: String },
    /// Choice step without options
    MissingOptions { step_id: String },
    /// Two options of one step share a value
    DuplicateOptionValue { step_id: String, value: String },
}

impl std::fmt::Display for FlowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowIssue::EmptyFlowId => write!(f, "flow id is empty"),
            FlowIssue::DuplicateStepId { step_id } => {
                write!(f, "step id '{}' is used more than once", step_id)
            }
            FlowIssue::UnknownRuleTarget { step_id, target } => {
                write!(f, "step '{}' has a rule on unknown step '{}'", step_id, target)
            }
            FlowIssue::SelfReference { step_id } => {
                write!(f, "step '{}' has a rule on itself", step_id)
            }
            FlowIssue::ForwardReference { step_id, target } => write!(
                f,
                "step '{}' has a rule on later step '{}'",
                step_id, target
            ),
            FlowIssue::EmptyRuleValue { step_id } => {
                write!(f, "step '{}' has a rule with no values", step_id)
            }
            FlowIssue::MissingOptions { step_id } => {
                write!(f, "choice step '{}' has no options", step_id)
            }
            FlowIssue::DuplicateOptionValue { step_id, value } => write!(
                f,
                "step '{}' has more than one option with value '{}'",
                step_id, value
            ),
        }
    }
}

/// Result of validating a flow
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Every problem found, in step order
    pub issues: Vec<FlowIssue>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            issues: Vec::new(),
        }
    }

    /// Create a result from collected issues
    pub fn from_issues(issues: Vec<FlowIssue>) -> Self {
        ValidationResult {
            valid: issues.is_empty(),
            issues,
        }
    }

    /// All issues joined into one line
    pub fn reason(&self) -> Option<String> {
        if self.valid {
            return None;
        }
        Some(
            self.issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

fn check_rule(
    step: &Step,
    rule: &VisibilityRule,
    position: usize,
    flow: &Flow,
    issues: &mut Vec<FlowIssue>,
) {
    if rule.value.is_empty() {
        issues.push(FlowIssue::EmptyRuleValue {
            step_id: step.id.clone(),
        });
    }

    if rule.step_id == step.id {
        issues.push(FlowIssue::SelfReference {
            step_id: step.id.clone(),
        });
        return;
    }

    match flow.step_index(&rule.step_id) {
        None => issues.push(FlowIssue::UnknownRuleTarget {
            step_id: step.id.clone(),
            target: rule.step_id.clone(),
        }),
        Some(target) if target > position => issues.push(FlowIssue::ForwardReference {
            step_id: step.id.clone(),
            target: rule.step_id.clone(),
        }),
        Some(_) => {}
    }
}

/// Check a flow definition and report every problem found
pub fn validate_flow(flow: &Flow) -> ValidationResult {
    let mut issues = Vec::new();

    if flow.id.trim().is_empty() {
        issues.push(FlowIssue::EmptyFlowId);
    }

    let mut seen_ids = HashSet::new();
    for (position, step) in flow.steps.iter().enumerate() {
        if !seen_ids.insert(step.id.as_str()) {
            issues.push(FlowIssue::DuplicateStepId {
                step_id: step.id.clone(),
            });
        }

        if step.input_type.is_choice() && step.options.is_empty() {
            issues.push(FlowIssue::MissingOptions {
                step_id: step.id.clone(),
            });
        }

        let mut seen_values = HashSet::new();
        for option in &step.options {
            if !seen_values.insert(option.value.as_str()) {
                issues.push(FlowIssue::DuplicateOptionValue {
                    step_id: step.id.clone(),
                    value: option.value.clone(),
                });
            }
        }

        for rule in step.rules() {
            check_rule(step, rule, position, flow, &mut issues);
        }
    }

    ValidationResult::from_issues(issues)
}

/// Validate a flow, turning any problem into an `InvalidFlow` error
pub fn ensure_valid(flow: &Flow) -> Result<()> {
    let result = validate_flow(flow);
    match result.reason() {
        None => Ok(()),
        Some(reason) => Err(IntakeError::InvalidFlow(format!("{}: {}", flow.id, reason))),
    }
}
