//! Flow schema - Declarative questionnaire definitions
//!
//! Field names follow the camelCase layout of the bundled JSON definitions.

use serde::{Deserialize, Serialize};

/// Input widget kind for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    Text,
    Phone,
    Date,
    Number,
    Email,
    Address,
    Zipcode,
    SingleSelect,
    MultiSelect,
    PhotoUpload,
    FileUpload,
    PharmacySearch,
    Location,
}

impl InputKind {
    /// Whether the step answers by picking from `options`
    pub fn is_choice(self) -> bool {
        matches!(self, InputKind::SingleSelect | InputKind::MultiSelect)
    }

    /// Whether the step answers with an uploaded file or photo
    pub fn is_attachment(self) -> bool {
        matches!(self, InputKind::PhotoUpload | InputKind::FileUpload)
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InputKind::Text => "text",
            InputKind::Phone => "phone",
            InputKind::Date => "date",
            InputKind::Number => "number",
            InputKind::Email => "email",
            InputKind::Address => "address",
            InputKind::Zipcode => "zipcode",
            InputKind::SingleSelect => "single-select",
            InputKind::MultiSelect => "multi-select",
            InputKind::PhotoUpload => "photo-upload",
            InputKind::FileUpload => "file-upload",
            InputKind::PharmacySearch => "pharmacy-search",
            InputKind::Location => "location",
        };
        write!(f, "{}", s)
    }
}

/// One selectable option of a choice step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }
}

/// Allowed values of a visibility rule; a single value behaves as a one-element set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    One(String),
    Many(Vec<String>),
}

impl RuleValue {
    /// Set membership by exact equality
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            RuleValue::One(value) => value == candidate,
            RuleValue::Many(values) => values.iter().any(|v| v == candidate),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            RuleValue::One(value) => vec![value.as_str()],
            RuleValue::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RuleValue::One(_) => false,
            RuleValue::Many(values) => values.is_empty(),
        }
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::One(value.to_string())
    }
}

impl From<Vec<&str>> for RuleValue {
    fn from(values: Vec<&str>) -> Self {
        RuleValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Predicate over a prior step's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRule {
    /// The step whose answer is inspected
    pub step_id: String,

    /// Values that satisfy the rule
    pub value: RuleValue,
}

impl VisibilityRule {
    pub fn new(step_id: impl Into<String>, value: impl Into<RuleValue>) -> Self {
        VisibilityRule {
            step_id: step_id.into(),
            value: value.into(),
        }
    }
}

/// A single question within a flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique within the flow
    pub id: String,

    pub question: String,

    pub input_type: InputKind,

    pub required: bool,

    /// Present only for choice kinds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Shown only when the referenced answer is one of the values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_on: Option<VisibilityRule>,

    /// Hidden when the referenced answer is one of the values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_if: Option<VisibilityRule>,
}

impl Step {
    /// Create an unconditional step with no options
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        input_type: InputKind,
        required: bool,
    ) -> Self {
        Step {
            id: id.into(),
            question: question.into(),
            input_type,
            required,
            options: Vec::new(),
            placeholder: None,
            conditional_on: None,
            skip_if: None,
        }
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn conditional_on(mut self, rule: VisibilityRule) -> Self {
        self.conditional_on = Some(rule);
        self
    }

    pub fn skip_if(mut self, rule: VisibilityRule) -> Self {
        self.skip_if = Some(rule);
        self
    }

    /// Look up an option by its value
    pub fn option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Display label for an option value, falling back to the raw value
    pub fn label_for<'a>(&'a self, value: &'a str) -> &'a str {
        self.option(value).map(|o| o.label.as_str()).unwrap_or(value)
    }

    /// Rules attached to this step, conditional first
    pub fn rules(&self) -> impl Iterator<Item = &VisibilityRule> {
        self.conditional_on.iter().chain(self.skip_if.iter())
    }
}

/// A named, ordered questionnaire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,

    pub name: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Title given to the task record created on completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,

    pub steps: Vec<Step>,
}

impl Flow {
    pub fn new(id: impl Into<String>, name: impl Into<String>, steps: Vec<Step>) -> Self {
        Flow {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon: None,
            task_title: None,
            steps,
        }
    }

    /// Find a step by id
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Position of a step in the definition order
    pub fn step_index(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }
}
