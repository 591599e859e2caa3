//! Answer schema - Values collected while a flow is in progress

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single answer to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Free text or a single selected option value
    Text(String),

    /// Ordered set of selected option values (multi-select)
    Choices(Vec<String>),

    /// Opaque handle to an uploaded file or photo; only the name travels further
    Attachment {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_type: Option<String>,
    },

    /// Optional step explicitly passed over
    Skipped,
}

impl Answer {
    pub fn text(value: impl Into<String>) -> Self {
        Answer::Text(value.into())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Answer::Choices(values.into_iter().map(Into::into).collect())
    }

    pub fn attachment(name: impl Into<String>) -> Self {
        Answer::Attachment {
            name: name.into(),
            media_type: None,
        }
    }

    /// The value visibility rules compare against.
    ///
    /// Only non-empty text participates; choice sets, attachments and the
    /// skip marker never satisfy a rule.
    pub fn scalar(&self) -> Option<&str> {
        match self {
            Answer::Text(value) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Accumulated answers for one session, keyed by step id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: HashMap<String, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an answer, overwriting any earlier answer for the same step
    pub fn record(&mut self, step_id: impl Into<String>, answer: Answer) -> Option<Answer> {
        self.answers.insert(step_id.into(), answer)
    }

    pub fn get(&self, step_id: &str) -> Option<&Answer> {
        self.answers.get(step_id)
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.answers.contains_key(step_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, Answer)>>(iter: T) -> Self {
        let mut set = AnswerSet::new();
        for (step_id, answer) in iter {
            set.record(step_id, answer);
        }
        set
    }
}
