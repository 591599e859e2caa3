//! Conversation transcript kept by the chat driver

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who a message is from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bot,
    User,
    System,
}

/// One line of the conversation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Step the message asks or answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    /// Name of an attached file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn bot(content: impl Into<String>, step_id: Option<String>) -> Self {
        Message {
            role: Role::Bot,
            content: content.into(),
            step_id,
            attachment: None,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>, step_id: String, attachment: Option<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
            step_id: Some(step_id),
            attachment,
            timestamp: Utc::now(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
            step_id: None,
            attachment: None,
            timestamp: Utc::now(),
        }
    }
}
