//! Config schema - Configuration for the intake CLI

use serde::{Deserialize, Serialize};

/// Presentation used when running a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    /// One question at a time as a conversation
    #[default]
    Chat,
    /// Paginated form with back navigation
    Form,
}

impl std::fmt::Display for UiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiMode::Chat => write!(f, "chat"),
            UiMode::Form => write!(f, "form"),
        }
    }
}

impl std::str::FromStr for UiMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(UiMode::Chat),
            "form" => Ok(UiMode::Form),
            _ => Err(format!("Unknown UI mode: {}", s)),
        }
    }
}

/// How `total_steps` is chosen for a new task record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalStepsPolicy {
    /// The same total for every task
    Fixed(u32),
    /// Number of steps visible under the final answers
    VisibleSteps,
}

impl Default for TotalStepsPolicy {
    fn default() -> Self {
        TotalStepsPolicy::Fixed(5)
    }
}

impl TotalStepsPolicy {
    /// Resolve the total for a flow that finished with `visible_steps` visible
    pub fn resolve(self, visible_steps: usize) -> u32 {
        match self {
            TotalStepsPolicy::Fixed(total) => total.max(1),
            TotalStepsPolicy::VisibleSteps => (visible_steps as u32).max(1),
        }
    }
}

/// Main configuration for intake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Mode used when no preference has been stored
    #[serde(default)]
    pub default_ui_mode: UiMode,

    /// Delay before a bot message is shown in chat mode
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Total-steps policy for new task records
    #[serde(default)]
    pub task_total_steps: TotalStepsPolicy,

    /// Extra flow definitions to load next to the bundled ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows_dir: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_typing_delay_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            default_ui_mode: UiMode::Chat,
            typing_delay_ms: 500,
            task_total_steps: TotalStepsPolicy::Fixed(5),
            flows_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.default_ui_mode, UiMode::Chat);
        assert_eq!(config.typing_delay_ms, 500);
        assert_eq!(config.task_total_steps, TotalStepsPolicy::Fixed(5));
        assert!(config.flows_dir.is_none());
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{"default_ui_mode": "form"}"#;
        let parsed: Config = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.default_ui_mode, UiMode::Form);
        // Other fields should have defaults
        assert_eq!(parsed.typing_delay_ms, 500);
        assert_eq!(parsed.task_total_steps, TotalStepsPolicy::Fixed(5));
    }

    #[test]
    fn test_total_steps_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&TotalStepsPolicy::Fixed(5)).unwrap(),
            r#"{"fixed":5}"#
        );
        assert_eq!(
            serde_json::to_string(&TotalStepsPolicy::VisibleSteps).unwrap(),
            "\"visible_steps\""
        );
        let parsed: TotalStepsPolicy = serde_json::from_str("\"visible_steps\"").unwrap();
        assert_eq!(parsed, TotalStepsPolicy::VisibleSteps);
    }

    #[test]
    fn test_total_steps_policy_resolve() {
        assert_eq!(TotalStepsPolicy::Fixed(5).resolve(11), 5);
        assert_eq!(TotalStepsPolicy::VisibleSteps.resolve(11), 11);
        assert_eq!(TotalStepsPolicy::VisibleSteps.resolve(0), 1);
    }

    #[test]
    fn test_ui_mode_round_trip() {
        assert_eq!(serde_json::to_string(&UiMode::Form).unwrap(), "\"form\"");
        assert_eq!("chat".parse::<UiMode>().unwrap(), UiMode::Chat);
        assert!("voice".parse::<UiMode>().is_err());
        assert_eq!(UiMode::Form.to_string(), "form");
    }
}
