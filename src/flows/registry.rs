//! Read-only lookup of flows by id
//!
//! Every flow is checked by `ensure_valid` before it is admitted, so the
//! navigators never see a dangling rule reference.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::ensure_valid;
use crate::errors::{IntakeError, Result};
use crate::fs;
use crate::schemas::Flow;

const BUNDLED: &[(&str, &str)] = &[
    ("insurance.json", include_str!("../../flows/insurance.json")),
    ("something-else.json", include_str!("../../flows/something-else.json")),
];

/// Parse the flow definitions compiled into the binary.
pub fn bundled_flows() -> Result<Vec<Flow>> {
    BUNDLED
        .iter()
        .map(|(name, source)| {
            serde_json::from_str(source).map_err(|e| {
                IntakeError::InvalidJson(format!("Invalid bundled flow {}: {}", name, e))
            })
        })
        .collect()
}

/// Flows keyed by id
#[derive(Debug, Clone, Default)]
pub struct FlowRegistry {
    flows: BTreeMap<String, Flow>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the bundled flows
    pub fn bundled() -> Result<Self> {
        let mut registry = FlowRegistry::new();
        for flow in bundled_flows()? {
            registry.insert(flow)?;
        }
        Ok(registry)
    }

    /// Add a flow, replacing any flow with the same id.
    ///
    /// # Errors
    /// * `InvalidFlow` - If the flow fails validation
    pub fn insert(&mut self, flow: Flow) -> Result<()> {
        ensure_valid(&flow)?;
        if self.flows.contains_key(&flow.id) {
            tracing::info!(flow = %flow.id, "replacing flow definition");
        }
        self.flows.insert(flow.id.clone(), flow);
        Ok(())
    }

    /// Load every `*.json` file in `dir`.
    ///
    /// A missing directory loads nothing. Returns the number of flows loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "flows directory not present");
            return Ok(0);
        }

        let mut paths = Vec::new();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            IntakeError::wrap(e, format!("Failed to read flows directory {}", dir.display()))
        })?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            let flow: Flow = fs::read_json(path)?;
            tracing::debug!(flow = %flow.id, path = %path.display(), "loaded flow");
            self.insert(flow)?;
        }
        Ok(paths.len())
    }

    /// Look up a flow.
    ///
    /// # Errors
    /// * `FlowNotFound` - If no flow has this id
    pub fn get(&self, id: &str) -> Result<&Flow> {
        self.flows
            .get(id)
            .ok_or_else(|| IntakeError::FlowNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.flows.contains_key(id)
    }

    /// All flows ordered by id
    pub fn list(&self) -> Vec<&Flow> {
        self.flows.values().collect()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{InputKind, Step, VisibilityRule};
    use tempfile::TempDir;

    #[test]
    fn test_bundled_flows_are_valid() {
        let registry = FlowRegistry::bundled().unwrap();
        let ids: Vec<&str> = registry.list().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["insurance", "something-else"]);

        let insurance = registry.get("insurance").unwrap();
        assert_eq!(insurance.steps.len(), 12);
        assert_eq!(insurance.task_title.as_deref(), Some("Helping with your insurance"));
        assert!(insurance.step("deadline").unwrap().conditional_on.is_some());
    }

    #[test]
    fn test_get_unknown_flow() {
        let registry = FlowRegistry::bundled().unwrap();
        let err = registry.get("does-not-exist").unwrap_err();
        assert!(matches!(err, IntakeError::FlowNotFound(id) if id == "does-not-exist"));
    }

    #[test]
    fn test_insert_rejects_invalid_flow() {
        let mut registry = FlowRegistry::new();
        let flow = Flow::new(
            "broken",
            "Broken",
            vec![Step::new("a", "A?", InputKind::Text, true)
                .conditional_on(VisibilityRule::new("missing", "x"))],
        );
        let err = registry.insert(flow).unwrap_err();
        assert!(matches!(err, IntakeError::InvalidFlow(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_dir() {
        let temp = TempDir::new().unwrap();
        let flow = Flow::new(
            "refill",
            "Medication Refill",
            vec![Step::new("medication", "Which medication?", InputKind::Text, true)],
        );
        fs::write_json(&temp.path().join("refill.json"), &flow).unwrap();
        std::fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = FlowRegistry::bundled().unwrap();
        assert_eq!(registry.load_dir(temp.path()).unwrap(), 1);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("refill").unwrap().name, "Medication Refill");
    }

    #[test]
    fn test_load_dir_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let mut registry = FlowRegistry::new();
        assert_eq!(registry.load_dir(&temp.path().join("nope")).unwrap(), 0);
    }

    #[test]
    fn test_load_dir_invalid_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bad.json"), "{").unwrap();

        let mut registry = FlowRegistry::new();
        let err = registry.load_dir(temp.path()).unwrap_err();
        assert!(matches!(err, IntakeError::InvalidJson(_)));
    }
}
