//! Validate command - Check a flow definition file

use std::path::Path;

use crate::domain::validate_flow;
use crate::errors::{IntakeError, Result};
use crate::fs;
use crate::schemas::Flow;

/// Report every integrity issue in a flow file; fails if there are any
pub async fn run(file: &Path) -> Result<()> {
    let flow: Flow = fs::read_json(file)?;
    let result = validate_flow(&flow);

    if result.valid {
        println!("{}: {} steps, no issues", flow.id, flow.steps.len());
        return Ok(());
    }

    for issue in &result.issues {
        println!("  - {}", issue);
    }
    Err(IntakeError::InvalidFlow(format!(
        "{} has {} issue(s)",
        file.display(),
        result.issues.len()
    )))
}
