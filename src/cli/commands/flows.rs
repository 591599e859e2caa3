//! Flows command - List available flows

use serde::Serialize;

use crate::cli::Context;
use crate::errors::{IntakeError, Result};
use crate::flows::FlowRegistry;

#[derive(Debug, Serialize)]
struct FlowSummary<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    steps: usize,
}

/// List available flows
pub async fn run(ctx: &Context, json: bool) -> Result<()> {
    let registry = ctx.registry()?;
    print!("{}", render(&registry, json)?);
    Ok(())
}

fn render(registry: &FlowRegistry, json: bool) -> Result<String> {
    let summaries: Vec<FlowSummary> = registry
        .list()
        .into_iter()
        .map(|flow| FlowSummary {
            id: &flow.id,
            name: &flow.name,
            description: &flow.description,
            steps: flow.steps.len(),
        })
        .collect();

    if json {
        let mut text = serde_json::to_string_pretty(&summaries)
            .map_err(|e| IntakeError::InvalidJson(e.to_string()))?;
        text.push('\n');
        return Ok(text);
    }

    if summaries.is_empty() {
        return Ok("No flows available.\n".to_string());
    }
    let width = summaries.iter().map(|s| s.id.len()).max().unwrap_or(0);
    let mut text = String::new();
    for summary in &summaries {
        text.push_str(&format!(
            "{:width$}  {} ({} steps)\n{:width$}  {}\n",
            summary.id,
            summary.name,
            summary.steps,
            "",
            summary.description,
            width = width
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let registry = FlowRegistry::bundled().unwrap();
        let text = render(&registry, false).unwrap();
        assert!(text.starts_with("insurance       Help with Insurance (12 steps)\n"));
        assert!(text.contains("something-else  Something Else (7 steps)"));
    }

    #[test]
    fn test_render_json() {
        let registry = FlowRegistry::bundled().unwrap();
        let text = render(&registry, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["id"], "insurance");
        assert_eq!(parsed[1]["steps"], 7);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&FlowRegistry::new(), false).unwrap(), "No flows available.\n");
    }
}
