//! Line-oriented prompting for interactive sessions
//!
//! Choice steps accept an option number, value or label; multi-select takes
//! a comma-separated list. Upload steps take a path, optionally prefixed with
//! `@`. An empty line is a skip.

use std::io::Write;
use std::path::Path;

use crate::schemas::{Answer, InputKind, Step};
use crate::session::{display_value, RawInput};

/// Interpret one typed line as input for `step`
pub fn parse_line(step: &Step, line: &str) -> RawInput {
    let line = line.trim();
    if line.is_empty() {
        return RawInput::Skip;
    }

    match step.input_type {
        InputKind::SingleSelect => RawInput::Text(resolve_choice(step, line)),
        InputKind::MultiSelect => RawInput::Choices(
            line.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| resolve_choice(step, token))
                .collect(),
        ),
        kind if kind.is_attachment() => {
            let path = Path::new(line.trim_start_matches('@'));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            RawInput::Attachment {
                media_type: media_type(path),
                name,
            }
        }
        _ => RawInput::Text(line.to_string()),
    }
}

fn resolve_choice(step: &Step, token: &str) -> String {
    if let Ok(n) = token.parse::<usize>() {
        if n >= 1 && n <= step.options.len() {
            return step.options[n - 1].value.clone();
        }
    }
    step.options
        .iter()
        .find(|o| o.value == token || o.label.eq_ignore_ascii_case(token))
        .map(|o| o.value.clone())
        .unwrap_or_else(|| token.to_string())
}

fn media_type(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(media.to_string())
}

/// Print a step's question with its options and input hints
pub fn render_step<W: Write>(
    out: &mut W,
    step: &Step,
    prefill: Option<&Answer>,
) -> std::io::Result<()> {
    writeln!(out, "{}", step.question)?;
    for (i, option) in step.options.iter().enumerate() {
        match &option.description {
            Some(description) => writeln!(out, "  {}) {} - {}", i + 1, option.label, description)?,
            None => writeln!(out, "  {}) {}", i + 1, option.label)?,
        }
    }

    let mut hints = Vec::new();
    if step.input_type == InputKind::MultiSelect {
        hints.push("separate choices with commas".to_string());
    }
    if step.input_type.is_attachment() {
        hints.push("enter a file path".to_string());
    }
    if let Some(placeholder) = &step.placeholder {
        hints.push(format!("e.g. {}", placeholder));
    }
    if let Some(answer) = prefill {
        hints.push(format!("Enter keeps: {}", display_value(step, answer)));
    } else if !step.required {
        hints.push("optional, Enter to skip".to_string());
    }
    if !hints.is_empty() {
        writeln!(out, "  ({})", hints.join("; "))?;
    }
    Ok(())
}
