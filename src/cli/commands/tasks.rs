//! Tasks command - Inspect and manage task records

use crate::cli::{Context, TaskCommands};
use crate::errors::{IntakeError, Result};
use crate::schemas::TaskRecord;

/// Dispatch a `tasks` subcommand
pub async fn run(ctx: &Context, action: TaskCommands) -> Result<()> {
    let mut store = ctx.task_store()?;
    match action {
        TaskCommands::List { json } => {
            if json {
                println!("{}", to_json(store.list())?);
            } else if store.is_empty() {
                println!("No tasks yet.");
            } else {
                for task in store.list() {
                    println!("{}", list_line(task));
                }
            }
        }
        TaskCommands::Show { id, json } => {
            let task = store
                .get(&id)
                .ok_or_else(|| IntakeError::TaskNotFound(id.clone()))?;
            if json {
                println!("{}", to_json(task)?);
            } else {
                print!("{}", details(task));
            }
        }
        TaskCommands::Remove { id } => {
            if ctx.dry_run {
                println!("Would remove task {}", id);
            } else {
                let task = store.remove(&id)?;
                println!("Removed task {} ({})", task.id, task.title);
            }
        }
        TaskCommands::Status { id, status } => {
            if ctx.dry_run {
                println!("Would set task {} to {}", id, status);
            } else {
                let task = store.set_status(&id, status)?;
                println!("Task {} is now {}", task.id, task.status.label());
            }
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| IntakeError::InvalidJson(e.to_string()))
}

fn list_line(task: &TaskRecord) -> String {
    format!(
        "{}  [{}]  {} - {} ({}/{})",
        task.id,
        task.status.label(),
        task.title,
        task.description,
        task.progress,
        task.total_steps
    )
}

fn details(task: &TaskRecord) -> String {
    let mut text = format!(
        "{}\n{}\nStatus: {}\nProgress: {} of {}\nFlow: {}\nCreated: {}\n",
        task.title,
        task.description,
        task.status.label(),
        task.progress,
        task.total_steps,
        task.flow_id,
        task.created_at.format("%Y-%m-%d %H:%M UTC"),
    );
    if !task.answers.is_empty() {
        text.push_str("\nAnswers:\n");
        for answer in &task.answers {
            text.push_str(&format!("  {}\n    {}\n", answer.question, answer.answer));
        }
    }
    text
}
