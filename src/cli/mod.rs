//! CLI module for intake
//!
//! Provides the command-line interface using clap.

pub mod commands;
mod context;
mod prompt;

pub use context::Context;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::schemas::{TaskStatus, UiMode};

/// Intake - Walk patients through branching intake questionnaires
#[derive(Parser, Debug)]
#[command(name = "intake")]
#[command(version)]
#[command(about = "Walk patients through branching intake questionnaires and track the resulting tasks")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Run flows without saving the resulting task
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the data directory (defaults to $INTAKE_DATA_DIR, then ./.intake)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available flows
    Flows {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer a flow interactively
    Run {
        /// Flow ID
        flow_id: String,

        /// Presentation to use (chat, form); defaults to the stored preference
        #[arg(long)]
        mode: Option<UiMode>,
    },

    /// Inspect and manage task records
    Tasks {
        #[command(subcommand)]
        action: TaskCommands,
    },

    /// Show or set the preferred presentation
    Mode {
        /// New mode (chat, form)
        mode: Option<UiMode>,
    },

    /// Check a flow definition file
    Validate {
        /// Path to the flow JSON file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details of a task
    Show {
        /// Task ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },

    /// Change the status of a task
    Status {
        /// Task ID
        id: String,

        /// New status (in_progress, completed, needs_info)
        status: TaskStatus,
    },
}
