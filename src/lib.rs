//! Intake - Branching questionnaire engine for patient intake
//!
//! This library provides the core functionality for the intake CLI, including:
//! - Schema definitions for flows, answers, tasks and configuration
//! - The traversal engine: step visibility, sequential and paged navigation
//! - Chat and form session drivers with answer validation
//! - The flow registry with bundled flow definitions
//! - Task record and preference storage behind a key-value boundary

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod flows;
pub mod fs;
pub mod schemas;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use errors::{IntakeError, Result};
pub use flows::FlowRegistry;
pub use schemas::{Answer, AnswerSet, Config, Flow, Step, TaskRecord};
pub use session::{ChatSession, FormSession};
