//! CLI command implementations

pub mod flows;
pub mod mode;
pub mod run;
pub mod tasks;
pub mod validate;
