//! Mode command - Show or set the preferred presentation

use crate::cli::Context;
use crate::errors::Result;
use crate::schemas::UiMode;

/// Show the stored mode, or store a new one
pub async fn run(ctx: &Context, mode: Option<UiMode>) -> Result<()> {
    let mut preferences = ctx.preferences();
    match mode {
        Some(mode) => {
            preferences.set_ui_mode(mode)?;
            println!("UI mode set to {}", mode);
        }
        None => println!("{}", preferences.ui_mode()?),
    }
    Ok(())
}
