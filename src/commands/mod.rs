//! Command dispatch and handlers.

pub mod analyze;
pub mod history;
pub mod import;
pub mod render;
pub mod share;
pub mod shared;

use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatches a parsed command to its handler.
///
/// Settings and the live service context are resolved once here; handlers
/// never read the environment for anything but the acting principal.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let settings = Settings::from_env();
    let ctx = ServiceContext::live(&settings);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start the async runtime: {e}"))?;
    runtime.block_on(dispatch_with_context(command, &ctx, &settings))
}

/// Dispatches a command with the given service context and settings.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), String> {
    match command {
        Command::Analyze { file } => analyze::run(ctx, file.as_deref()).await,
        Command::Import { url } => import::run(ctx, url).await,
        Command::History { watch } => history::run(ctx, *watch).await,
        Command::Share { history_id } => share::run(ctx, settings, history_id).await,
        Command::Shared { share_id } => shared::run(ctx, share_id).await,
    }
}
