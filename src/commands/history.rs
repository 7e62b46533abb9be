//! `flowscribe history` command.

use crate::commands::render::render_history_list;
use crate::config::Principal;
use crate::context::ServiceContext;
use crate::history::{fetch_history, watch_history};

/// Executes the `history` command.
///
/// Prints the signed-in user's saved analyses, newest first. With `watch`,
/// reprints the list whenever it changes until Ctrl-C.
///
/// # Errors
///
/// Returns an error string when no user is signed in or the history cannot
/// be loaded or watched.
pub async fn run(ctx: &ServiceContext, watch: bool) -> Result<(), String> {
    let principal = Principal::from_env()?;
    if watch {
        run_watch(ctx, &principal).await
    } else {
        run_list(ctx, &principal).await
    }
}

async fn run_list(ctx: &ServiceContext, principal: &Principal) -> Result<(), String> {
    let records = fetch_history(ctx, principal).await?;
    println!("{}", render_history_list(&records));
    Ok(())
}

async fn run_watch(ctx: &ServiceContext, principal: &Principal) -> Result<(), String> {
    let handle = watch_history(
        ctx,
        principal,
        Box::new(|records| {
            println!("{}\n", render_history_list(&records));
        }),
    )
    .await?;

    eprintln!("Watching history; press Ctrl-C to stop.");
    let result =
        tokio::signal::ctrl_c().await.map_err(|e| format!("Failed to wait for Ctrl-C: {e}"));
    handle.unsubscribe();
    result
}
