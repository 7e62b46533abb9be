//! `flowscribe share` command.

use crate::config::{Principal, Settings};
use crate::context::ServiceContext;
use crate::share::{create_share, share_link};

/// Executes the `share` command.
///
/// Publishes a snapshot of one saved analysis and prints the minted share
/// id, plus a full link when a base URL is configured.
///
/// # Errors
///
/// Returns an error string when no user is signed in, the id is not in the
/// caller's history, or the share cannot be created.
pub async fn run(
    ctx: &ServiceContext,
    settings: &Settings,
    history_id: &str,
) -> Result<(), String> {
    let principal = Principal::from_env()?;
    run_as(ctx, settings, &principal, history_id).await
}

async fn run_as(
    ctx: &ServiceContext,
    settings: &Settings,
    principal: &Principal,
    history_id: &str,
) -> Result<(), String> {
    let id = create_share(ctx, principal, history_id).await?;
    println!("Created share {id}");
    if let Some(base) = &settings.share_base_url {
        println!("{}", share_link(base, &id));
    }
    Ok(())
}
