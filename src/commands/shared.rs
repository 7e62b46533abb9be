//! `flowscribe shared` command.

use crate::commands::render::render_share;
use crate::context::ServiceContext;
use crate::share::fetch_shared;

/// Executes the `shared` command.
///
/// Looks up a shared analysis by id, counts the view, and prints the
/// snapshot. No sign-in is required; shares are publicly readable.
///
/// # Errors
///
/// Returns an error string when the id is unknown or the store fails.
pub async fn run(ctx: &ServiceContext, share_id: &str) -> Result<(), String> {
    let record = fetch_shared(ctx, share_id).await?;
    println!("{}", render_share(&record));
    Ok(())
}
