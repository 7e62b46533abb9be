//! `flowscribe import` command.

use crate::commands::render::render_repository;
use crate::config::Principal;
use crate::context::ServiceContext;
use crate::history::save_analysis;
use crate::hosting::parse_repository_url;
use crate::repository::analyze_repository;

/// Executes the `import` command.
///
/// Fetches the repository behind `url`, analyzes it group by group, prints
/// the merged report, and saves the analysis to the signed-in user's
/// history.
///
/// # Errors
///
/// Returns an error string when no user is signed in, the URL is invalid,
/// the repository yields no source files, or the save fails after retries.
pub async fn run(ctx: &ServiceContext, url: &str) -> Result<(), String> {
    let principal = Principal::from_env()?;
    run_as(ctx, &principal, url).await
}

/// Imports a repository on behalf of an already resolved principal.
async fn run_as(ctx: &ServiceContext, principal: &Principal, url: &str) -> Result<(), String> {
    let repo = parse_repository_url(url)?;

    eprintln!("Analyzing {}/{}...", repo.owner, repo.repo);
    let analysis = analyze_repository(ctx, &repo)
        .await
        .map_err(|e| format!("Failed to analyze repository: {e}"))?;

    println!("{}", render_repository(&analysis));

    let id = save_analysis(ctx, principal, url, &repo, analysis).await?;
    println!("\nSaved to history as {id}");
    Ok(())
}
