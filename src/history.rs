//! Per-user analysis history: saving, listing, and live watching.
//!
//! Persistence goes through the document-store port with a bounded retry
//! around every save and query. Failures surface as short user-facing
//! messages; the underlying cause goes to stderr.

use std::error::Error;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Principal;
use crate::context::ServiceContext;
use crate::ports::docstore::{HistoryCallback, WatchHandle};
use crate::ports::source_host::RepoRef;
use crate::repository::RepositoryAnalysis;

/// Attempts made before a persistence failure is surfaced.
pub(crate) const MAX_ATTEMPTS: u32 = 3;

/// Base delay of the linear backoff between attempts.
pub(crate) const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// One saved repository analysis, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Store-minted identifier, empty until the record is first saved.
    #[serde(default)]
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Owning user's email, when known.
    #[serde(default)]
    pub user_email: Option<String>,
    /// The URL the analysis was imported from.
    pub repo_url: String,
    /// Repository owner segment.
    pub owner: String,
    /// Repository name segment.
    pub repo: String,
    /// The merged analysis itself.
    pub flowchart_data: RepositoryAnalysis,
    /// Save timestamp.
    pub created_at: DateTime<Utc>,
}

/// Saves a repository analysis to the user's history, returning the id.
///
/// # Errors
///
/// Returns a user-facing message when the save still fails after retries,
/// distinguishing denied writes from transient failures.
pub async fn save_analysis(
    ctx: &ServiceContext,
    principal: &Principal,
    repo_url: &str,
    repo: &RepoRef,
    analysis: RepositoryAnalysis,
) -> Result<String, String> {
    let record = HistoryRecord {
        id: String::new(),
        user_id: principal.id.clone(),
        user_email: principal.email.clone(),
        repo_url: repo_url.to_string(),
        owner: repo.owner.clone(),
        repo: repo.repo.clone(),
        flowchart_data: analysis,
        created_at: ctx.clock.now(),
    };
    persist_record(ctx, &record, RETRY_BASE_DELAY).await
}

/// Returns the user's full history, newest first.
///
/// # Errors
///
/// Returns a user-facing message when the query still fails after retries.
pub async fn fetch_history(
    ctx: &ServiceContext,
    principal: &Principal,
) -> Result<Vec<HistoryRecord>, String> {
    query_history(ctx, &principal.id, RETRY_BASE_DELAY).await
}

/// Starts a live watch on the user's history.
///
/// The callback receives the full newest-first list immediately and on every
/// later change, until the handle is unsubscribed.
///
/// # Errors
///
/// Returns a user-facing message when the watch cannot be established.
pub async fn watch_history(
    ctx: &ServiceContext,
    principal: &Principal,
    callback: HistoryCallback,
) -> Result<WatchHandle, String> {
    ctx.store
        .subscribe_history(&principal.id, callback)
        .await
        .map_err(|e| format!("Failed to watch history: {e}"))
}

async fn persist_record(
    ctx: &ServiceContext,
    record: &HistoryRecord,
    base_delay: Duration,
) -> Result<String, String> {
    with_retries(base_delay, || ctx.store.save_history(record)).await.map_err(|e| {
        eprintln!("Warning: could not save flowchart: {e}");
        if permission_denied(e.as_ref()) {
            "You don't have permission to save flowcharts".to_string()
        } else {
            "Failed to save flowchart. Please try again.".to_string()
        }
    })
}

async fn query_history(
    ctx: &ServiceContext,
    user_id: &str,
    base_delay: Duration,
) -> Result<Vec<HistoryRecord>, String> {
    with_retries(base_delay, || ctx.store.history_for_user(user_id)).await.map_err(|e| {
        eprintln!("Warning: could not load history: {e}");
        if permission_denied(e.as_ref()) {
            "You don't have permission to view this history".to_string()
        } else {
            "Failed to load history. Please try again.".to_string()
        }
    })
}

/// Runs an operation up to [`MAX_ATTEMPTS`] times with linear backoff.
///
/// The delay before attempt `n + 1` is `base_delay * n`. The last error is
/// returned unchanged when every attempt fails.
pub(crate) async fn with_retries<T, F, Fut>(
    base_delay: Duration,
    mut operation: F,
) -> Result<T, Box<dyn Error + Send + Sync>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Box<dyn Error + Send + Sync>>>,
{
    let mut attempt: u32 = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < MAX_ATTEMPTS => {
                eprintln!("Warning: attempt {attempt} of {MAX_ATTEMPTS} failed, retrying: {e}");
                tokio::time::sleep(base_delay * attempt).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Denied writes and reads are recognized by their message, since every
/// store flattens its own error type into the boxed port error.
fn permission_denied(e: &(dyn Error + Send + Sync)) -> bool {
    e.to_string().to_lowercase().contains("permission")
}
