//! Shareable analysis snapshots and their view counter.
//!
//! A share is a copy of one history record frozen at share time; later
//! changes to the source record never reach it. The only mutation a share
//! ever sees is the view-count increment on each successful fetch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Principal;
use crate::context::ServiceContext;
use crate::history::{fetch_history, with_retries, HistoryRecord, RETRY_BASE_DELAY};
use crate::report::GroupPseudocode;
use crate::repository::{GroupedTestCase, RepositoryComplexity};

/// A published snapshot of one history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    /// Store-minted identifier, empty until the record is first saved.
    #[serde(default)]
    pub id: String,
    /// Merged diagram description at share time.
    pub flowchart: String,
    /// Repository owner segment.
    pub owner: String,
    /// Repository name segment.
    pub repo: String,
    /// The URL the analysis was imported from.
    pub repo_url: String,
    /// Overall and per-group complexity at share time.
    pub complexity: RepositoryComplexity,
    /// Per-group pseudocode at share time.
    pub pseudocode: Vec<GroupPseudocode>,
    /// Tagged test cases at share time.
    pub test_cases: Vec<GroupedTestCase>,
    /// When the share was created.
    pub shared_at: DateTime<Utc>,
    /// Successful fetches so far, never decremented.
    pub view_count: u64,
    /// When the source history record was created.
    pub original_created_at: DateTime<Utc>,
    /// User who shared it, when known.
    #[serde(default)]
    pub shared_by: Option<String>,
}

impl ShareRecord {
    /// Freezes a history record into an unsaved share snapshot.
    ///
    /// Every field is copied, so later changes to the source record never
    /// affect the share. The view count starts at zero and the id stays
    /// empty until the store mints one.
    #[must_use]
    pub fn snapshot_of(
        record: &HistoryRecord,
        shared_by: Option<String>,
        shared_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            flowchart: record.flowchart_data.flowchart.clone(),
            owner: record.owner.clone(),
            repo: record.repo.clone(),
            repo_url: record.repo_url.clone(),
            complexity: record.flowchart_data.complexity.clone(),
            pseudocode: record.flowchart_data.pseudocode.clone(),
            test_cases: record.flowchart_data.test_cases.clone(),
            shared_at,
            view_count: 0,
            original_created_at: record.created_at,
            shared_by,
        }
    }
}

/// Builds the public link for a share id.
#[must_use]
pub fn share_link(base_url: &str, id: &str) -> String {
    format!("{}/shared/{id}", base_url.trim_end_matches('/'))
}

/// Shares one record from the user's history, returning the minted share id.
///
/// The record is looked up in the caller's own history, so a user can only
/// share analyses they own.
///
/// # Errors
///
/// Returns a user-facing message when the history cannot be loaded, when the
/// id is not in the caller's history, or when the save still fails after
/// retries.
pub async fn create_share(
    ctx: &ServiceContext,
    principal: &Principal,
    history_id: &str,
) -> Result<String, String> {
    let history = fetch_history(ctx, principal).await?;
    let Some(record) = history.into_iter().find(|r| r.id == history_id) else {
        return Err(format!("No analysis with id {history_id} in your history"));
    };

    let snapshot = ShareRecord::snapshot_of(&record, Some(principal.id.clone()), ctx.clock.now());
    publish_snapshot(ctx, &snapshot, RETRY_BASE_DELAY).await
}

/// Fetches a shared analysis for display and counts the view.
///
/// The increment happens after the read, so the returned record carries the
/// count as it was before this fetch.
///
/// # Errors
///
/// Returns a user-facing message when the id is unknown or the store fails.
pub async fn fetch_shared(ctx: &ServiceContext, share_id: &str) -> Result<ShareRecord, String> {
    let record = lookup_shared(ctx, share_id, RETRY_BASE_DELAY).await?;
    ctx.store.increment_share_views(share_id).await.map_err(|e| {
        eprintln!("Warning: could not count the view: {e}");
        "Failed to load shared analysis. Please try again.".to_string()
    })?;
    Ok(record)
}

async fn publish_snapshot(
    ctx: &ServiceContext,
    snapshot: &ShareRecord,
    base_delay: Duration,
) -> Result<String, String> {
    with_retries(base_delay, || ctx.store.save_share(snapshot)).await.map_err(|e| {
        eprintln!("Warning: could not create the share: {e}");
        if e.to_string().to_lowercase().contains("permission") {
            "You don't have permission to share flowcharts".to_string()
        } else {
            "Failed to create share link. Please try again.".to_string()
        }
    })
}

async fn lookup_shared(
    ctx: &ServiceContext,
    share_id: &str,
    base_delay: Duration,
) -> Result<ShareRecord, String> {
    let found = with_retries(base_delay, || ctx.store.get_share(share_id)).await.map_err(|e| {
        eprintln!("Warning: could not load the share: {e}");
        "Failed to load shared analysis. Please try again.".to_string()
    })?;
    found.ok_or_else(|| "Shared analysis not found".to_string())
}
