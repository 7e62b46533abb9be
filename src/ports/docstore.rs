//! Document-store port for history and share persistence.
//!
//! Three logical namespaces sit behind this trait: per-user flowchart
//! history, publicly readable shared analyses, and the share view counter.
//! The store mints record ids; callers never choose them.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use crate::history::HistoryRecord;
use crate::share::ShareRecord;

/// Boxed future returning a minted record id.
pub type SaveFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Boxed future returning a user's full history, newest first.
pub type HistoryListFuture<'a> = Pin<
    Box<dyn Future<Output = Result<Vec<HistoryRecord>, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// Boxed future returning a live watch registration.
pub type SubscribeFuture<'a> =
    Pin<Box<dyn Future<Output = Result<WatchHandle, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Boxed future returning a share lookup (`None` when the id is unknown).
pub type ShareLookupFuture<'a> = Pin<
    Box<
        dyn Future<Output = Result<Option<ShareRecord>, Box<dyn Error + Send + Sync>>> + Send + 'a,
    >,
>;

/// Boxed future for operations with no payload.
pub type UnitFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Callback invoked with the full ordered history on every change.
pub type HistoryCallback = Box<dyn Fn(Vec<HistoryRecord>) + Send + Sync>;

/// Handle releasing a history watch.
///
/// Dropping the handle without calling [`WatchHandle::unsubscribe`] leaves
/// the watch running for the lifetime of the store.
pub struct WatchHandle {
    cancel: Box<dyn FnOnce() + Send>,
}

impl WatchHandle {
    /// Wraps the store-specific cancel action.
    #[must_use]
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self { cancel: Box::new(cancel) }
    }

    /// Stops further deliveries and releases the underlying watch.
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

/// Persists and retrieves history and share records.
pub trait DocumentStore: Send + Sync {
    /// Saves a history record, returning the minted id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is denied or fails.
    fn save_history(&self, record: &HistoryRecord) -> SaveFuture<'_>;

    /// Returns all history records for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is denied or fails.
    fn history_for_user(&self, user_id: &str) -> HistoryListFuture<'_>;

    /// Watches a user's history.
    ///
    /// The callback receives the full newest-first list immediately and
    /// again whenever the underlying set changes, until the returned handle
    /// is unsubscribed.
    ///
    /// # Errors
    ///
    /// Returns an error if the watch cannot be established.
    fn subscribe_history(&self, user_id: &str, callback: HistoryCallback) -> SubscribeFuture<'_>;

    /// Saves a share record, returning the minted id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is denied or fails.
    fn save_share(&self, record: &ShareRecord) -> SaveFuture<'_>;

    /// Looks up a share record by id; `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails for any reason other than absence.
    fn get_share(&self, id: &str) -> ShareLookupFuture<'_>;

    /// Increments a share's view count by exactly 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown or the write fails.
    fn increment_share_views(&self, id: &str) -> UnitFuture<'_>;
}
