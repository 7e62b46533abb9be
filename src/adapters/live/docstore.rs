//! Live adapter for the `DocumentStore` port using per-record JSON files.
//!
//! Layout under the data directory: `history/<id>.json` for history
//! records, `shared/<id>.json` for shares. Ids are minted here. The
//! history watch is a polling loop over the history directory; a backend
//! with a native change feed would push instead.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::history::HistoryRecord;
use crate::ports::docstore::{
    DocumentStore, HistoryCallback, HistoryListFuture, SaveFuture, ShareLookupFuture,
    SubscribeFuture, UnitFuture, WatchHandle,
};
use crate::share::ShareRecord;

const HISTORY_DIR: &str = "history";
const SHARED_DIR: &str = "shared";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Document store keeping one JSON file per record.
pub struct JsonFileStore {
    root: PathBuf,
    poll_interval: Duration,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. Directories are created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self::with_poll_interval(dir, DEFAULT_POLL_INTERVAL)
    }

    /// Creates a store with a custom watch poll interval.
    #[must_use]
    pub fn with_poll_interval(dir: &Path, poll_interval: Duration) -> Self {
        Self { root: dir.to_path_buf(), poll_interval }
    }

    fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY_DIR)
    }

    fn shared_dir(&self) -> PathBuf {
        self.root.join(SHARED_DIR)
    }

    fn share_path(&self, id: &str) -> PathBuf {
        self.shared_dir().join(format!("{id}.json"))
    }
}

/// Writes one record as `<dir>/<id>.json`, creating the directory first.
fn persist<T: Serialize>(
    dir: &Path,
    id: &str,
    value: &T,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(dir.join(format!("{id}.json")), json)?;
    Ok(())
}

/// Reads a user's records from the history directory, newest first.
///
/// A missing directory is an empty history. Files that fail to parse are
/// skipped with a warning so one damaged record cannot hide the rest.
fn read_user_history(
    dir: &Path,
    user_id: &str,
) -> Result<Vec<HistoryRecord>, Box<dyn Error + Send + Sync>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let text = std::fs::read_to_string(&path)?;
        match serde_json::from_str::<HistoryRecord>(&text) {
            Ok(record) if record.user_id == user_id => records.push(record),
            Ok(_) => {}
            Err(e) => {
                eprintln!("Warning: skipping unreadable history record {}: {e}", path.display());
            }
        }
    }

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(records)
}

impl DocumentStore for JsonFileStore {
    fn save_history(&self, record: &HistoryRecord) -> SaveFuture<'_> {
        let mut stored = record.clone();
        Box::pin(async move {
            stored.id = Uuid::new_v4().to_string();
            persist(&self.history_dir(), &stored.id, &stored)?;
            Ok(stored.id)
        })
    }

    fn history_for_user(&self, user_id: &str) -> HistoryListFuture<'_> {
        let user_id = user_id.to_string();
        Box::pin(async move { read_user_history(&self.history_dir(), &user_id) })
    }

    fn subscribe_history(&self, user_id: &str, callback: HistoryCallback) -> SubscribeFuture<'_> {
        let dir = self.history_dir();
        let user_id = user_id.to_string();
        let poll_interval = self.poll_interval;

        Box::pin(async move {
            let initial = read_user_history(&dir, &user_id)?;
            callback(initial.clone());

            let cancelled = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&cancelled);
            tokio::spawn(async move {
                let mut last = initial;
                loop {
                    tokio::time::sleep(poll_interval).await;
                    if flag.load(Ordering::SeqCst) {
                        return;
                    }
                    match read_user_history(&dir, &user_id) {
                        Ok(current) => {
                            if current != last && !flag.load(Ordering::SeqCst) {
                                callback(current.clone());
                                last = current;
                            }
                        }
                        Err(e) => eprintln!("Warning: history watch poll failed: {e}"),
                    }
                }
            });

            Ok(WatchHandle::new(move || cancelled.store(true, Ordering::SeqCst)))
        })
    }

    fn save_share(&self, record: &ShareRecord) -> SaveFuture<'_> {
        let mut stored = record.clone();
        Box::pin(async move {
            stored.id = Uuid::new_v4().to_string();
            persist(&self.shared_dir(), &stored.id, &stored)?;
            Ok(stored.id)
        })
    }

    fn get_share(&self, id: &str) -> ShareLookupFuture<'_> {
        let path = self.share_path(id);
        Box::pin(async move {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e.into()),
            };
            let record = serde_json::from_str(&text)?;
            Ok(Some(record))
        })
    }

    fn increment_share_views(&self, id: &str) -> UnitFuture<'_> {
        let path = self.share_path(id);
        let id = id.to_string();
        Box::pin(async move {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("No shared analysis {id}: {e}"))?;
            let mut record: ShareRecord = serde_json::from_str(&text)?;
            record.view_count += 1;
            std::fs::write(&path, serde_json::to_string_pretty(&record)?)?;
            Ok(())
        })
    }
}
