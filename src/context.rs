//! Service context bundling all port trait objects.

use crate::config::Settings;
use crate::ports::clock::Clock;
use crate::ports::docstore::DocumentStore;
use crate::ports::model::ModelClient;
use crate::ports::source_host::SourceHost;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Clients and the
/// store are constructed once here and passed by reference into the
/// components that need them; nothing reads ambient singletons.
pub struct ServiceContext {
    /// Clock for record timestamps.
    pub clock: Box<dyn Clock>,
    /// Generative-model endpoint.
    pub model: Box<dyn ModelClient>,
    /// Source-hosting API.
    pub host: Box<dyn SourceHost>,
    /// Document store for history and shares.
    pub store: Box<dyn DocumentStore>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        use crate::adapters::live::clock::SystemClock;
        use crate::adapters::live::docstore::JsonFileStore;
        use crate::adapters::live::model::GeminiClient;
        use crate::adapters::live::source_host::GitHubHost;

        Self {
            clock: Box::new(SystemClock),
            model: Box::new(GeminiClient::new()),
            host: Box::new(GitHubHost::new()),
            store: Box::new(JsonFileStore::new(&settings.data_dir)),
        }
    }

    /// Creates a context where every port panics when touched.
    ///
    /// Test setup starts here and replaces only the ports a test exercises,
    /// so an unexpected boundary call fails loudly instead of hitting the
    /// network or disk.
    #[cfg(test)]
    pub(crate) fn panicking() -> Self {
        Self {
            clock: Box::new(PanickingClock),
            model: Box::new(PanickingModelClient),
            host: Box::new(PanickingSourceHost),
            store: Box::new(PanickingDocumentStore),
        }
    }
}

// --- Panicking adapters for ports a test did not replace ---

#[cfg(test)]
struct PanickingClock;
#[cfg(test)]
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not replaced in this test context");
    }
}

#[cfg(test)]
struct PanickingModelClient;
#[cfg(test)]
impl ModelClient for PanickingModelClient {
    fn complete(
        &self,
        _request: &crate::ports::model::CompletionRequest,
    ) -> crate::ports::model::CompletionFuture<'_> {
        panic!("ModelClient port not replaced in this test context");
    }
}

#[cfg(test)]
struct PanickingSourceHost;
#[cfg(test)]
impl SourceHost for PanickingSourceHost {
    fn list_dir(
        &self,
        _repo: &crate::ports::source_host::RepoRef,
        _path: &str,
    ) -> crate::ports::source_host::EntriesFuture<'_> {
        panic!("SourceHost port not replaced in this test context");
    }
    fn read_file(
        &self,
        _repo: &crate::ports::source_host::RepoRef,
        _path: &str,
    ) -> crate::ports::source_host::ContentFuture<'_> {
        panic!("SourceHost port not replaced in this test context");
    }
}

#[cfg(test)]
struct PanickingDocumentStore;
#[cfg(test)]
impl DocumentStore for PanickingDocumentStore {
    fn save_history(
        &self,
        _record: &crate::history::HistoryRecord,
    ) -> crate::ports::docstore::SaveFuture<'_> {
        panic!("DocumentStore port not replaced in this test context");
    }
    fn history_for_user(&self, _user_id: &str) -> crate::ports::docstore::HistoryListFuture<'_> {
        panic!("DocumentStore port not replaced in this test context");
    }
    fn subscribe_history(
        &self,
        _user_id: &str,
        _callback: crate::ports::docstore::HistoryCallback,
    ) -> crate::ports::docstore::SubscribeFuture<'_> {
        panic!("DocumentStore port not replaced in this test context");
    }
    fn save_share(
        &self,
        _record: &crate::share::ShareRecord,
    ) -> crate::ports::docstore::SaveFuture<'_> {
        panic!("DocumentStore port not replaced in this test context");
    }
    fn get_share(&self, _id: &str) -> crate::ports::docstore::ShareLookupFuture<'_> {
        panic!("DocumentStore port not replaced in this test context");
    }
    fn increment_share_views(&self, _id: &str) -> crate::ports::docstore::UnitFuture<'_> {
        panic!("DocumentStore port not replaced in this test context");
    }
}
