//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (time, generative-model endpoint, source hosting,
//! document store). Implementations live in `src/adapters/`.

pub mod clock;
pub mod docstore;
pub mod model;
pub mod source_host;

pub use clock::Clock;
pub use docstore::{DocumentStore, HistoryCallback, WatchHandle};
pub use model::{CompletionFuture, CompletionRequest, CompletionResponse, ModelClient};
pub use source_host::{EntryKind, RepoEntry, RepoRef, SourceFile, SourceHost};
