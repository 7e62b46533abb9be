//! Source-hosting port for repository listing and file retrieval.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returning directory entries, used by [`SourceHost`].
pub type EntriesFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<RepoEntry>, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Boxed future returning decoded file content, used by [`SourceHost`].
pub type ContentFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// An owner/repository pair identifying one hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

/// What a directory entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
}

/// One entry in a repository directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Entry name without its directory prefix.
    pub name: String,
    /// Full path from the repository root.
    pub path: String,
    /// File or directory.
    pub kind: EntryKind,
}

/// A repository file with its decoded text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path from the repository root.
    pub path: String,
    /// Decoded file content.
    pub content: String,
}

/// Lists directories and reads files from a hosted repository.
pub trait SourceHost: Send + Sync {
    /// Lists the entries of a repository directory (`""` for the root).
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails (network, auth, unknown repo).
    fn list_dir(&self, repo: &RepoRef, path: &str) -> EntriesFuture<'_>;

    /// Reads one file and returns its decoded text content.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails, including when the path resolves
    /// to a directory rather than a file.
    fn read_file(&self, repo: &RepoRef, path: &str) -> ContentFuture<'_>;
}
