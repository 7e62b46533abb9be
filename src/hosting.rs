//! Repository-URL parsing and the full-tree source walk.

use crate::ports::source_host::{EntryKind, RepoRef, SourceFile, SourceHost};

/// Extension of the files collected by the walk.
pub const SOURCE_EXTENSION: &str = ".js";

/// Extracts the owner and repository from a hosted-repository URL.
///
/// The URL must carry a scheme and at least two non-empty path segments
/// after the host; anything past the repository segment (branch paths,
/// queries, fragments) is ignored. The repository segment is taken
/// verbatim, including any `.git` suffix.
///
/// # Errors
///
/// Returns a user-facing error string when the URL has no scheme or fewer
/// than two path segments.
pub fn parse_repository_url(url: &str) -> Result<RepoRef, String> {
    let invalid = || format!("Invalid repository URL: {url}");

    let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
    if scheme.is_empty() {
        return Err(invalid());
    }

    // Path only; queries and fragments never contribute segments.
    let path = rest.find(['?', '#']).map_or(rest, |at| &rest[..at]);

    let mut segments = path.split('/');
    let _host = segments.next();
    let owner = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let repo = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;

    Ok(RepoRef { owner: owner.to_string(), repo: repo.to_string() })
}

/// Collects every source file in a repository, depth-first.
///
/// Walks the tree with an explicit stack, descending into every directory
/// and reading every file whose path ends in [`SOURCE_EXTENSION`]. There is
/// no per-file recovery: the first listing or read failure aborts the whole
/// walk.
///
/// # Errors
///
/// Returns an error string naming the path that failed when any listing or
/// file read fails.
pub async fn walk_all_files(
    host: &dyn SourceHost,
    repo: &RepoRef,
) -> Result<Vec<SourceFile>, String> {
    let mut files = Vec::new();
    let mut stack = vec![String::new()];

    while let Some(path) = stack.pop() {
        let entries = host.list_dir(repo, &path).await.map_err(|e| {
            let shown = if path.is_empty() { "repository root" } else { path.as_str() };
            format!("Failed to list {shown}: {e}")
        })?;

        for entry in entries {
            match entry.kind {
                EntryKind::Dir => stack.push(entry.path),
                EntryKind::File => {
                    if entry.path.ends_with(SOURCE_EXTENSION) {
                        let content = host
                            .read_file(repo, &entry.path)
                            .await
                            .map_err(|e| format!("Failed to read {}: {e}", entry.path))?;
                        files.push(SourceFile { path: entry.path, content });
                    }
                }
            }
        }
    }

    Ok(files)
}
