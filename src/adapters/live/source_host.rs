//! Live adapter for the `SourceHost` port using the GitHub contents API.

use std::env;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;

use crate::ports::source_host::{
    ContentFuture, EntriesFuture, EntryKind, RepoEntry, RepoRef, SourceHost,
};

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "flowscribe";

/// Live source host backed by the GitHub repository-contents API.
///
/// Works unauthenticated within GitHub's public rate limits; set
/// `GITHUB_TOKEN` to raise them or to read private repositories.
pub struct GitHubHost {
    client: Client,
}

impl GitHubHost {
    /// Creates a new GitHub-backed source host.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    async fn get_contents(
        &self,
        repo: &RepoRef,
        path: &str,
    ) -> Result<ContentsResponse, Box<dyn std::error::Error + Send + Sync>> {
        let url = contents_url(repo, path);
        let mut request = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json");
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(
            |e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("GitHub API request failed: {e}").into()
            },
        )?;

        let status = response.status();
        let response_text =
            response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("Failed to read GitHub API response: {e}").into()
            })?;

        if !status.is_success() {
            let msg = serde_json::from_str::<GitHubError>(&response_text)
                .map(|e| e.message)
                .unwrap_or(response_text);
            return Err(format!("GitHub API error ({}): {msg}", status.as_u16()).into());
        }

        serde_json::from_str(&response_text).map_err(
            |e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("Failed to parse GitHub API response: {e}").into()
            },
        )
    }
}

impl Default for GitHubHost {
    fn default() -> Self {
        Self::new()
    }
}

/// The contents endpoint answers with a listing for a directory path and a
/// single item for a file path.
#[derive(Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentItem>),
    Single(Box<ContentItem>),
}

/// One item from the contents endpoint.
#[derive(Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Option<String>,
}

/// Error response from the GitHub API.
#[derive(Deserialize)]
struct GitHubError {
    message: String,
}

fn contents_url(repo: &RepoRef, path: &str) -> String {
    if path.is_empty() {
        format!("{GITHUB_API_URL}/repos/{}/{}/contents", repo.owner, repo.repo)
    } else {
        format!("{GITHUB_API_URL}/repos/{}/{}/contents/{path}", repo.owner, repo.repo)
    }
}

fn entry_kind(kind: &str) -> Option<EntryKind> {
    match kind {
        "file" => Some(EntryKind::File),
        "dir" => Some(EntryKind::Dir),
        // Symlinks and submodules have no counterpart in the walk.
        _ => None,
    }
}

/// Decodes the transport encoding of a file body.
///
/// The API wraps base64 content in newlines, so whitespace is stripped
/// before decoding.
fn decode_content(encoded: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| format!("Failed to decode file content: {e}"))?;
    String::from_utf8(bytes)
        .map_err(|e| format!("File content is not valid UTF-8: {e}").into())
}

impl SourceHost for GitHubHost {
    fn list_dir(&self, repo: &RepoRef, path: &str) -> EntriesFuture<'_> {
        let repo = repo.clone();
        let path = path.to_string();

        Box::pin(async move {
            let items = match self.get_contents(&repo, &path).await? {
                ContentsResponse::Listing(items) => items,
                // A file path answers with one item; surface it as a
                // one-entry listing.
                ContentsResponse::Single(item) => vec![*item],
            };

            Ok(items
                .into_iter()
                .filter_map(|item| {
                    entry_kind(&item.kind)
                        .map(|kind| RepoEntry { name: item.name, path: item.path, kind })
                })
                .collect())
        })
    }

    fn read_file(&self, repo: &RepoRef, path: &str) -> ContentFuture<'_> {
        let repo = repo.clone();
        let path = path.to_string();

        Box::pin(async move {
            match self.get_contents(&repo, &path).await? {
                ContentsResponse::Listing(_) => {
                    Err("Path points to a directory, not a file".into())
                }
                ContentsResponse::Single(item) => {
                    decode_content(item.content.as_deref().unwrap_or_default())
                }
            }
        })
    }
}
