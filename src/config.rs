//! Environment-derived settings and the acting principal.
//!
//! There is no ambient authentication: every operation that needs the
//! current user takes a [`Principal`] resolved once at startup. API keys
//! are read by the live adapters at request time, not here.

use std::env;
use std::path::PathBuf;

/// Root directory for the JSON document store.
pub const DATA_DIR_ENV: &str = "FLOWSCRIBE_DATA_DIR";
/// Optional base URL prefixed to printed share links.
pub const SHARE_BASE_ENV: &str = "FLOWSCRIBE_SHARE_BASE_URL";
/// Identifier of the acting user.
pub const USER_ENV: &str = "FLOWSCRIBE_USER";
/// Optional email of the acting user, stored on history records.
pub const EMAIL_ENV: &str = "FLOWSCRIBE_EMAIL";

/// Store root used when [`DATA_DIR_ENV`] is unset.
const DEFAULT_DATA_DIR: &str = ".flowscribe";

/// Process-wide settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory of the document store.
    pub data_dir: PathBuf,
    /// Base URL for share links, when configured.
    pub share_base_url: Option<String>,
}

impl Settings {
    /// Reads settings from the environment, applying defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = non_empty(DATA_DIR_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        Self { data_dir, share_base_url: non_empty(SHARE_BASE_ENV) }
    }
}

/// The user on whose behalf authenticated operations run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable user identifier; history records are keyed by it.
    pub id: String,
    /// Email recorded on saved flowcharts, when known.
    pub email: Option<String>,
}

impl Principal {
    /// Resolves the acting principal from the environment.
    ///
    /// # Errors
    ///
    /// Returns a sign-in message naming [`USER_ENV`] when no user id is set.
    pub fn from_env() -> Result<Self, String> {
        let id = non_empty(USER_ENV).ok_or_else(|| {
            format!(
                "Please sign in to use flowchart history: set {USER_ENV} to your user id \
                 (and optionally {EMAIL_ENV} to your email)"
            )
        })?;
        Ok(Self { id, email: non_empty(EMAIL_ENV) })
    }
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.is_empty())
}
