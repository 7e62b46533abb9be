//! Purpose-based partitioning of repository files.
//!
//! Every file lands in exactly one group: groups are tried in a fixed
//! priority order and the first predicate matching the lowercased path
//! wins, with `other` claiming whatever is left.

use serde::{Deserialize, Serialize};

use crate::ports::source_host::SourceFile;

/// The five purpose groups, in priority and merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Data shapes: paths mentioning `model`, `entity`, or `schema`.
    Models,
    /// Request handling: paths mentioning `controller` or `handler`.
    Controllers,
    /// Presentation: paths mentioning `view`, `component`, or `template`.
    Views,
    /// Support code: paths mentioning `util` or `helper`.
    Utilities,
    /// Everything not claimed by an earlier group.
    Other,
}

/// All groups in evaluation order.
pub const ALL_GROUPS: [GroupKind; 5] = [
    GroupKind::Models,
    GroupKind::Controllers,
    GroupKind::Views,
    GroupKind::Utilities,
    GroupKind::Other,
];

impl GroupKind {
    /// The lowercase display and wire name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Controllers => "controllers",
            Self::Views => "views",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }

    /// Classifies a file path, first matching group wins.
    #[must_use]
    pub fn of(path: &str) -> Self {
        let lowered = path.to_lowercase();
        ALL_GROUPS.iter().copied().find(|kind| kind.matches(&lowered)).unwrap_or(Self::Other)
    }

    /// Position in [`ALL_GROUPS`], used for bucket indexing.
    #[must_use]
    pub fn slot(self) -> usize {
        match self {
            Self::Models => 0,
            Self::Controllers => 1,
            Self::Views => 2,
            Self::Utilities => 3,
            Self::Other => 4,
        }
    }

    fn matches(self, lowered_path: &str) -> bool {
        match self {
            Self::Models => {
                lowered_path.contains("model")
                    || lowered_path.contains("entity")
                    || lowered_path.contains("schema")
            }
            Self::Controllers => {
                lowered_path.contains("controller") || lowered_path.contains("handler")
            }
            Self::Views => {
                lowered_path.contains("view")
                    || lowered_path.contains("component")
                    || lowered_path.contains("template")
            }
            Self::Utilities => lowered_path.contains("util") || lowered_path.contains("helper"),
            Self::Other => true,
        }
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Files sharing one purpose group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// The group these files belong to.
    pub kind: GroupKind,
    /// Member files, in input order.
    pub files: Vec<SourceFile>,
}

/// Partitions files into purpose groups.
///
/// The result keeps [`ALL_GROUPS`] order and omits empty groups; files
/// within a group keep their input order.
#[must_use]
pub fn partition_files(files: Vec<SourceFile>) -> Vec<FileGroup> {
    let mut buckets: [Vec<SourceFile>; 5] = Default::default();
    for file in files {
        let kind = GroupKind::of(&file.path);
        buckets[kind.slot()].push(file);
    }

    ALL_GROUPS
        .into_iter()
        .zip(buckets)
        .filter(|(_, files)| !files.is_empty())
        .map(|(kind, files)| FileGroup { kind, files })
        .collect()
}
