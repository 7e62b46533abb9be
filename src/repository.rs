//! Whole-repository analysis: fetch, partition, per-group invocation, merge.
//!
//! Partial failure is absorbed at group granularity. A group whose model
//! invocation fails contributes safe defaults and a degraded tag; only a
//! repository with no source files at all aborts the operation.

use serde::{Deserialize, Serialize};

use crate::analyze::analyze_code;
use crate::complexity::{overall_complexity, ComplexityEstimate};
use crate::context::ServiceContext;
use crate::groups::{partition_files, FileGroup, GroupKind};
use crate::hosting::walk_all_files;
use crate::ports::source_host::RepoRef;
use crate::report::{AnalysisResult, GroupPseudocode, TestCase};

/// How one group's model invocation went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOutcome {
    /// The model responded; the result carries whatever it said.
    Analyzed,
    /// The invocation failed or timed out; the result is the safe default.
    Degraded,
}

/// The analysis of one file group, tagged with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAnalysis {
    /// Which group this is.
    pub kind: GroupKind,
    /// Whether the result came from the model or from defaulting.
    pub outcome: GroupOutcome,
    /// The group's analysis, safe defaults when degraded.
    pub result: AnalysisResult,
    /// Paths of the files fed into the invocation.
    pub files: Vec<String>,
}

/// Time/space estimate of one group inside a repository rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupComplexity {
    /// The group being estimated.
    pub group: GroupKind,
    /// Its validated estimate.
    pub complexity: ComplexityEstimate,
}

/// Repository-wide complexity: the rollup plus the per-group breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryComplexity {
    /// Per-axis maximum across groups.
    pub overall: ComplexityEstimate,
    /// One entry per processed group, in group order.
    pub by_group: Vec<GroupComplexity>,
}

/// A test case tagged with the group it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedTestCase {
    /// Originating group.
    pub group: GroupKind,
    /// The test case itself, flattened into the same record.
    #[serde(flatten)]
    pub case: TestCase,
}

/// The merged analysis of a whole repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAnalysis {
    /// Diagram descriptions of all groups, concatenated in group order.
    pub flowchart: String,
    /// One pseudocode block per processed group, in group order.
    pub pseudocode: Vec<GroupPseudocode>,
    /// Overall and per-group complexity.
    pub complexity: RepositoryComplexity,
    /// All groups' test cases, in group order, each tagged with its group.
    pub test_cases: Vec<GroupedTestCase>,
}

/// Analyzes a whole repository into one merged result.
///
/// # Errors
///
/// Returns an error string only when the repository yields no source files;
/// every later failure degrades to defaults at group granularity.
pub async fn analyze_repository(
    ctx: &ServiceContext,
    repo: &RepoRef,
) -> Result<RepositoryAnalysis, String> {
    let groups = analyze_repository_groups(ctx, repo).await?;
    Ok(merge_group_analyses(&groups))
}

/// Analyzes a repository and returns the per-group results before merging.
///
/// Fetch failures are swallowed into an empty file list (with a warning on
/// stderr), matching the established degradation behavior; the empty list
/// then fails as an empty repository. The per-group model invocations run
/// concurrently and all complete before this returns; one group's failure
/// never cancels its siblings.
///
/// # Errors
///
/// Returns an error string when no source files were collected.
pub async fn analyze_repository_groups(
    ctx: &ServiceContext,
    repo: &RepoRef,
) -> Result<Vec<GroupAnalysis>, String> {
    let files = match walk_all_files(ctx.host.as_ref(), repo).await {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Warning: failed to fetch repository files: {e}");
            Vec::new()
        }
    };
    if files.is_empty() {
        return Err("No files found in repository".to_string());
    }

    // One fixed slot per group so the invocations form a single join.
    let mut slots: [Option<FileGroup>; 5] = [None, None, None, None, None];
    for group in partition_files(files) {
        let slot = group.kind.slot();
        slots[slot] = Some(group);
    }
    let [models, controllers, views, utilities, other] = slots;

    let (models, controllers, views, utilities, other) = tokio::join!(
        analyze_slot(ctx, models),
        analyze_slot(ctx, controllers),
        analyze_slot(ctx, views),
        analyze_slot(ctx, utilities),
        analyze_slot(ctx, other),
    );

    Ok([models, controllers, views, utilities, other].into_iter().flatten().collect())
}

/// Merges per-group analyses into one repository result.
///
/// Every processed group appears in the pseudocode and per-group complexity
/// lists, degraded groups with their defaults; empty diagram descriptions
/// are skipped in the concatenation. The overall complexity takes the
/// maximum per axis independently, so the overall time and space need not
/// come from the same group.
#[must_use]
pub fn merge_group_analyses(groups: &[GroupAnalysis]) -> RepositoryAnalysis {
    let flowchart = groups
        .iter()
        .map(|g| g.result.flowchart.as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let pseudocode = groups
        .iter()
        .map(|g| GroupPseudocode { group: g.kind, code: g.result.pseudocode.to_text() })
        .collect();

    let estimates: Vec<ComplexityEstimate> = groups.iter().map(|g| g.result.complexity).collect();
    let by_group = groups
        .iter()
        .map(|g| GroupComplexity { group: g.kind, complexity: g.result.complexity })
        .collect();

    let test_cases = groups
        .iter()
        .flat_map(|g| {
            g.result
                .test_cases
                .iter()
                .map(|case| GroupedTestCase { group: g.kind, case: case.clone() })
        })
        .collect();

    RepositoryAnalysis {
        flowchart,
        pseudocode,
        complexity: RepositoryComplexity { overall: overall_complexity(&estimates), by_group },
        test_cases,
    }
}

async fn analyze_slot(ctx: &ServiceContext, group: Option<FileGroup>) -> Option<GroupAnalysis> {
    let group = group?;
    Some(analyze_group(ctx, group).await)
}

async fn analyze_group(ctx: &ServiceContext, group: FileGroup) -> GroupAnalysis {
    let files: Vec<String> = group.files.iter().map(|f| f.path.clone()).collect();
    let combined =
        group.files.iter().map(|f| f.content.as_str()).collect::<Vec<_>>().join("\n\n");

    match analyze_code(ctx, &combined).await {
        Ok(result) => {
            GroupAnalysis { kind: group.kind, outcome: GroupOutcome::Analyzed, result, files }
        }
        Err(e) => {
            eprintln!("Warning: analysis of the {} group failed: {e}", group.kind);
            GroupAnalysis {
                kind: group.kind,
                outcome: GroupOutcome::Degraded,
                result: AnalysisResult::degraded(),
                files,
            }
        }
    }
}
