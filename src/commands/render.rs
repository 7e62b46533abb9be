//! Plain-text rendering of analysis reports.
//!
//! The diagram description is parsed before display so a malformed or
//! oversized description renders an explicit error state; an empty
//! description renders nothing rather than an error.

use std::fmt::Write as _;

use crate::complexity::ComplexityEstimate;
use crate::diagram::parse_diagram;
use crate::history::HistoryRecord;
use crate::report::{render_value, AnalysisResult, GroupPseudocode, Pseudocode, TestCase};
use crate::repository::{GroupedTestCase, RepositoryAnalysis};
use crate::share::ShareRecord;

/// Renders a one-shot code analysis.
#[must_use]
pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();
    match &result.pseudocode {
        Pseudocode::Plain(text) => plain_pseudocode_section(text, &mut out),
        Pseudocode::Grouped(blocks) => {
            grouped_pseudocode_section(blocks.as_slice(), &mut out);
        }
    }
    flowchart_section(&result.flowchart, &mut out);
    let _ = writeln!(out, "Complexity: {}", estimate_text(result.complexity));
    let _ = writeln!(out);
    if !result.test_cases.is_empty() {
        let _ = writeln!(out, "Test cases:");
        for (index, case) in result.test_cases.iter().enumerate() {
            test_case_lines(index, None, case, &mut out);
        }
    }
    out.trim_end().to_string()
}

/// Renders a merged repository analysis.
#[must_use]
pub fn render_repository(analysis: &RepositoryAnalysis) -> String {
    let mut out = String::new();
    grouped_pseudocode_section(&analysis.pseudocode, &mut out);
    flowchart_section(&analysis.flowchart, &mut out);
    let _ = writeln!(out, "Complexity:");
    let _ = writeln!(out, "  overall: {}", estimate_text(analysis.complexity.overall));
    for entry in &analysis.complexity.by_group {
        let _ = writeln!(out, "  {}: {}", entry.group, estimate_text(entry.complexity));
    }
    let _ = writeln!(out);
    grouped_test_cases_section(&analysis.test_cases, &mut out);
    out.trim_end().to_string()
}

/// Renders a shared analysis with its share metadata.
#[must_use]
pub fn render_share(record: &ShareRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Shared analysis of {}/{}", record.owner, record.repo);
    let _ = writeln!(out, "Source: {}", record.repo_url);
    match &record.shared_by {
        Some(user) => {
            let _ = writeln!(out, "Shared: {} by {user}", record.shared_at);
        }
        None => {
            let _ = writeln!(out, "Shared: {}", record.shared_at);
        }
    }
    let _ = writeln!(out, "Views: {}", record.view_count);
    let _ = writeln!(out);

    grouped_pseudocode_section(&record.pseudocode, &mut out);
    flowchart_section(&record.flowchart, &mut out);
    let _ = writeln!(out, "Complexity:");
    let _ = writeln!(out, "  overall: {}", estimate_text(record.complexity.overall));
    for entry in &record.complexity.by_group {
        let _ = writeln!(out, "  {}: {}", entry.group, estimate_text(entry.complexity));
    }
    let _ = writeln!(out);
    grouped_test_cases_section(&record.test_cases, &mut out);
    out.trim_end().to_string()
}

/// Renders the history listing, one record per line.
#[must_use]
pub fn render_history_list(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return "No saved analyses yet.".to_string();
    }
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{}  {}/{}  {}",
            record.id, record.owner, record.repo, record.created_at
        );
    }
    out.trim_end().to_string()
}

fn plain_pseudocode_section(text: &str, out: &mut String) {
    if text.is_empty() {
        return;
    }
    let _ = writeln!(out, "Pseudocode:");
    for line in text.lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out);
}

fn grouped_pseudocode_section(blocks: &[GroupPseudocode], out: &mut String) {
    if blocks.is_empty() {
        return;
    }
    let _ = writeln!(out, "Pseudocode:");
    for block in blocks {
        let _ = writeln!(out, "  [{}]", block.group);
        if block.code.is_empty() {
            let _ = writeln!(out, "  (none)");
        } else {
            for line in block.code.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
    let _ = writeln!(out);
}

fn flowchart_section(description: &str, out: &mut String) {
    if description.is_empty() {
        return;
    }
    let _ = writeln!(out, "Flowchart:");
    match parse_diagram(description) {
        Ok(graph) => {
            for node in &graph.nodes {
                let _ = writeln!(out, "  [{}] {}: {}", node.kind, node.id, node.label);
            }
            for edge in &graph.edges {
                if edge.label.is_empty() {
                    let _ = writeln!(out, "  {} --> {}", edge.source, edge.target);
                } else {
                    let _ = writeln!(out, "  {} -->|{}| {}", edge.source, edge.label, edge.target);
                }
            }
        }
        Err(e) => {
            let _ = writeln!(out, "  Could not render the flowchart: {e}");
        }
    }
    let _ = writeln!(out);
}

fn grouped_test_cases_section(cases: &[GroupedTestCase], out: &mut String) {
    if cases.is_empty() {
        return;
    }
    let _ = writeln!(out, "Test cases:");
    for (index, tagged) in cases.iter().enumerate() {
        test_case_lines(index, Some(tagged.group.name()), &tagged.case, out);
    }
}

fn test_case_lines(index: usize, group: Option<&str>, case: &TestCase, out: &mut String) {
    let number = index + 1;
    match group {
        Some(name) => {
            let _ = writeln!(out, "  {number}. [{name}] input: {}", render_value(&case.input));
        }
        None => {
            let _ = writeln!(out, "  {number}. input: {}", render_value(&case.input));
        }
    }
    let _ = writeln!(out, "     output: {}", render_value(&case.output));
    if let Some(explanation) = &case.explanation {
        let _ = writeln!(out, "     explanation: {}", render_value(explanation));
    }
}

fn estimate_text(estimate: ComplexityEstimate) -> String {
    format!("time {}, space {}", estimate.time, estimate.space)
}
