//! Analysis results assembled from segmented model responses.
//!
//! One model invocation yields one [`AnalysisResult`]. Every field is
//! always present with a safe default, so consumers render partial results
//! instead of branching on absence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::complexity::ComplexityEstimate;
use crate::groups::GroupKind;
use crate::segment::segment_response;

/// One sample test case extracted from a model response.
///
/// Input and output keep whatever JSON shape the model produced; records
/// missing either key are dropped during extraction, never coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// The input value, any JSON shape.
    pub input: Value,
    /// The expected output value, any JSON shape.
    pub output: Value,
    /// Optional free-text rationale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Value>,
}

/// Pseudocode in either of its two wire shapes.
///
/// One-shot analyses carry plain text; repository analyses carry one code
/// block per file group. Serialized untagged so the stored shape stays
/// `text | [{group, code}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pseudocode {
    /// A single undivided block.
    Plain(String),
    /// One block per analyzed file group, in group order.
    Grouped(Vec<GroupPseudocode>),
}

impl Pseudocode {
    /// True when there is no pseudocode text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.is_empty(),
            Self::Grouped(blocks) => blocks.is_empty(),
        }
    }

    /// Collapses either shape into displayable text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Grouped(blocks) => {
                blocks.iter().map(|b| b.code.as_str()).collect::<Vec<_>>().join("\n\n")
            }
        }
    }
}

impl Default for Pseudocode {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

/// Pseudocode for one file group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPseudocode {
    /// The group this block describes.
    pub group: GroupKind,
    /// The pseudocode text.
    pub code: String,
}

/// The unit produced by one model invocation after segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    /// Raw diagram description, may be empty.
    pub flowchart: String,
    /// Pseudocode explanation.
    pub pseudocode: Pseudocode,
    /// Time/space estimate, `Unknown` per axis when unstated.
    pub complexity: ComplexityEstimate,
    /// Extracted test cases, order preserved.
    pub test_cases: Vec<TestCase>,
}

impl AnalysisResult {
    /// The safe default substituted when a model invocation fails.
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            flowchart: String::new(),
            pseudocode: Pseudocode::default(),
            complexity: ComplexityEstimate::unknown(),
            test_cases: Vec::new(),
        }
    }

    /// Builds a result from one raw model response.
    ///
    /// Segments the response, reads the complexity statement into the fixed
    /// vocabulary, and extracts well-formed test cases. Missing sections
    /// leave their fields at the safe default.
    #[must_use]
    pub fn from_response(response: &str) -> Self {
        let sections = segment_response(response);
        Self {
            flowchart: sections.diagram,
            pseudocode: Pseudocode::Plain(sections.pseudocode),
            complexity: ComplexityEstimate::from_statement(&sections.complexity),
            test_cases: parse_test_cases(&sections.test_cases),
        }
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::degraded()
    }
}

/// Extracts well-formed test cases from a test-case section.
///
/// The section is expected to hold a JSON array, optionally inside a code
/// fence. Entries that are not objects carrying both `input` and `output`
/// are dropped entirely; the rest keep their order. Anything unparseable
/// yields an empty list.
#[must_use]
pub fn parse_test_cases(section: &str) -> Vec<TestCase> {
    let raw = strip_fence(section);
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };
    items.into_iter().filter_map(test_case_from_value).collect()
}

/// Renders a JSON value for display, without quotes around plain strings.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn test_case_from_value(value: Value) -> Option<TestCase> {
    let object = value.as_object()?;
    let input = object.get("input")?.clone();
    let output = object.get("output")?.clone();
    let explanation = object.get("explanation").cloned().filter(|v| !v.is_null());
    Some(TestCase { input, output, explanation })
}

/// Returns the body of the first code fence, or the trimmed input when no
/// complete fence is present.
fn strip_fence(section: &str) -> &str {
    if let Some(open) = section.find("```") {
        let after = &section[open + 3..];
        let body_start = after.find('\n').map_or(after.len(), |i| i + 1);
        let body = &after[body_start..];
        if let Some(close) = body.find("```") {
            return body[..close].trim();
        }
    }
    section.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::ComplexityClass;
    use serde_json::json;

    // --- parse_test_cases tests ---

    #[test]
    fn parses_well_formed_records() {
        let cases = parse_test_cases(
            r#"[{"input": "abc", "output": "cba", "explanation": "reversal"},
                {"input": 5, "output": 120}]"#,
        );
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].input, json!("abc"));
        assert_eq!(cases[0].explanation, Some(json!("reversal")));
        assert_eq!(cases[1].input, json!(5));
        assert_eq!(cases[1].explanation, None);
    }

    #[test]
    fn drops_malformed_records_and_keeps_order() {
        let cases = parse_test_cases(
            r#"[{"input": "a", "output": "b"},
                {"input": "missing output"},
                "not an object",
                42,
                null,
                {"output": "missing input"},
                {"input": "c", "output": "d"}]"#,
        );
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].input, json!("a"));
        assert_eq!(cases[1].input, json!("c"));
    }

    #[test]
    fn reads_an_array_inside_a_code_fence() {
        let section = "```json\n[{\"input\": 1, \"output\": 2}]\n```";
        let cases = parse_test_cases(section);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].output, json!(2));
    }

    #[test]
    fn null_explanation_becomes_none() {
        let cases =
            parse_test_cases(r#"[{"input": "a", "output": "b", "explanation": null}]"#);
        assert_eq!(cases[0].explanation, None);
    }

    #[test]
    fn prose_and_non_arrays_yield_nothing() {
        assert!(parse_test_cases("1. Try an empty list.").is_empty());
        assert!(parse_test_cases(r#"{"input": "a", "output": "b"}"#).is_empty());
        assert!(parse_test_cases("").is_empty());
    }

    // --- AnalysisResult tests ---

    #[test]
    fn from_response_populates_every_field() {
        let response = "### Pseudocode\nsort then scan\n\n\
                        ### Flowchart\n```mermaid\ngraph TD\nA[Start] --> B[End]\n```\n\
                        ### Complexity Analysis\nTime complexity: O(n log n)\nSpace: O(1)\n\n\
                        ### Test Cases\n[{\"input\": \"x\", \"output\": \"y\"}]\n";
        let result = AnalysisResult::from_response(response);

        assert_eq!(result.flowchart, "graph TD\nA[Start] --> B[End]");
        assert_eq!(result.pseudocode, Pseudocode::Plain("sort then scan".to_string()));
        assert_eq!(result.complexity.time, ComplexityClass::Linearithmic);
        assert_eq!(result.complexity.space, ComplexityClass::Constant);
        assert_eq!(result.test_cases.len(), 1);
    }

    #[test]
    fn from_response_on_unstructured_text_is_degraded() {
        let result = AnalysisResult::from_response("I could not analyze this code.");
        assert_eq!(result, AnalysisResult::degraded());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&AnalysisResult::degraded()).unwrap();
        assert!(json.contains("\"testCases\""));
        assert!(json.contains("\"flowchart\""));
    }

    #[test]
    fn deserializing_an_empty_object_gives_the_safe_defaults() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, AnalysisResult::degraded());
    }

    // --- Pseudocode tests ---

    #[test]
    fn pseudocode_deserializes_from_either_shape() {
        let plain: Pseudocode = serde_json::from_str("\"step one\"").unwrap();
        assert_eq!(plain, Pseudocode::Plain("step one".to_string()));

        let grouped: Pseudocode =
            serde_json::from_str(r#"[{"group": "models", "code": "define user"}]"#).unwrap();
        let Pseudocode::Grouped(blocks) = grouped else {
            panic!("expected grouped pseudocode");
        };
        assert_eq!(blocks[0].group, GroupKind::Models);
        assert_eq!(blocks[0].code, "define user");
    }

    #[test]
    fn pseudocode_emptiness_covers_both_shapes() {
        assert!(Pseudocode::Plain(String::new()).is_empty());
        assert!(Pseudocode::Grouped(Vec::new()).is_empty());
        assert!(!Pseudocode::Plain("x".to_string()).is_empty());
    }

    // --- render_value tests ---

    #[test]
    fn renders_strings_bare_and_other_values_as_json() {
        assert_eq!(render_value(&json!("plain")), "plain");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!([1, 2])), "[1,2]");
    }
}
