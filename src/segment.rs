//! Splits one free-text model response into its named sections.
//!
//! The analysis prompt asks the model for four markdown sections by exact
//! header text. The far end guarantees nothing, so extraction degrades to
//! empty strings instead of failing; validation of section content happens
//! downstream.

/// Header introducing the pseudocode section.
const PSEUDOCODE_HEADER: &str = "### Pseudocode";
/// Header introducing the complexity section.
const COMPLEXITY_HEADER: &str = "### Complexity Analysis";
/// Header introducing the test-case section.
const TEST_CASES_HEADER: &str = "### Test Cases";
/// Opening fence of the diagram block.
const DIAGRAM_FENCE: &str = "```mermaid";

/// The four sections of a model response, each empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseSections {
    /// Text under the pseudocode header.
    pub pseudocode: String,
    /// Text inside the diagram fence.
    pub diagram: String,
    /// Text under the complexity header.
    pub complexity: String,
    /// Text under the test-case header.
    pub test_cases: String,
}

/// Extracts the four named sections from a model response.
///
/// Header sections run from their header to the next `###` or end of text.
/// The diagram comes from inside the first ` ```mermaid ` fence, independent
/// of header sectioning; a fence that never closes yields an empty diagram.
/// All fields are trimmed. Absent sections are empty strings, never errors.
#[must_use]
pub fn segment_response(response: &str) -> ResponseSections {
    ResponseSections {
        pseudocode: section_after(response, PSEUDOCODE_HEADER),
        diagram: fenced_block(response, DIAGRAM_FENCE),
        complexity: section_after(response, COMPLEXITY_HEADER),
        test_cases: section_after(response, TEST_CASES_HEADER),
    }
}

/// Text between `header` and the next `###` marker (or end of text).
fn section_after(text: &str, header: &str) -> String {
    let Some(at) = text.find(header) else {
        return String::new();
    };
    let rest = &text[at + header.len()..];
    let end = rest.find("###").unwrap_or(rest.len());
    rest[..end].trim().to_string()
}

/// Text between an opening fence and its closing ```` ``` ````.
fn fenced_block(text: &str, fence: &str) -> String {
    let Some(at) = text.find(fence) else {
        return String::new();
    };
    let rest = &text[at + fence.len()..];
    match rest.find("```") {
        Some(end) => rest[..end].trim().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_response() -> &'static str {
        "Here is the analysis.\n\
         \n\
         ### Pseudocode\n\
         1. Read input\n\
         2. Process\n\
         \n\
         ### Flowchart\n\
         ```mermaid\n\
         graph TD\n\
         A[Start] --> B[End]\n\
         ```\n\
         \n\
         ### Complexity Analysis\n\
         Time complexity: O(n)\n\
         Space complexity: O(1)\n\
         \n\
         ### Test Cases\n\
         [{\"input\": \"1\", \"output\": \"2\"}]\n"
    }

    #[test]
    fn extracts_all_four_sections() {
        let sections = segment_response(full_response());
        assert_eq!(sections.pseudocode, "1. Read input\n2. Process");
        assert_eq!(sections.diagram, "graph TD\nA[Start] --> B[End]");
        assert_eq!(sections.complexity, "Time complexity: O(n)\nSpace complexity: O(1)");
        assert_eq!(sections.test_cases, "[{\"input\": \"1\", \"output\": \"2\"}]");
    }

    #[test]
    fn missing_headers_yield_empty_fields() {
        let sections = segment_response("No sections here at all.");
        assert_eq!(sections, ResponseSections::default());
    }

    #[test]
    fn section_runs_to_end_of_text_when_it_is_last() {
        let sections = segment_response("### Test Cases\n[{\"input\": \"a\", \"output\": \"b\"}]");
        assert_eq!(sections.test_cases, "[{\"input\": \"a\", \"output\": \"b\"}]");
        assert_eq!(sections.pseudocode, "");
    }

    #[test]
    fn diagram_requires_a_closing_fence() {
        let sections = segment_response("```mermaid\ngraph TD\nA[Start] --> B[End]");
        assert_eq!(sections.diagram, "");
    }

    #[test]
    fn diagram_is_found_without_any_headers() {
        let sections = segment_response("prose\n```mermaid\ngraph TD\nA[Go]\n```\nmore prose");
        assert_eq!(sections.diagram, "graph TD\nA[Go]");
    }

    #[test]
    fn sections_are_trimmed() {
        let sections = segment_response("### Pseudocode\n\n   do the work   \n\n### Test Cases\n");
        assert_eq!(sections.pseudocode, "do the work");
        assert_eq!(sections.test_cases, "");
    }

    #[test]
    fn empty_input_yields_all_empty() {
        assert_eq!(segment_response(""), ResponseSections::default());
    }
}
