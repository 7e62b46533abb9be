//! One-shot code analysis through the model endpoint.

use std::fmt::Write as _;
use std::time::Duration;

use crate::context::ServiceContext;
use crate::ports::model::{CompletionRequest, CompletionResponse};
use crate::report::AnalysisResult;

/// Model used for all analysis completions.
const ANALYSIS_MODEL: &str = "gemini-2.0-flash";
/// Maximum tokens generated per invocation.
const MAX_TOKENS: u32 = 8192;
/// Upper bound on one model invocation; timeout counts as failure.
const MODEL_TIMEOUT: Duration = Duration::from_secs(60);

/// Fixed instruction block preceding the code to analyze.
const PROMPT_INSTRUCTIONS: &str = r#"Analyze this code and provide the output in the following format. For machine learning code, focus on the training process and data flow:

### Pseudocode
[Write a clear, step-by-step pseudocode explanation of the logic]

### Flowchart
```mermaid
graph TD
    A[Start] --> B[Initialize Data]
    B --> C[Initialize Model]
    C --> D{Training Loop}
    D -->|Each Epoch| E[Process Batch]
    E --> F{Check Error}
    F -->|Yes| G[Update Weights]
    F -->|No| H[Next Batch]
    G --> H
    H --> D
    D -->|Done| I[Save Model]
    I --> J[End]

Note: Create a flowchart following these EXACT rules:
1. Start with "graph TD" on its own line
2. Put each node and connection on a new line
3. Use simple node IDs: A, B, C, etc.
4. Use these brackets correctly:
   - [Process] for steps
   - {Condition} for decisions
   - (Input) for data
5. Use proper arrow syntax:
   A --> B
   B -->|Yes| C
   B -->|No| D
6. Avoid special characters in labels
7. Keep each line under 50 characters
8. End each line with either a node or connection
```

### Complexity Analysis
[Provide detailed time and space complexity analysis]

### Test Cases
[List 2-3 sample test cases with inputs and expected outputs]"#;

/// Builds the full analysis prompt for one piece of code.
#[must_use]
pub fn build_analysis_prompt(code: &str) -> String {
    let mut prompt = String::from(PROMPT_INSTRUCTIONS);
    let _ = write!(
        prompt,
        "\n\nCode to analyze:\n{code}\n\nImportant: Make sure to use the exact section \
         headers as shown above and proper markdown formatting."
    );
    prompt
}

/// Analyzes one piece of code with a single model invocation.
///
/// The response is segmented and assembled into an [`AnalysisResult`];
/// sections the model omitted come back as safe defaults rather than
/// errors.
///
/// # Errors
///
/// Returns an error string when the model invocation fails or exceeds the
/// invocation timeout. Callers analyzing repository groups absorb this
/// error into a degraded group result; one-shot callers surface it.
pub async fn analyze_code(ctx: &ServiceContext, code: &str) -> Result<AnalysisResult, String> {
    let request = CompletionRequest {
        model: ANALYSIS_MODEL.to_string(),
        prompt: build_analysis_prompt(code),
        max_tokens: MAX_TOKENS,
    };
    let response = complete_with_timeout(ctx, &request, MODEL_TIMEOUT).await?;
    Ok(AnalysisResult::from_response(&response.text))
}

async fn complete_with_timeout(
    ctx: &ServiceContext,
    request: &CompletionRequest,
    limit: Duration,
) -> Result<CompletionResponse, String> {
    tokio::time::timeout(limit, ctx.model.complete(request))
        .await
        .map_err(|_| format!("Model invocation timed out after {}s", limit.as_secs()))?
        .map_err(|e| format!("Model invocation failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::ComplexityClass;
    use crate::ports::model::{CompletionFuture, ModelClient};
    use crate::report::Pseudocode;

    /// Model fake that replays a canned response or error.
    struct FakeModel {
        response: Result<String, String>,
    }

    impl FakeModel {
        fn replying(text: &str) -> Self {
            Self { response: Ok(text.to_string()) }
        }

        fn failing(message: &str) -> Self {
            Self { response: Err(message.to_string()) }
        }
    }

    impl ModelClient for FakeModel {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            let response = self.response.clone();
            Box::pin(async move {
                match response {
                    Ok(text) => Ok(CompletionResponse {
                        text,
                        prompt_tokens: 10,
                        completion_tokens: 20,
                    }),
                    Err(message) => Err(message.into()),
                }
            })
        }
    }

    /// Model fake whose future never resolves.
    struct StalledModel;

    impl ModelClient for StalledModel {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            Box::pin(std::future::pending())
        }
    }

    fn ctx_with_model(model: impl ModelClient + 'static) -> ServiceContext {
        let mut ctx = ServiceContext::panicking();
        ctx.model = Box::new(model);
        ctx
    }

    const FULL_RESPONSE: &str = "### Pseudocode\nscan the list once\n\n\
        ### Flowchart\n```mermaid\ngraph TD\nA[Start] --> B[End]\n```\n\n\
        ### Complexity Analysis\nTime complexity: O(n)\nSpace complexity: O(1)\n\n\
        ### Test Cases\n[{\"input\": [1, 2], \"output\": 3}]\n";

    #[test]
    fn prompt_embeds_code_and_keeps_exact_headers() {
        let prompt = build_analysis_prompt("fn main() {}");
        assert!(prompt.contains("### Pseudocode"));
        assert!(prompt.contains("### Complexity Analysis"));
        assert!(prompt.contains("### Test Cases"));
        assert!(prompt.contains("```mermaid"));
        assert!(prompt.contains("Code to analyze:\nfn main() {}"));
        assert!(prompt.ends_with("proper markdown formatting."));
    }

    #[tokio::test]
    async fn analyze_code_assembles_a_full_result() {
        let ctx = ctx_with_model(FakeModel::replying(FULL_RESPONSE));
        let result = analyze_code(&ctx, "const x = 1;").await.unwrap();

        assert_eq!(result.pseudocode, Pseudocode::Plain("scan the list once".to_string()));
        assert_eq!(result.flowchart, "graph TD\nA[Start] --> B[End]");
        assert_eq!(result.complexity.time, ComplexityClass::Linear);
        assert_eq!(result.complexity.space, ComplexityClass::Constant);
        assert_eq!(result.test_cases.len(), 1);
    }

    #[tokio::test]
    async fn analyze_code_surfaces_model_failures() {
        let ctx = ctx_with_model(FakeModel::failing("rate limited"));
        let err = analyze_code(&ctx, "code").await.unwrap_err();
        assert!(err.contains("Model invocation failed"));
        assert!(err.contains("rate limited"));
    }

    #[tokio::test]
    async fn stalled_invocations_hit_the_timeout() {
        let ctx = ctx_with_model(StalledModel);
        let request = CompletionRequest {
            model: ANALYSIS_MODEL.to_string(),
            prompt: "p".to_string(),
            max_tokens: 16,
        };
        let err = complete_with_timeout(&ctx, &request, Duration::ZERO).await.unwrap_err();
        assert!(err.contains("timed out"));
    }
}
