//! `flowscribe analyze` command.

use std::io::Read as _;
use std::path::Path;

use crate::analyze::analyze_code;
use crate::commands::render::render_analysis;
use crate::context::ServiceContext;

/// Executes the `analyze` command.
///
/// Reads code from `file` when given, otherwise from standard input, then
/// prints the full analysis report.
///
/// # Errors
///
/// Returns an error string when the code cannot be read, when it is empty,
/// or when the model invocation fails.
pub async fn run(ctx: &ServiceContext, file: Option<&Path>) -> Result<(), String> {
    let code = read_code(file)?;
    if code.trim().is_empty() {
        return Err("No code to analyze".to_string());
    }

    let result = analyze_code(ctx, &code).await?;
    println!("{}", render_analysis(&result));
    Ok(())
}

/// Reads the code to analyze from a file or from standard input.
fn read_code(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display())),
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .map_err(|e| format!("Failed to read code from stdin: {e}"))?;
            Ok(code)
        }
    }
}
