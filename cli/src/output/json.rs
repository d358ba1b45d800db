//! JSON output helpers.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::domain::{Plan, Step};

/// Format a plan as pretty-printed JSON.
///
/// Output:
/// ```json
/// {
///   "skipped": ["prometheus"],
///   "steps": [
///     { "banner": "Deploying JupyterHub" },
///     { "command": "cd ~/ilcm/orc && helm repo update", "privileged": false }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_plan(plan: &Plan) -> Result<String> {
    let steps: Vec<Value> = plan
        .steps
        .iter()
        .map(|step| match step {
            Step::Banner(text) => json!({ "banner": text }),
            Step::Run(cmd) => json!({
                "command": cmd.shell_line(),
                "privileged": cmd.privileged,
            }),
        })
        .collect();
    let obj = json!({
        "skipped": plan.skipped,
        "steps": steps,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
