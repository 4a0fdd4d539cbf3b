// Shared prompt fragments. Each evaluator that calls the gateway keeps its own
// templates in scoring::prompts and appends these where needed.

/// Appended to every system message: the gateway tolerates fences and
/// preambles, but asking for bare JSON keeps truncation rare.
pub const JSON_ONLY_SYSTEM: &str = "\
Return ONLY valid JSON. Do NOT wrap the JSON in markdown code fences. \
Do NOT include any text outside the JSON object, and no explanations or apologies.";

/// Joins a role description with the JSON-only fragment.
pub fn system_with_json_rule(system: &str) -> String {
    format!("{}\n\n{}", system.trim(), JSON_ONLY_SYSTEM)
}
