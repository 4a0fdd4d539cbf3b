//! Pulls a JSON payload out of free-form model output and patches up
//! truncated replies.

use std::sync::OnceLock;

use regex::Regex;

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\r?\n?```")
            .expect("fence pattern is valid")
    })
}

/// Isolates the candidate payload from model output.
///
/// Handles ```` ```json ```` fences, bare ```` ``` ```` fences, and unfenced
/// text. Unfenced text is taken from the first `{` or `[` to the end; text
/// with neither is returned trimmed.
pub fn extract_json_payload(content: &str) -> &str {
    let content = content.trim();

    if let Some(inner) = fence_pattern().captures(content).and_then(|c| c.get(1)) {
        return inner.as_str().trim();
    }

    match content.find(|c: char| c == '{' || c == '[') {
        Some(start) => content[start..].trim(),
        None => content,
    }
}

/// Builds repair candidates for a payload that failed to parse.
///
/// Each candidate truncates the text right after a closing brace that sits
/// outside any string literal, then appends the closers for every container
/// still open at that point. Candidates are ordered from the last brace to
/// the first, so the longest valid prefix is tried first.
pub fn repair_candidates(text: &str) -> Vec<String> {
    let mut open: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut cut_points: Vec<(usize, String)> = Vec::new();

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => open.push('}'),
            '[' => open.push(']'),
            '}' | ']' => {
                if open.last() == Some(&ch) {
                    open.pop();
                }
                if ch == '}' {
                    let closers: String = open.iter().rev().collect();
                    cut_points.push((idx + ch.len_utf8(), closers));
                }
            }
            _ => {}
        }
    }

    cut_points
        .into_iter()
        .rev()
        .map(|(end, closers)| format!("{}{}", &text[..end], closers))
        .collect()
}
