//! Small helpers shared by the section evaluators.

use crate::models::profile::TextOrList;
use crate::models::report::{ReviewItem, ScoreResult};

const PLACEHOLDERS: [&str; 3] = ["not specified", "n/a", "na"];

/// True when the field holds non-blank text.
pub fn filled(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.trim().is_empty())
}

/// Like [`filled`], but also rejects placeholder text such as "N/A".
pub fn meaningful(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !is_placeholder(v))
}

/// Blank or a placeholder like "not specified".
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || PLACEHOLDERS.contains(&value.to_lowercase().as_str())
}

pub fn filled_list(value: &Option<TextOrList>) -> bool {
    value.as_ref().map_or(false, TextOrList::is_filled)
}

/// Trimmed, non-blank text.
pub fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// "Title is missing" / "Title, Date are missing".
pub fn missing_fields_message(fields: &[&str]) -> String {
    let verb = if fields.len() == 1 { "is" } else { "are" };
    format!("{} {verb} missing", fields.join(", "))
}

/// Zero score with the single review item emitted for an absent section.
pub fn missing_section(check_type: &str, label: &str) -> ScoreResult {
    ScoreResult::new(
        0.0,
        vec![ReviewItem::failed(check_type, format!("{label} is missing"))],
    )
}

pub fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Character count, not byte length.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
