use serde::{Deserialize, Serialize};

/// One pass/fail check shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewItem {
    pub check_type: String,
    pub passed: bool,
    pub message: String,
}

impl ReviewItem {
    pub fn passed(check_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_type: check_type.into(),
            passed: true,
            message: message.into(),
        }
    }

    pub fn failed(check_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_type: check_type.into(),
            passed: false,
            message: message.into(),
        }
    }
}

/// Raw evaluator output. `score` is on the section's own scale, not 0–100.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub review: Vec<ReviewItem>,
}

impl ScoreResult {
    pub fn new(score: f64, review: Vec<ReviewItem>) -> Self {
        Self { score, review }
    }

    /// Clamps the score into `0..=max`. Review order is untouched.
    pub fn capped(mut self, max: f64) -> Self {
        self.score = self.score.clamp(0.0, max);
        self
    }
}

/// A formatted, display-ready section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionReport {
    pub section: String,
    pub title: String,
    pub description: String,
    /// Scaled score rendered as a string, "0" through "100".
    pub score: String,
    pub review: Vec<ReviewItem>,
    pub bonus_tip: Vec<String>,
    pub additional_info: Vec<String>,
}

/// A section whose evaluator failed; it contributes nothing to the total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionFailure {
    pub section_name: String,
    pub display_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateReport {
    pub score: i64,
    pub sections: Vec<SectionReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_sections: Vec<SectionFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_clamps_both_ends() {
        assert_eq!(ScoreResult::new(17.5, vec![]).capped(15.0).score, 15.0);
        assert_eq!(ScoreResult::new(-1.0, vec![]).capped(15.0).score, 0.0);
        assert_eq!(ScoreResult::new(7.0, vec![]).capped(15.0).score, 7.0);
    }

    #[test]
    fn test_failed_sections_omitted_when_empty() {
        let report = AggregateReport {
            score: 0,
            sections: vec![],
            failed_sections: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("failed_sections").is_none());
        assert_eq!(json["score"], 0);
    }
}
