//! Reply shapes for generation calls and the shared rubric tally.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use super::weights::RubricWeights;
use crate::models::report::ReviewItem;

/// Categorical rubric reply used by the headline and about evaluators.
#[derive(Debug, Clone, Deserialize)]
pub struct RubricReply {
    #[serde(default)]
    pub overall_suggestion: String,
    pub checks: Vec<RubricCheck>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RubricCheck {
    pub check_type: String,
    pub criteria_meet: bool,
    #[serde(default)]
    pub remark: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionReply {
    pub analysis: DescriptionAnalysis,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptionAnalysis {
    #[serde(default)]
    pub role_clarity: bool,
    #[serde(default)]
    pub impact_demonstrated: bool,
    #[serde(default)]
    pub remark: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectQualityReply {
    pub score: i64,
    #[serde(default)]
    pub suggestion: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillsRelevanceReply {
    pub relevance_score: i64,
    #[serde(default)]
    pub suggested_skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationClarityReply {
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub overall_quality: String,
}

/// Turns rubric checks into review items and a weighted score.
///
/// Every check is echoed into the review in reply order. A check type is
/// weighed at most once, and types absent from `weights` weigh nothing.
pub fn tally(reply: &RubricReply, weights: &RubricWeights) -> (f64, Vec<ReviewItem>) {
    let mut seen = HashSet::new();
    let mut score = 0.0;
    let mut review = Vec::with_capacity(reply.checks.len());

    for check in &reply.checks {
        review.push(ReviewItem {
            check_type: check.check_type.clone(),
            passed: check.criteria_meet,
            message: check.remark.clone(),
        });

        if !seen.insert(check.check_type.as_str()) {
            debug!("Ignoring repeated rubric check '{}'", check.check_type);
            continue;
        }
        if check.criteria_meet {
            score += weights.weight_of(&check.check_type).unwrap_or(0.0);
        }
    }

    (score, review)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> RubricWeights {
        RubricWeights::new(&[("Professional Identity", 3.0), ("Skills Integration", 3.0)])
    }

    fn reply(checks: &[(&str, bool)]) -> RubricReply {
        RubricReply {
            overall_suggestion: String::new(),
            checks: checks
                .iter()
                .map(|(t, met)| RubricCheck {
                    check_type: t.to_string(),
                    criteria_meet: *met,
                    remark: format!("{t} remark"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_tally_sums_met_checks_in_order() {
        let (score, review) = tally(
            &reply(&[("Professional Identity", true), ("Skills Integration", false)]),
            &weights(),
        );
        assert_eq!(score, 3.0);
        assert_eq!(review[0].check_type, "Professional Identity");
        assert!(review[0].passed);
        assert!(!review[1].passed);
    }

    #[test]
    fn test_tally_counts_each_check_type_once() {
        let (score, review) = tally(
            &reply(&[("Professional Identity", true), ("Professional Identity", true)]),
            &weights(),
        );
        assert_eq!(score, 3.0);
        assert_eq!(review.len(), 2);
    }

    #[test]
    fn test_tally_unknown_check_weighs_nothing() {
        let (score, review) = tally(&reply(&[("Vibes", true)]), &weights());
        assert_eq!(score, 0.0);
        assert_eq!(review.len(), 1);
    }
}
