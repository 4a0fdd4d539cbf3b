use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::fields::{char_len, missing_section};
use super::rubric::{tally, RubricReply};
use super::{prompts, EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::llm_client::{Generated, GenerationGateway};
use crate::models::profile::ProfileDocument;
use crate::models::report::{ReviewItem, ScoreResult};

const SHORT_LIMIT: usize = 70;
const LONG_LIMIT: usize = 150;

/// Headline: four generation rubric checks plus a local length tier.
pub struct HeadlineEvaluator {
    config: Arc<ScoringConfig>,
    gateway: GenerationGateway,
}

impl HeadlineEvaluator {
    pub fn new(config: Arc<ScoringConfig>, gateway: GenerationGateway) -> Self {
        Self { config, gateway }
    }
}

#[async_trait]
impl Evaluator for HeadlineEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Headline
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let Some(headline) = document.headline() else {
            return Ok(missing_section("Headline Section", "Headline section"));
        };

        let (system, prompt) = prompts::headline(headline);
        let generated = self.gateway.call::<RubricReply>(&system, &prompt).await?;

        let (mut score, mut review) = match generated {
            Generated::Valid(reply) => {
                debug!("Headline suggestion: {}", reply.overall_suggestion);
                tally(&reply, &self.config.headline_rubric)
            }
            Generated::Degraded(degraded) => (
                0.0,
                vec![ReviewItem::failed(
                    "Headline Analysis",
                    format!("Failed to analyze headline. Error: {}", degraded.error),
                )],
            ),
        };

        let (length_score, length_item) = length_check(headline, self.config.headline_length);
        score += length_score;
        review.push(length_item);

        Ok(ScoreResult::new(score, review).capped(self.config.max_for(SectionKey::Headline)))
    }
}

/// Short headlines earn half weight, long ones two thirds, the band between full weight.
fn length_check(headline: &str, weight: f64) -> (f64, ReviewItem) {
    let len = char_len(headline);
    if len < SHORT_LIMIT {
        (
            weight / 2.0,
            ReviewItem::failed(
                "Length Optimization",
                "Headline is too short and lacks clarity",
            ),
        )
    } else if len <= LONG_LIMIT {
        (
            weight,
            ReviewItem::passed("Length Optimization", "Headline length is optimal"),
        )
    } else {
        (
            weight * 2.0 / 3.0,
            ReviewItem::failed(
                "Length Optimization",
                "Headline is too long and needs to be shortened",
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubTransport;
    use crate::scoring::test_support;
    use serde_json::json;

    const ALL_MET: &str = r#"{"overall_suggestion":"fine","checks":[
        {"check_type":"Professional Identity","criteria_meet":true,"remark":"a"},
        {"check_type":"Skills Integration","criteria_meet":true,"remark":"b"},
        {"check_type":"Searchability & Keywords","criteria_meet":true,"remark":"c"},
        {"check_type":"Formatting & Structure","criteria_meet":false,"remark":"d"}]}"#;

    fn document(headline: &str) -> ProfileDocument {
        serde_json::from_value(json!({ "profile": { "headline": headline } })).unwrap()
    }

    fn evaluator(stub: StubTransport) -> HeadlineEvaluator {
        HeadlineEvaluator::new(test_support::config(), test_support::gateway(stub))
    }

    #[tokio::test]
    async fn test_rubric_and_optimal_length_combine() {
        let headline = "Senior Backend Engineer | Rust, Go, PostgreSQL | Distributed Systems | AWS Certified";
        let result = evaluator(StubTransport::new().respond_when("Headline to Analyze", ALL_MET))
            .evaluate(&document(headline))
            .await
            .unwrap();

        assert_eq!(result.score, 12.0);
        assert_eq!(result.review.len(), 5);
        assert_eq!(result.review[4].check_type, "Length Optimization");
        assert!(result.review[4].passed);
    }

    #[tokio::test]
    async fn test_short_headline_gets_half_length_weight() {
        let result = evaluator(StubTransport::new().respond_when("Headline to Analyze", ALL_MET))
            .evaluate(&document("Engineer"))
            .await
            .unwrap();
        assert_eq!(result.score, 10.5);
    }

    #[tokio::test]
    async fn test_degraded_reply_keeps_length_score() {
        let result = evaluator(StubTransport::new().respond_when("Headline to Analyze", "Sorry, no."))
            .evaluate(&document("Engineer"))
            .await
            .unwrap();

        assert_eq!(result.score, 1.5);
        assert_eq!(result.review[0].check_type, "Headline Analysis");
        assert!(result.review[0].message.contains("JSON decode error"));
        assert_eq!(result.review.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let result = HeadlineEvaluator::new(test_support::config(), test_support::unreachable_gateway())
            .evaluate(&document("Engineer"))
            .await;
        assert!(matches!(result, Err(EvaluationError::Generation(_))));
    }

    #[test]
    fn test_long_headline_tier() {
        let (score, item) = length_check(&"x".repeat(151), 3.0);
        assert_eq!(score, 2.0);
        assert!(!item.passed);
    }
}
