use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::fields::{char_len, missing_section, text};
use super::rubric::{tally, RubricReply};
use super::{prompts, EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::llm_client::{Generated, GenerationGateway};
use crate::models::profile::ProfileDocument;
use crate::models::report::{ReviewItem, ScoreResult};

const TARGET_LENGTH: usize = 400;

pub struct AboutEvaluator {
    config: Arc<ScoringConfig>,
    gateway: GenerationGateway,
}

impl AboutEvaluator {
    pub fn new(config: Arc<ScoringConfig>, gateway: GenerationGateway) -> Self {
        Self { config, gateway }
    }
}

#[async_trait]
impl Evaluator for AboutEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::About
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let Some(about) = document.about.as_ref().and_then(|a| text(&a.text)) else {
            return Ok(missing_section("About Section", "About section"));
        };

        let (system, prompt) = prompts::about(about);
        let generated = self.gateway.call::<RubricReply>(&system, &prompt).await?;

        let (mut score, mut review) = match generated {
            Generated::Valid(reply) => {
                debug!("About suggestion: {}", reply.overall_suggestion);
                tally(&reply, &self.config.about_rubric)
            }
            Generated::Degraded(degraded) => (
                0.0,
                vec![ReviewItem::failed(
                    "About Section Analysis",
                    format!("Failed to analyze about section. Error: {}", degraded.error),
                )],
            ),
        };

        let weight = self.config.about_length;
        if char_len(about) < TARGET_LENGTH {
            score += weight / 2.0;
            review.push(ReviewItem::failed(
                "Length Optimization",
                "About section length is below 400 characters.",
            ));
        } else {
            score += weight;
            review.push(ReviewItem::passed(
                "Length Optimization",
                "About section length is 400 characters or more.",
            ));
        }

        Ok(ScoreResult::new(score, review).capped(self.config.max_for(SectionKey::About)))
    }
}
