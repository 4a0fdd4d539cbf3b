//! Small community sections: volunteering, interests, languages,
//! recommendations, and activity. Each is worth a couple of points and is
//! scored on presence more than detail.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::fields::{filled, missing_fields_message, missing_section, text};
use super::rubric::RecommendationClarityReply;
use super::{prompts, EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::llm_client::{Generated, GenerationGateway};
use crate::models::profile::{ProfileDocument, Recommendation};
use crate::models::report::{ReviewItem, ScoreResult};

const FALLBACK_RECOMMENDATION_TIPS: [&str; 3] = [
    "Make recommendations more specific by mentioning concrete achievements",
    "Include measurable results or outcomes when possible",
    "Ensure recommendations highlight unique strengths and contributions",
];

// ────────────────────────────────────────────────────────────────────────────
// Volunteering
// ────────────────────────────────────────────────────────────────────────────

pub struct VolunteeringEvaluator {
    config: Arc<ScoringConfig>,
}

impl VolunteeringEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Evaluator for VolunteeringEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Volunteering
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let entries = match document.volunteering.as_deref() {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Ok(missing_section("Volunteering Section", "Volunteering section")),
        };

        let mut review = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            let label = match (text(&entry.role), text(&entry.organization)) {
                (Some(role), Some(org)) => format!("{role} at {org}"),
                (None, Some(org)) => format!("volunteer at {org}"),
                (Some(role), None) => role.to_string(),
                (None, None) => format!("volunteer experience #{}", index + 1),
            };

            let missing: Vec<&str> = [
                (&entry.organization, "Organization"),
                (&entry.role, "Role"),
                (&entry.from, "From"),
                (&entry.to, "To"),
                (&entry.kind, "Type"),
            ]
            .into_iter()
            .filter(|(value, _)| !filled(value))
            .map(|(_, name)| name)
            .collect();

            if !missing.is_empty() {
                review.push(ReviewItem::failed(label, missing_fields_message(&missing)));
            }
        }

        Ok(ScoreResult::new(self.config.max_for(SectionKey::Volunteering), review))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Interests
// ────────────────────────────────────────────────────────────────────────────

const REQUIRED_INTEREST_CATEGORIES: usize = 3;

pub struct InterestsEvaluator {
    config: Arc<ScoringConfig>,
}

impl InterestsEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Evaluator for InterestsEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Interests
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let Some(interests) = document.interests.as_ref() else {
            return Ok(missing_section("Interest sections", "Interests section"));
        };

        let categories = interests.categories();
        if categories.iter().all(|(_, value)| value.is_none()) {
            return Ok(missing_section("Interest sections", "Interests section"));
        }

        let empty: Vec<&str> = categories
            .iter()
            .filter(|(_, value)| !value.map_or(false, |v| v.is_filled()))
            .map(|(name, _)| *name)
            .collect();
        let populated = categories.len() - empty.len();

        if populated >= REQUIRED_INTEREST_CATEGORIES {
            return Ok(ScoreResult::new(
                self.config.max_for(SectionKey::Interests),
                Vec::new(),
            ));
        }

        Ok(ScoreResult::new(
            0.0,
            vec![ReviewItem::failed(
                "Interest sections",
                missing_fields_message(&empty),
            )],
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Languages
// ────────────────────────────────────────────────────────────────────────────

pub struct LanguagesEvaluator {
    config: Arc<ScoringConfig>,
}

impl LanguagesEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Evaluator for LanguagesEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Languages
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let languages = match document.languages.as_deref() {
            Some(languages) if !languages.is_empty() => languages,
            _ => return Ok(missing_section("Languages Section", "Languages section")),
        };

        let review = languages
            .iter()
            .filter(|l| {
                text(&l.proficiency).map_or(true, |p| {
                    matches!(p.to_lowercase().as_str(), "not specified" | "unknown")
                })
            })
            .map(|l| {
                ReviewItem::failed(
                    text(&l.language).unwrap_or("Language"),
                    "Proficiency is missing",
                )
            })
            .collect();

        Ok(ScoreResult::new(self.config.max_for(SectionKey::Languages), review))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

/// Two or more received recommendations earn the full two points. A single
/// one earns half, plus generated advice on making it clearer.
pub struct RecommendationsEvaluator {
    config: Arc<ScoringConfig>,
    gateway: GenerationGateway,
}

impl RecommendationsEvaluator {
    pub fn new(config: Arc<ScoringConfig>, gateway: GenerationGateway) -> Self {
        Self { config, gateway }
    }

    async fn clarity_suggestions(
        &self,
        received: &[Recommendation],
    ) -> Result<String, EvaluationError> {
        let entries: Vec<(&str, &str, &str)> = received
            .iter()
            .map(|r| {
                (
                    text(&r.from).unwrap_or("Unknown"),
                    text(&r.position).unwrap_or("Unknown Position"),
                    text(&r.text).unwrap_or_default(),
                )
            })
            .collect();
        let (system, prompt) = prompts::recommendation_clarity(&entries);

        let suggestions = match self
            .gateway
            .call::<RecommendationClarityReply>(&system, &prompt)
            .await?
        {
            Generated::Valid(reply) if !reply.suggestions.is_empty() => {
                debug!("Recommendation quality: {}", reply.overall_quality);
                reply.suggestions.join(". ")
            }
            _ => FALLBACK_RECOMMENDATION_TIPS.join(". "),
        };
        Ok(suggestions)
    }
}

#[async_trait]
impl Evaluator for RecommendationsEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Recommendations
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let Some(recommendations) = document.recommendations.as_ref() else {
            return Ok(missing_section(
                "Recommendations Section",
                "Recommendations section",
            ));
        };

        let received = &recommendations.received;
        let max = self.config.max_for(SectionKey::Recommendations);

        let result = match received.len() {
            0 => ScoreResult::new(
                0.0,
                vec![ReviewItem::failed(
                    "Received Recommendations",
                    "Ask peers for recommendations",
                )],
            ),
            1 => {
                let suggestions = self.clarity_suggestions(received).await?;
                ScoreResult::new(
                    max / 2.0,
                    vec![
                        ReviewItem::failed(
                            "Received Recommendations",
                            "Received 1 recommendation. Ask peers for more recommendations",
                        ),
                        ReviewItem::failed("Suggestions", suggestions),
                    ],
                )
            }
            _ => ScoreResult::new(max, Vec::new()),
        };
        Ok(result)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Activity
// ────────────────────────────────────────────────────────────────────────────

pub struct ActivityEvaluator {
    config: Arc<ScoringConfig>,
}

impl ActivityEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Evaluator for ActivityEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Activity
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let Some(activity) = document.activity.as_ref() else {
            return Ok(missing_section("Activity Section", "Activity section"));
        };

        let max = self.config.max_for(SectionKey::Activity);
        let score = match activity.posts.len() {
            0 => 0.0,
            1 => max / 2.0,
            _ => max,
        };
        let review = if score < max {
            vec![ReviewItem::failed(
                "Number of Posts",
                "Try to post more often to stay visible in your network",
            )]
        } else {
            Vec::new()
        };
        Ok(ScoreResult::new(score, review))
    }
}
