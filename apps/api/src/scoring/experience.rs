use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::fields::{
    average, filled, filled_list, is_placeholder, missing_fields_message, missing_section, text,
};
use super::rubric::{DescriptionAnalysis, DescriptionReply};
use super::weights::ExperienceWeights;
use super::{prompts, EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::llm_client::{Generated, GenerationGateway};
use crate::models::profile::{ProfileDocument, RoleEntry};
use crate::models::report::{ReviewItem, ScoreResult};

/// Experience: every role at every employer is scored on its own, then the
/// role scores are averaged and rounded to a whole number.
pub struct ExperienceEvaluator {
    config: Arc<ScoringConfig>,
    gateway: GenerationGateway,
}

impl ExperienceEvaluator {
    pub fn new(config: Arc<ScoringConfig>, gateway: GenerationGateway) -> Self {
        Self { config, gateway }
    }

    async fn score_role(
        &self,
        company: &str,
        role: &RoleEntry,
        label: &str,
        review: &mut Vec<ReviewItem>,
    ) -> Result<f64, EvaluationError> {
        let weights: &ExperienceWeights = &self.config.experience;
        let mut score = 0.0;
        let mut missing = Vec::new();

        let simple = [
            (&role.title, weights.title, "Title"),
            (&role.from, weights.from, "Start date"),
            (&role.to, weights.to, "End date"),
            (&role.duration, weights.duration, "Duration"),
            (&role.location, weights.location, "Location"),
            (&role.employment_type, weights.employment_type, "Employment Type"),
        ];
        for (value, weight, name) in simple {
            if filled(value) {
                score += weight;
            } else {
                missing.push(name);
            }
        }

        if filled_list(&role.skills_used) {
            score += weights.skills_used;
        } else {
            missing.push("Skills Used");
        }

        match text(&role.description) {
            None => missing.push("Description"),
            Some(description) => {
                let title = text(&role.title).unwrap_or("Unknown Role");
                match self.analyze_description(title, company, description).await? {
                    Some(analysis) => {
                        let half = weights.description / 2.0;
                        let mut lacking = Vec::new();
                        if analysis.role_clarity {
                            score += half;
                        } else {
                            lacking.push("role clarity");
                        }
                        if analysis.impact_demonstrated {
                            score += half;
                        } else {
                            lacking.push("impact demonstration");
                        }
                        if !lacking.is_empty() {
                            review.push(ReviewItem::failed(
                                format!("For {label} description"),
                                format!("Description lacks {}", lacking.join(" and ")),
                            ));
                        }
                    }
                    None => review.push(ReviewItem::failed(
                        format!("For {label} description"),
                        "Description analysis failed",
                    )),
                }
            }
        }

        if !missing.is_empty() {
            review.push(ReviewItem::failed(
                format!("For {label}"),
                missing_fields_message(&missing),
            ));
        }

        Ok(score)
    }

    /// `None` when the generation reply could not be interpreted.
    async fn analyze_description(
        &self,
        title: &str,
        company: &str,
        description: &str,
    ) -> Result<Option<DescriptionAnalysis>, EvaluationError> {
        if is_placeholder(description) {
            return Ok(Some(DescriptionAnalysis::default()));
        }

        let (system, prompt) = prompts::experience_description(title, company, description);
        match self.gateway.call::<DescriptionReply>(&system, &prompt).await? {
            Generated::Valid(reply) => {
                debug!("Description remark for {title} at {company}: {}", reply.analysis.remark);
                Ok(Some(reply.analysis))
            }
            Generated::Degraded(_) => Ok(None),
        }
    }
}

#[async_trait]
impl Evaluator for ExperienceEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Experience
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let entries = match document.experience.as_deref() {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Ok(missing_section("Experience Section", "Experience section")),
        };

        let mut role_scores = Vec::new();
        let mut review = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let Some(company) = text(&entry.company) else {
                review.push(ReviewItem::failed(
                    format!("Experience Entry {}", index + 1),
                    "Company name is missing",
                ));
                continue;
            };

            let roles = entry.all_roles();
            if roles.is_empty() {
                review.push(ReviewItem::failed(
                    format!("Experience at {company}"),
                    "Role information is missing",
                ));
                continue;
            }

            let multiple = roles.len() > 1;
            for (role_index, role) in roles.into_iter().enumerate() {
                let label = match (text(&role.title), multiple) {
                    (Some(title), true) => format!("role '{title}' at {company}"),
                    (None, true) => format!("role #{} at {company}", role_index + 1),
                    (_, false) => format!("role at {company}"),
                };
                let score = self.score_role(company, role, &label, &mut review).await?;
                role_scores.push(score);
            }
        }

        let score = average(&role_scores).round();
        Ok(ScoreResult::new(score, review).capped(self.config.max_for(SectionKey::Experience)))
    }
}
