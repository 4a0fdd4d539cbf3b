use std::sync::Arc;

use async_trait::async_trait;

use super::fields::{missing_section, round_to_tenth, text};
use super::rubric::SkillsRelevanceReply;
use super::{prompts, EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::llm_client::{Generated, GenerationGateway};
use crate::models::profile::{ProfileDocument, SkillEntry};
use crate::models::report::{ReviewItem, ScoreResult};

const LISTED_LOW_ENDORSEMENT: usize = 5;

/// Skills: count, endorsement share, and relevance to the headline.
pub struct SkillsEvaluator {
    config: Arc<ScoringConfig>,
    gateway: GenerationGateway,
}

impl SkillsEvaluator {
    pub fn new(config: Arc<ScoringConfig>, gateway: GenerationGateway) -> Self {
        Self { config, gateway }
    }

    async fn relevance(
        &self,
        headline: &str,
        skills: &[SkillEntry],
    ) -> Result<(i64, Vec<String>), EvaluationError> {
        let names: Vec<&str> = skills.iter().filter_map(|s| text(&s.name)).collect();
        let (system, prompt) = prompts::skills_relevance(headline, &names);

        let relevance = match self.gateway.call::<SkillsRelevanceReply>(&system, &prompt).await? {
            Generated::Valid(reply) => (reply.relevance_score.clamp(1, 5), reply.suggested_skills),
            Generated::Degraded(_) => fallback_relevance(skills.len()),
        };
        Ok(relevance)
    }
}

/// Count-based relevance guess used when the relevance reply is unusable.
fn fallback_relevance(count: usize) -> (i64, Vec<String>) {
    let suggestions = [
        "Communication",
        "Problem Solving",
        "Team Leadership",
        "Project Management",
        "Technical Writing",
    ];
    let (score, take) = if count > 10 {
        (4, 3)
    } else if count >= 5 {
        (3, 4)
    } else {
        (2, 5)
    };
    (
        score,
        suggestions[..take].iter().map(|s| s.to_string()).collect(),
    )
}

#[async_trait]
impl Evaluator for SkillsEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Skills
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let skills = match document.skills.as_deref() {
            Some(skills) if !skills.is_empty() => skills,
            _ => return Ok(missing_section("Skills Section", "Skills section")),
        };

        let weights = &self.config.skills;
        let mut score = 0.0;
        let mut review = Vec::new();
        let total = skills.len();

        if total >= weights.target_count {
            score += weights.count;
        } else {
            score += total as f64 / weights.target_count as f64 * weights.count;
            review.push(ReviewItem::failed(
                "Skill count",
                format!(
                    "Try to add at least {} skills to your skills section to increase your visibility",
                    weights.target_count
                ),
            ));
        }

        let low: Vec<&str> = skills
            .iter()
            .filter(|s| s.endorsements.unwrap_or(0) < weights.endorsement_threshold)
            .map(|s| text(&s.name).unwrap_or("Unknown skill"))
            .collect();
        let endorsed_share = (total - low.len()) as f64 / total as f64;
        score += endorsed_share * weights.endorsements;
        if endorsed_share < 0.5 {
            let mut names = low
                .iter()
                .take(LISTED_LOW_ENDORSEMENT)
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            if low.len() > LISTED_LOW_ENDORSEMENT {
                names.push_str(" and others");
            }
            review.push(ReviewItem::failed(
                "Endorsements",
                format!("These skills ({names}) have few endorsements, try to ask peers to endorse skills"),
            ));
        }

        match document.headline() {
            Some(headline) => {
                let (relevance, suggested) = self.relevance(headline, skills).await?;
                if relevance >= weights.relevance_pass {
                    score += weights.relevance;
                } else {
                    score += relevance as f64 / 5.0 * weights.relevance;
                    review.push(ReviewItem::failed(
                        "Skill Relevance",
                        format!(
                            "Consider adding these skills to your skill section: {}",
                            suggested.join(", ")
                        ),
                    ));
                }
            }
            None => {
                score += weights.relevance * 0.5;
                review.push(ReviewItem::failed(
                    "Skill Relevance",
                    "Add a professional headline to better showcase how your skills align with your career focus",
                ));
            }
        }

        let score = round_to_tenth(score);
        Ok(ScoreResult::new(score, review).capped(self.config.max_for(SectionKey::Skills)))
    }
}
