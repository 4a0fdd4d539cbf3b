use std::sync::Arc;

use async_trait::async_trait;

use super::fields::{
    average, char_len, filled, missing_fields_message, missing_section, round_to_tenth, text,
};
use super::rubric::ProjectQualityReply;
use super::{prompts, EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::llm_client::{Generated, GenerationGateway};
use crate::models::profile::{ProfileDocument, ProjectEntry};
use crate::models::report::{ReviewItem, ScoreResult};

const ACTION_VERBS: [&str; 5] = ["built", "developed", "created", "implemented", "designed"];

/// Description quality on a 1–5 scale plus an improvement hint.
#[derive(Debug, Clone, PartialEq)]
struct Quality {
    score: i64,
    suggestion: String,
}

pub struct ProjectsEvaluator {
    config: Arc<ScoringConfig>,
    gateway: GenerationGateway,
}

impl ProjectsEvaluator {
    pub fn new(config: Arc<ScoringConfig>, gateway: GenerationGateway) -> Self {
        Self { config, gateway }
    }

    async fn description_quality(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Quality, EvaluationError> {
        let (system, prompt) = prompts::project_description(title, description);
        let quality = match self.gateway.call::<ProjectQualityReply>(&system, &prompt).await? {
            Generated::Valid(reply) => Quality {
                score: reply.score.clamp(1, 5),
                suggestion: if reply.suggestion.trim().is_empty() {
                    "Consider adding more technical details and measurable outcomes.".to_string()
                } else {
                    reply.suggestion
                },
            },
            Generated::Degraded(_) => heuristic_quality(description),
        };
        Ok(quality)
    }

    async fn score_project(
        &self,
        title: &str,
        project: &ProjectEntry,
        review: &mut Vec<ReviewItem>,
    ) -> Result<f64, EvaluationError> {
        let weights = &self.config.projects;
        let mut score = weights.title;
        let mut missing = Vec::new();

        if filled(&project.date) {
            score += weights.date;
        } else {
            missing.push("Date");
        }

        match text(&project.description) {
            Some(description) => {
                let quality = self.description_quality(title, description).await?;
                if quality.score >= weights.description_pass_quality {
                    score += weights.description;
                } else {
                    score += quality.score as f64;
                    review.push(ReviewItem::failed(
                        format!("For {title} description"),
                        quality.suggestion,
                    ));
                }
            }
            None => missing.push("Description"),
        }

        let has_media = [&project.repo_link, &project.blog_link, &project.demo_link]
            .into_iter()
            .any(filled);
        if has_media {
            score += weights.media_links;
        } else {
            missing.push("Media links");
        }

        if !missing.is_empty() {
            review.push(ReviewItem::failed(
                format!("For {title}"),
                missing_fields_message(&missing),
            ));
        }

        Ok(score)
    }
}

/// Length and action-verb heuristic used when the quality reply is unusable.
fn heuristic_quality(description: &str) -> Quality {
    let description = description.trim();
    let lower = description.to_lowercase();
    let len = char_len(description);

    if len > 100 && ACTION_VERBS.iter().any(|verb| lower.contains(verb)) {
        Quality {
            score: 3,
            suggestion: "Consider adding more specific technical details and measurable outcomes."
                .to_string(),
        }
    } else if len > 50 {
        Quality {
            score: 2,
            suggestion: "Add more technical details, technologies used, and specific achievements."
                .to_string(),
        }
    } else {
        Quality {
            score: 1,
            suggestion:
                "Expand the description with technical details, technologies used, and project outcomes."
                    .to_string(),
        }
    }
}

#[async_trait]
impl Evaluator for ProjectsEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Projects
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let projects = match document.projects.as_deref() {
            Some(projects) if !projects.is_empty() => projects,
            _ => return Ok(missing_section("Projects Section", "Projects section")),
        };

        let mut scores = Vec::new();
        let mut review = Vec::new();

        for (index, project) in projects.iter().enumerate() {
            let Some(title) = text(&project.title) else {
                review.push(ReviewItem::failed(
                    format!("For project #{}", index + 1),
                    "Title is missing",
                ));
                continue;
            };
            scores.push(self.score_project(title, project, &mut review).await?);
        }

        let score = round_to_tenth(average(&scores));
        Ok(ScoreResult::new(score, review).capped(self.config.max_for(SectionKey::Projects)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubTransport;
    use crate::scoring::test_support;
    use serde_json::json;

    fn evaluator(stub: StubTransport) -> ProjectsEvaluator {
        ProjectsEvaluator::new(test_support::config(), test_support::gateway(stub))
    }

    fn document(description: &str) -> ProfileDocument {
        serde_json::from_value(json!({
            "projects": [{
                "title": "Ledger",
                "date": "2023",
                "description": description,
                "repo_link": "https://github.com/jane/ledger"
            }]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_good_description_earns_full_weight() {
        let result = evaluator(
            StubTransport::new()
                .respond_when("Evaluate this project description", r#"{"score":4,"suggestion":"ok"}"#),
        )
        .evaluate(&document("A double-entry ledger in Rust."))
        .await
        .unwrap();

        assert_eq!(result.score, 10.0);
        assert!(result.review.is_empty());
    }

    #[tokio::test]
    async fn test_weak_description_adds_quality_and_suggestion() {
        let result = evaluator(StubTransport::new().respond_when(
            "Evaluate this project description",
            r#"{"score":2,"suggestion":"Name the technologies."}"#,
        ))
        .evaluate(&document("A ledger."))
        .await
        .unwrap();

        assert_eq!(result.score, 9.0);
        assert_eq!(result.review[0].check_type, "For Ledger description");
        assert_eq!(result.review[0].message, "Name the technologies.");
    }

    #[tokio::test]
    async fn test_degraded_reply_falls_back_to_heuristic() {
        let result = evaluator(
            StubTransport::new().respond_when("Evaluate this project description", "Rating: good"),
        )
        .evaluate(&document("A ledger."))
        .await
        .unwrap();

        assert_eq!(result.score, 8.0);
        assert!(result.review[0].message.starts_with("Expand the description"));
    }

    #[tokio::test]
    async fn test_untitled_project_excluded_and_missing_fields_listed() {
        let doc: ProfileDocument = serde_json::from_value(json!({
            "projects": [
                { "description": "" },
                { "title": "CLI" }
            ]
        }))
        .unwrap();

        let result = ProjectsEvaluator::new(test_support::config(), test_support::unreachable_gateway())
            .evaluate(&doc)
            .await
            .unwrap();

        assert_eq!(result.score, 2.0);
        assert_eq!(result.review[0].message, "Title is missing");
        assert_eq!(result.review[1].check_type, "For CLI");
        assert_eq!(
            result.review[1].message,
            "Date, Description, Media links are missing"
        );
    }

    #[test]
    fn test_heuristic_rewards_long_descriptions_with_action_verbs() {
        let long = format!("Built {}", "a distributed cache with consistent hashing. ".repeat(3));
        assert_eq!(heuristic_quality(&long).score, 3);
        assert_eq!(heuristic_quality(&"word ".repeat(12)).score, 2);
        assert_eq!(heuristic_quality("tiny").score, 1);
    }
}
