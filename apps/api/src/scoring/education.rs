use std::sync::Arc;

use async_trait::async_trait;

use super::fields::{
    average, filled_list, meaningful, missing_fields_message, missing_section, round_to_tenth, text,
};
use super::{EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::models::profile::{EducationEntry, ProfileDocument};
use crate::models::report::{ReviewItem, ScoreResult};

/// Education: per-entry field completeness, averaged to one decimal.
/// Placeholder values like "N/A" count as empty.
pub struct EducationEvaluator {
    config: Arc<ScoringConfig>,
}

impl EducationEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }

    fn score_entry(&self, entry: &EducationEntry) -> (f64, Vec<&'static str>) {
        let weights = &self.config.education;
        let mut score = weights.college;
        let mut missing = Vec::new();

        let checks = [
            (&entry.field_of_study, weights.field_of_study, "Field of Study"),
            (&entry.from, weights.from, "Start date"),
            (&entry.to, weights.to, "End date"),
            (&entry.grade, weights.grade, "Grade"),
        ];
        for (value, weight, name) in checks {
            if meaningful(value) {
                score += weight;
            } else {
                missing.push(name);
            }
        }

        if filled_list(&entry.skills_used) {
            score += weights.skills_used;
        } else {
            missing.push("Skills Used");
        }

        (score, missing)
    }
}

#[async_trait]
impl Evaluator for EducationEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Education
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let entries = match document.education.as_deref() {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Ok(missing_section("Education Section", "Education section")),
        };

        let mut scores = Vec::new();
        let mut review = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let college = match text(&entry.college) {
                Some(college) if meaningful(&entry.college) => college,
                _ => {
                    review.push(ReviewItem::failed(
                        format!("For education entry #{}", index + 1),
                        "College is missing",
                    ));
                    continue;
                }
            };

            let (score, missing) = self.score_entry(entry);
            scores.push(score);

            if !missing.is_empty() {
                let label = match text(&entry.study_type) {
                    Some(study_type) => format!("For {study_type} at {college}"),
                    None => format!("For {college}"),
                };
                review.push(ReviewItem::failed(label, missing_fields_message(&missing)));
            }
        }

        let score = round_to_tenth(average(&scores));
        Ok(ScoreResult::new(score, review).capped(self.config.max_for(SectionKey::Education)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support;
    use serde_json::json;

    async fn evaluate(value: serde_json::Value) -> ScoreResult {
        let doc: ProfileDocument = serde_json::from_value(value).unwrap();
        EducationEvaluator::new(test_support::config())
            .evaluate(&doc)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_complete_entry_scores_max() {
        let result = evaluate(json!({
            "education": [{
                "college": "IIT Bombay",
                "study_type": "B.Tech",
                "field_of_study": "Computer Science",
                "from": "2016",
                "to": "2020",
                "grade": "8.9 CGPA",
                "skills_used": "Algorithms, Systems"
            }]
        })).await;
        assert_eq!(result.score, 10.0);
        assert!(result.review.is_empty());
    }

    #[tokio::test]
    async fn test_placeholders_count_as_missing() {
        let result = evaluate(json!({
            "education": [{
                "college": "IIT Bombay",
                "study_type": "B.Tech",
                "field_of_study": "Computer Science",
                "from": "2016",
                "to": "2020",
                "grade": "N/A"
            }]
        })).await;
        assert_eq!(result.score, 6.0);
        assert_eq!(result.review[0].check_type, "For B.Tech at IIT Bombay");
        assert_eq!(result.review[0].message, "Grade, Skills Used are missing");
    }

    #[tokio::test]
    async fn test_entries_without_college_are_excluded_from_average() {
        let result = evaluate(json!({
            "education": [
                { "college": "MIT", "field_of_study": "Physics" },
                { "field_of_study": "Art", "grade": "A" }
            ]
        })).await;
        assert_eq!(result.score, 4.0);
        assert_eq!(result.review[1].check_type, "For education entry #2");
    }

    #[tokio::test]
    async fn test_average_rounds_to_one_decimal() {
        let result = evaluate(json!({
            "education": [
                { "college": "A", "from": "2010" },
                { "college": "B", "from": "2010", "to": "2014" },
                { "college": "C" }
            ]
        })).await;
        // (3 + 4 + 2) / 3 = 3.0
        assert_eq!(result.score, 3.0);

        let result = evaluate(json!({
            "education": [
                { "college": "A", "from": "2010" },
                { "college": "B" },
                { "college": "C" }
            ]
        })).await;
        // (3 + 2 + 2) / 3 = 2.333...
        assert_eq!(result.score, 2.3);
    }
}
