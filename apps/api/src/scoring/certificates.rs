use std::sync::Arc;

use async_trait::async_trait;

use super::fields::{
    average, filled, filled_list, missing_fields_message, missing_section, round_to_tenth, text,
};
use super::{EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::models::profile::ProfileDocument;
use crate::models::report::{ReviewItem, ScoreResult};

pub struct CertificatesEvaluator {
    config: Arc<ScoringConfig>,
}

impl CertificatesEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Evaluator for CertificatesEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Certificates
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let entries = match document.certificates.as_deref() {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                return Ok(missing_section(
                    "Certifications Section",
                    "Certifications section",
                ))
            }
        };

        let weights = &self.config.certificates;
        let mut scores = Vec::new();
        let mut review = Vec::new();

        for (index, certificate) in entries.iter().enumerate() {
            let Some(title) = text(&certificate.title) else {
                review.push(ReviewItem::failed(
                    format!("certification #{}", index + 1),
                    "Title is missing",
                ));
                continue;
            };

            let mut score = weights.title;
            let mut missing = Vec::new();

            if filled(&certificate.provider) {
                score += weights.provider;
            } else {
                missing.push("Provider");
            }
            if filled(&certificate.issued_date) {
                score += weights.issued_date;
            } else {
                missing.push("Issued Date");
            }
            if filled_list(&certificate.skills_used) {
                score += weights.skills_used;
            } else {
                missing.push("Skills Used");
            }

            if !missing.is_empty() {
                review.push(ReviewItem::failed(title, missing_fields_message(&missing)));
            }
            scores.push(score);
        }

        let score = round_to_tenth(average(&scores));
        Ok(ScoreResult::new(score, review).capped(self.config.max_for(SectionKey::Certificates)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support;
    use serde_json::json;

    async fn evaluate(value: serde_json::Value) -> ScoreResult {
        let doc: ProfileDocument = serde_json::from_value(value).unwrap();
        CertificatesEvaluator::new(test_support::config())
            .evaluate(&doc)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_complete_certificate_scores_max() {
        let result = evaluate(json!({
            "certificates": [{
                "title": "AWS Solutions Architect",
                "provider": "Amazon Web Services",
                "issued_date": "Mar 2024",
                "skills_used": ["AWS"]
            }]
        }))
        .await;
        assert_eq!(result.score, 8.0);
        assert!(result.review.is_empty());
    }

    #[tokio::test]
    async fn test_partial_certificate_lists_missing_fields() {
        let result = evaluate(json!({
            "certificates": [{ "title": "CKA", "provider": "CNCF" }]
        }))
        .await;
        assert_eq!(result.score, 5.0);
        assert_eq!(result.review[0].check_type, "CKA");
        assert_eq!(result.review[0].message, "Issued Date, Skills Used are missing");
    }

    #[tokio::test]
    async fn test_untitled_certificates_score_zero() {
        let result = evaluate(json!({
            "certificates": [{ "provider": "CNCF" }]
        }))
        .await;
        assert_eq!(result.score, 0.0);
        assert_eq!(result.review[0].message, "Title is missing");
    }
}
