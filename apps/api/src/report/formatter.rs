use std::sync::Arc;

use crate::models::report::{ScoreResult, SectionReport};
use crate::report::guidance::GuidanceCatalog;
use crate::scoring::{ScoringConfig, SectionKey};

/// Linear 0–100 scaling: `round(raw * 100 / max)`, clamped.
pub fn scale(raw: f64, max: f64) -> i64 {
    if max <= 0.0 {
        return 0;
    }
    ((raw * 100.0 / max).round() as i64).clamp(0, 100)
}

/// Turns raw evaluator output into a display-ready section.
#[derive(Clone)]
pub struct ResultFormatter {
    config: Arc<ScoringConfig>,
    catalog: Arc<GuidanceCatalog>,
}

impl ResultFormatter {
    pub fn new(config: Arc<ScoringConfig>, catalog: Arc<GuidanceCatalog>) -> Self {
        Self { config, catalog }
    }

    pub fn format(&self, section: SectionKey, result: ScoreResult) -> SectionReport {
        let max = self.config.max_for(section);
        let score = scale(result.score, max).to_string();

        match self.catalog.get(section) {
            Some(guidance) => SectionReport {
                section: section.report_key().to_string(),
                title: guidance.title.clone(),
                description: guidance.description.clone(),
                score,
                review: guidance.review_for(result.score, max, result.review),
                bonus_tip: guidance.bonus_tips.clone(),
                additional_info: guidance.additional_info.clone(),
            },
            None => SectionReport {
                section: section.report_key().to_string(),
                title: section.display_name().to_string(),
                description: String::new(),
                score,
                review: result.review,
                bonus_tip: Vec::new(),
                additional_info: Vec::new(),
            },
        }
    }
}
