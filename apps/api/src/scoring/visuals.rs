//! Profile picture and banner presence.

use std::sync::Arc;

use async_trait::async_trait;

use super::fields::missing_section;
use super::{EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::models::profile::ProfileDocument;
use crate::models::report::{ReviewItem, ScoreResult};

pub struct ProfilePicEvaluator {
    config: Arc<ScoringConfig>,
}

impl ProfilePicEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Evaluator for ProfilePicEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::ProfilePic
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let picture = document
            .profile
            .as_ref()
            .and_then(|p| p.profile_pic.as_ref())
            .filter(|pic| pic.present);

        let result = match picture {
            None => missing_section("profile", "Profile picture"),
            Some(pic) if pic.is_default => ScoreResult::new(
                0.0,
                vec![ReviewItem::failed(
                    "profile",
                    "Profile picture is using default image",
                )],
            ),
            Some(_) => ScoreResult::new(self.config.max_for(SectionKey::ProfilePic), Vec::new()),
        };
        Ok(result)
    }
}

pub struct BannerEvaluator {
    config: Arc<ScoringConfig>,
}

impl BannerEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Evaluator for BannerEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::Banner
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let present = document
            .profile
            .as_ref()
            .and_then(|p| p.banner)
            .unwrap_or(false);

        if present {
            Ok(ScoreResult::new(self.config.max_for(SectionKey::Banner), Vec::new()))
        } else {
            Ok(missing_section("banner", "Banner"))
        }
    }
}
