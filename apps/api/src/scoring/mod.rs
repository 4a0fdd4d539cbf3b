// Section evaluators for the profile checker.
// Every generation call goes through llm_client::GenerationGateway; nothing in
// this module talks to the provider directly.

pub mod about;
pub mod certificates;
pub mod education;
pub mod engagement;
pub mod experience;
pub mod fields;
pub mod headline;
pub mod linkedin_url;
pub mod profile_content;
pub mod projects;
pub mod prompts;
pub mod rubric;
pub mod skills;
pub mod visuals;
pub mod weights;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::{GenerationGateway, LlmError};
use crate::models::profile::ProfileDocument;
use crate::models::report::ScoreResult;

pub use weights::ScoringConfig;

// ────────────────────────────────────────────────────────────────────────────
// Section identity
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    ProfileContent,
    ProfilePic,
    Banner,
    Headline,
    About,
    Experience,
    Education,
    Projects,
    Skills,
    Certificates,
    Volunteering,
    Interests,
    Languages,
    LinkedinUrl,
    Recommendations,
    Activity,
}

impl SectionKey {
    /// Evaluation order. Events are emitted in exactly this sequence.
    pub const ORDER: [SectionKey; 16] = [
        SectionKey::ProfileContent,
        SectionKey::ProfilePic,
        SectionKey::Banner,
        SectionKey::Headline,
        SectionKey::About,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Projects,
        SectionKey::Skills,
        SectionKey::Certificates,
        SectionKey::Volunteering,
        SectionKey::Interests,
        SectionKey::Languages,
        SectionKey::LinkedinUrl,
        SectionKey::Recommendations,
        SectionKey::Activity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::ProfileContent => "profile_content",
            SectionKey::ProfilePic => "profile_pic",
            SectionKey::Banner => "banner",
            SectionKey::Headline => "headline",
            SectionKey::About => "about",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Projects => "projects",
            SectionKey::Skills => "skills",
            SectionKey::Certificates => "certificates",
            SectionKey::Volunteering => "volunteering",
            SectionKey::Interests => "interests",
            SectionKey::Languages => "languages",
            SectionKey::LinkedinUrl => "linkedin_url",
            SectionKey::Recommendations => "recommendations",
            SectionKey::Activity => "activity",
        }
    }

    /// Human-readable name used in error events.
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKey::ProfileContent => "Profile Content",
            SectionKey::ProfilePic => "Profile Picture",
            SectionKey::Banner => "Banner",
            SectionKey::Headline => "Headline",
            SectionKey::About => "About",
            SectionKey::Experience => "Experience",
            SectionKey::Education => "Education",
            SectionKey::Projects => "Projects",
            SectionKey::Skills => "Skills",
            SectionKey::Certificates => "Certifications",
            SectionKey::Volunteering => "Volunteering",
            SectionKey::Interests => "Interests",
            SectionKey::Languages => "Languages",
            SectionKey::LinkedinUrl => "LinkedIn URL",
            SectionKey::Recommendations => "Recommendations",
            SectionKey::Activity => "Activity",
        }
    }

    /// Key under which the formatted section appears in reports.
    pub fn report_key(&self) -> &'static str {
        match self {
            SectionKey::ProfileContent => "profile",
            SectionKey::Banner => "profile_bg_pic",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Evaluator trait
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("generation service failed: {0}")]
    Generation(#[from] LlmError),
}

/// Scores one profile section.
///
/// A missing section is a normal zero-score result. Only a failure to reach
/// the generation service is an error; malformed generation output is
/// handled inside the evaluator.
#[async_trait]
pub trait Evaluator: Send + Sync {
    fn section(&self) -> SectionKey;

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError>;
}

/// Builds the full evaluator battery in evaluation order.
pub fn standard_evaluators(
    config: Arc<ScoringConfig>,
    gateway: GenerationGateway,
) -> Vec<Arc<dyn Evaluator>> {
    vec![
        Arc::new(profile_content::ProfileContentEvaluator::new(config.clone())),
        Arc::new(visuals::ProfilePicEvaluator::new(config.clone())),
        Arc::new(visuals::BannerEvaluator::new(config.clone())),
        Arc::new(headline::HeadlineEvaluator::new(config.clone(), gateway.clone())),
        Arc::new(about::AboutEvaluator::new(config.clone(), gateway.clone())),
        Arc::new(experience::ExperienceEvaluator::new(config.clone(), gateway.clone())),
        Arc::new(education::EducationEvaluator::new(config.clone())),
        Arc::new(projects::ProjectsEvaluator::new(config.clone(), gateway.clone())),
        Arc::new(skills::SkillsEvaluator::new(config.clone(), gateway.clone())),
        Arc::new(certificates::CertificatesEvaluator::new(config.clone())),
        Arc::new(engagement::VolunteeringEvaluator::new(config.clone())),
        Arc::new(engagement::InterestsEvaluator::new(config.clone())),
        Arc::new(engagement::LanguagesEvaluator::new(config.clone())),
        Arc::new(linkedin_url::LinkedinUrlEvaluator::new(config.clone())),
        Arc::new(engagement::RecommendationsEvaluator::new(config.clone(), gateway)),
        Arc::new(engagement::ActivityEvaluator::new(config)),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::llm_client::testing::StubTransport;
    use crate::llm_client::GenerationGateway;

    use super::ScoringConfig;

    pub fn config() -> Arc<ScoringConfig> {
        Arc::new(ScoringConfig::default())
    }

    pub fn gateway(stub: StubTransport) -> GenerationGateway {
        GenerationGateway::new(Arc::new(stub))
    }

    /// A gateway whose every call fails at the transport level.
    pub fn unreachable_gateway() -> GenerationGateway {
        gateway(StubTransport::new().fail_when("", 503))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubTransport;

    #[test]
    fn test_standard_evaluators_follow_section_order() {
        let evaluators = standard_evaluators(
            test_support::config(),
            test_support::gateway(StubTransport::new()),
        );
        let sections: Vec<SectionKey> = evaluators.iter().map(|e| e.section()).collect();
        assert_eq!(sections, SectionKey::ORDER.to_vec());
    }

    #[test]
    fn test_report_keys_rename_profile_and_banner() {
        assert_eq!(SectionKey::ProfileContent.report_key(), "profile");
        assert_eq!(SectionKey::Banner.report_key(), "profile_bg_pic");
        assert_eq!(SectionKey::Certificates.report_key(), "certificates");
    }

    #[tokio::test]
    async fn test_empty_document_scores_zero_with_one_missing_item_everywhere() {
        // No generation call may happen for an empty document.
        let evaluators = standard_evaluators(
            test_support::config(),
            test_support::unreachable_gateway(),
        );
        let document = ProfileDocument::default();

        for evaluator in evaluators {
            let result = evaluator.evaluate(&document).await.unwrap();
            assert_eq!(result.score, 0.0, "{} scored", evaluator.section());
            assert_eq!(result.review.len(), 1, "{} review", evaluator.section());
            assert!(!result.review[0].passed);
            assert!(
                result.review[0].message.ends_with("is missing"),
                "{}: {}",
                evaluator.section(),
                result.review[0].message
            );
        }
    }
}
