use std::sync::Arc;

use async_trait::async_trait;

use super::fields::missing_section;
use super::{EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::models::profile::ProfileDocument;
use crate::models::report::{ReviewItem, ScoreResult};

/// Rewards a vanity `/in/<slug>` URL over the numeric default.
pub struct LinkedinUrlEvaluator {
    config: Arc<ScoringConfig>,
}

impl LinkedinUrlEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Evaluator for LinkedinUrlEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::LinkedinUrl
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let Some(url) = document.profile_url() else {
            return Ok(missing_section("linkedin_url", "LinkedIn URL"));
        };

        if is_customized(url) {
            Ok(ScoreResult::new(self.config.max_for(SectionKey::LinkedinUrl), Vec::new()))
        } else {
            Ok(ScoreResult::new(
                0.0,
                vec![ReviewItem::failed(
                    "linkedin_url",
                    "LinkedIn URL is not customized",
                )],
            ))
        }
    }
}

/// The slug after the last `/in/`, without query, fragment, or trailing
/// slash, must be longer than two characters, contain a letter, and not be
/// all digits.
pub fn is_customized(url: &str) -> bool {
    let Some((_, tail)) = url.rsplit_once("/in/") else {
        return false;
    };
    let slug = tail
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    slug.chars().count() > 2
        && slug.chars().any(char::is_alphabetic)
        && !slug.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanity_urls_are_customized() {
        assert!(is_customized("https://www.linkedin.com/in/jane-doe"));
        assert!(is_customized("https://www.linkedin.com/in/jane-doe/?trk=public"));
        assert!(is_customized("linkedin.com/in/jd2024"));
    }

    #[test]
    fn test_default_or_malformed_urls_are_not() {
        assert!(!is_customized("https://www.linkedin.com/in/123456789"));
        assert!(!is_customized("https://www.linkedin.com/in/ab"));
        assert!(!is_customized("https://www.linkedin.com/company/acme"));
        assert!(!is_customized("https://www.linkedin.com/in/"));
    }
}
