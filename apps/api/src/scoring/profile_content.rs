use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;

use super::fields::{missing_section, text};
use super::{EvaluationError, Evaluator, ScoringConfig, SectionKey};
use crate::models::profile::{ProfileDocument, ProfileHeader};
use crate::models::report::{ReviewItem, ScoreResult};

const NAME_PREFIXES: [&str; 10] = [
    "dr", "mr", "ms", "mrs", "miss", "prof", "sir", "madam", "shri", "smt",
];
const NAME_SUFFIXES: [&str; 8] = ["jr", "sr", "ii", "iii", "iv", "phd", "md", "esq"];

fn name_part_pattern() -> &'static Regex {
    static PART: OnceLock<Regex> = OnceLock::new();
    PART.get_or_init(|| {
        Regex::new(r"^(?:[A-Z][a-z]+|[A-Z]\.?|[A-Z][a-z]+[-'][A-Z][a-z]+|[A-Z][a-z]+\.)$")
            .expect("name part pattern is valid")
    })
}

fn name_charset_pattern() -> &'static Regex {
    static CHARSET: OnceLock<Regex> = OnceLock::new();
    CHARSET.get_or_init(|| {
        Regex::new(r"^[A-Za-z\s'\-\.]+$").expect("name charset pattern is valid")
    })
}

/// Profile content: network size, name format, location detail, and the
/// open-to-work signal.
pub struct ProfileContentEvaluator {
    config: Arc<ScoringConfig>,
}

impl ProfileContentEvaluator {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }

    fn score_header(&self, header: &ProfileHeader) -> ScoreResult {
        let weights = &self.config.profile_content;
        let mut score = 0.0;
        let mut review = Vec::new();

        let connections = header.connections.unwrap_or(0);
        if connections >= 500 {
            score += weights.connections;
            review.push(ReviewItem::passed(
                "Connections",
                "Connections count is excellent (500+)",
            ));
        } else if connections > 100 {
            score += weights.connections / 2.0;
            review.push(ReviewItem::failed(
                "Connections",
                "Connections count is moderate (100+). Add more professionals and peers to your network for better visibility",
            ));
        } else {
            review.push(ReviewItem::failed(
                "Connections",
                "Low connections count. Add more professionals and peers to your network to gain more visibility",
            ));
        }

        // Without a follower count, network reach is judged on connections.
        let (reach, messages) = match header.followers {
            Some(followers) => (
                followers,
                [
                    "Followers count is excellent (250+)",
                    "Followers count is moderate (100+). Increase your followers by sharing valuable content and engaging with your network",
                    "Low followers count. Increase your followers by sharing valuable content and engaging with your network",
                ],
            ),
            None => (
                connections,
                [
                    "Network size is excellent (250+ connections)",
                    "Network size is moderate (100+ connections). Increase your network by connecting with more professionals in your field",
                    "Small network size. Increase your network by connecting with more professionals in your field",
                ],
            ),
        };
        if reach >= 250 {
            score += weights.followers;
            review.push(ReviewItem::passed("Followers", messages[0]));
        } else if reach > 100 {
            score += weights.followers / 2.0;
            review.push(ReviewItem::failed("Followers", messages[1]));
        } else {
            review.push(ReviewItem::failed("Followers", messages[2]));
        }

        match text(&header.name) {
            Some(name) if name_format_tier(name) == 2 => {
                score += weights.name;
                review.push(ReviewItem::passed("Name", "Name is in professional format"));
            }
            Some(_) => {
                score += weights.name / 2.0;
                review.push(ReviewItem::failed(
                    "Name",
                    "Name needs improvement. Make sure your name is in professional format",
                ));
            }
            None => review.push(ReviewItem::failed(
                "Name",
                "Name is missing. Add your professional name to your profile",
            )),
        }

        match text(&header.location) {
            Some(location) if is_detailed_location(location) => {
                score += weights.location;
                review.push(ReviewItem::passed(
                    "Location",
                    "Location is present and detailed (e.g., City, State, Country)",
                ));
            }
            Some(_) => {
                score += weights.location / 2.0;
                review.push(ReviewItem::failed(
                    "Location",
                    "Location is present but not detailed. Specify your location in the format 'City, State, Country' for better visibility",
                ));
            }
            None => review.push(ReviewItem::failed(
                "Location",
                "Location is missing. Add your location to help recruiters find you",
            )),
        }

        let open_to_work = header.open_to_work.clone().unwrap_or_default();
        if open_to_work.present {
            score += weights.open_to_work;
            review.push(ReviewItem::passed(
                "Open To Work",
                "OpenToWork is enabled - great for visibility to recruiters",
            ));
        } else {
            review.push(ReviewItem::failed(
                "Open To Work",
                "OpenToWork is not enabled. Enable this feature to signal to recruiters that you're actively seeking opportunities",
            ));
        }

        let roles = open_to_work.roles.iter().filter(|r| !r.trim().is_empty()).count();
        let roles_item = match roles {
            n if n >= 5 => {
                score += weights.open_to_work_roles;
                ReviewItem::passed(
                    "Open To Work Roles",
                    "OpenToWork has 5+ job roles - excellent targeting",
                )
            }
            n if n >= 3 => {
                score += weights.open_to_work_roles / 2.0;
                ReviewItem::failed(
                    "Open To Work Roles",
                    "OpenToWork has 3+ job roles. Add more specific job roles for better targeting",
                )
            }
            0 => ReviewItem::failed(
                "Open To Work Roles",
                "No job roles specified in OpenToWork. Add at least 5 specific job roles for optimal targeting",
            ),
            _ => ReviewItem::failed(
                "Open To Work Roles",
                "OpenToWork has some job roles. Add more specific job roles for better targeting",
            ),
        };
        review.push(roles_item);

        ScoreResult::new(score, review)
    }
}

#[async_trait]
impl Evaluator for ProfileContentEvaluator {
    fn section(&self) -> SectionKey {
        SectionKey::ProfileContent
    }

    async fn evaluate(&self, document: &ProfileDocument) -> Result<ScoreResult, EvaluationError> {
        let Some(header) = document.profile.as_ref() else {
            return Ok(missing_section("Profile Section", "Profile section"));
        };
        Ok(self
            .score_header(header)
            .capped(self.config.max_for(SectionKey::ProfileContent)))
    }
}

/// 2 for a professionally formatted name, 1 for anything else non-empty,
/// 0 when nothing is left after stripping honorifics.
pub fn name_format_tier(name: &str) -> u8 {
    let name = name.trim();
    let mut parts: Vec<&str> = name.split_whitespace().collect();
    if parts.is_empty() {
        return 0;
    }

    let normalized = |part: &str| part.to_lowercase().replace('.', "");
    if parts
        .first()
        .is_some_and(|p| NAME_PREFIXES.contains(&normalized(p).as_str()))
    {
        parts.remove(0);
    }
    if parts
        .last()
        .is_some_and(|p| NAME_SUFFIXES.contains(&normalized(p).as_str()))
    {
        parts.pop();
    }
    if parts.is_empty() {
        return 0;
    }

    if !parts.iter().all(|p| name_part_pattern().is_match(p)) {
        return 1;
    }
    let letters: usize = parts.iter().map(|p| p.chars().count()).sum();
    if !(2..=50).contains(&letters) || parts.len() > 5 {
        return 1;
    }
    if !name_charset_pattern().is_match(name) {
        return 1;
    }

    let joined: String = parts.concat();
    let cased: Vec<char> = joined.chars().filter(|c| c.is_alphabetic()).collect();
    if cased.iter().all(|c| c.is_uppercase()) || cased.iter().all(|c| c.is_lowercase()) {
        return 1;
    }
    2
}

/// "City, State, Country": three or more comma-separated parts, each with a letter.
pub fn is_detailed_location(location: &str) -> bool {
    let parts: Vec<&str> = location.split(',').map(str::trim).collect();
    parts.len() >= 3
        && parts
            .iter()
            .all(|p| p.chars().any(|c| c.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support;
    use serde_json::json;

    async fn evaluate(profile: serde_json::Value) -> ScoreResult {
        let doc: ProfileDocument = serde_json::from_value(json!({ "profile": profile })).unwrap();
        ProfileContentEvaluator::new(test_support::config())
            .evaluate(&doc)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_complete_profile_scores_max() {
        let result = evaluate(json!({
            "name": "Jane Doe",
            "connections": "500+",
            "followers": 800,
            "location": "Pune, Maharashtra, India",
            "openToWork": { "present": true, "roles": ["A", "B", "C", "D", "E"] }
        }))
        .await;
        assert_eq!(result.score, 10.0);
        assert!(result.review.iter().all(|r| r.passed));
        assert_eq!(result.review.len(), 6);
    }

    #[tokio::test]
    async fn test_followers_fall_back_to_connections() {
        let result = evaluate(json!({ "connections": 300 })).await;
        // connections moderate 1 + network size excellent 2
        assert_eq!(result.score, 3.0);
        assert_eq!(
            result.review[1].message,
            "Network size is excellent (250+ connections)"
        );
    }

    #[tokio::test]
    async fn test_partial_profile_earns_half_weights() {
        let result = evaluate(json!({
            "name": "JANE DOE",
            "location": "Pune",
            "openToWork": { "present": false, "roles": ["A", "B", "C"] }
        }))
        .await;
        // name 1 + location 0.5 + roles 1
        assert_eq!(result.score, 2.5);
    }

    #[test]
    fn test_name_format_tiers() {
        assert_eq!(name_format_tier("Jane Doe"), 2);
        assert_eq!(name_format_tier("Dr. Jane Doe PhD"), 2);
        assert_eq!(name_format_tier("Mary-Jane Watson"), 2);
        assert_eq!(name_format_tier("Jane O'Neil"), 1);
        assert_eq!(name_format_tier("J. R. Tolkien"), 2);
        assert_eq!(name_format_tier("jane doe"), 1);
        assert_eq!(name_format_tier("JANE DOE"), 1);
        assert_eq!(name_format_tier("Jane Doe 3rd"), 1);
        assert_eq!(name_format_tier("Dr."), 0);
    }

    #[test]
    fn test_detailed_location() {
        assert!(is_detailed_location("Austin, Texas, United States"));
        assert!(!is_detailed_location("Austin, Texas"));
        assert!(!is_detailed_location("Austin, 78701, USA"));
    }
}
