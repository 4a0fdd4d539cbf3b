use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::SectionKey;

/// Immutable scoring tables shared by every evaluator and the formatter.
///
/// Per-entry field weights of list sections sum to the section maximum, so
/// an entry with every field filled scores exactly the max.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub section_max: HashMap<SectionKey, f64>,
    pub profile_content: ProfileContentWeights,
    pub headline_rubric: RubricWeights,
    pub headline_length: f64,
    pub about_rubric: RubricWeights,
    pub about_length: f64,
    pub experience: ExperienceWeights,
    pub education: EducationWeights,
    pub projects: ProjectWeights,
    pub certificates: CertificateWeights,
    pub skills: SkillWeights,
}

impl ScoringConfig {
    pub fn max_for(&self, section: SectionKey) -> f64 {
        self.section_max.get(&section).copied().unwrap_or(0.0)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let section_max = HashMap::from([
            (SectionKey::ProfileContent, 10.0),
            (SectionKey::ProfilePic, 10.0),
            (SectionKey::Banner, 3.0),
            (SectionKey::Headline, 15.0),
            (SectionKey::About, 20.0),
            (SectionKey::Experience, 20.0),
            (SectionKey::Education, 10.0),
            (SectionKey::Projects, 10.0),
            (SectionKey::Skills, 10.0),
            (SectionKey::Certificates, 8.0),
            (SectionKey::Volunteering, 2.0),
            (SectionKey::Interests, 2.0),
            (SectionKey::Languages, 2.0),
            (SectionKey::LinkedinUrl, 5.0),
            (SectionKey::Recommendations, 2.0),
            (SectionKey::Activity, 2.0),
        ]);

        Self {
            section_max,
            profile_content: ProfileContentWeights::default(),
            headline_rubric: RubricWeights::new(&[
                ("Professional Identity", 3.0),
                ("Skills Integration", 3.0),
                ("Searchability & Keywords", 3.0),
                ("Formatting & Structure", 3.0),
            ]),
            headline_length: 3.0,
            about_rubric: RubricWeights::new(&[
                ("Professional Career Story", 3.0),
                ("Skills and Strengths", 4.0),
                ("Achievements and Impact", 4.0),
                ("Human Touch", 3.0),
                ("Call to Action", 3.0),
            ]),
            about_length: 3.0,
            experience: ExperienceWeights::default(),
            education: EducationWeights::default(),
            projects: ProjectWeights::default(),
            certificates: CertificateWeights::default(),
            skills: SkillWeights::default(),
        }
    }
}

/// Check-type → weight table for a generation rubric. Lookup is exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubricWeights(Vec<(String, f64)>);

impl RubricWeights {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(name, weight)| (name.to_string(), *weight))
                .collect(),
        )
    }

    pub fn weight_of(&self, check_type: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == check_type)
            .map(|(_, weight)| *weight)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, weight)| weight).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileContentWeights {
    pub connections: f64,
    pub followers: f64,
    pub name: f64,
    pub location: f64,
    pub open_to_work: f64,
    pub open_to_work_roles: f64,
}

impl Default for ProfileContentWeights {
    fn default() -> Self {
        Self {
            connections: 2.0,
            followers: 2.0,
            name: 2.0,
            location: 1.0,
            open_to_work: 1.0,
            open_to_work_roles: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceWeights {
    pub title: f64,
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub location: f64,
    pub employment_type: f64,
    pub skills_used: f64,
    /// Split evenly between role clarity and demonstrated impact.
    pub description: f64,
}

impl Default for ExperienceWeights {
    fn default() -> Self {
        Self {
            title: 3.0,
            from: 2.0,
            to: 2.0,
            duration: 2.0,
            location: 3.0,
            employment_type: 3.0,
            skills_used: 2.0,
            description: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationWeights {
    pub college: f64,
    pub field_of_study: f64,
    pub from: f64,
    pub to: f64,
    pub grade: f64,
    pub skills_used: f64,
}

impl Default for EducationWeights {
    fn default() -> Self {
        Self {
            college: 2.0,
            field_of_study: 2.0,
            from: 1.0,
            to: 1.0,
            grade: 2.0,
            skills_used: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWeights {
    pub title: f64,
    pub date: f64,
    pub description: f64,
    pub media_links: f64,
    /// Generation quality (1–5) at or above which the description earns full weight.
    pub description_pass_quality: i64,
}

impl Default for ProjectWeights {
    fn default() -> Self {
        Self {
            title: 2.0,
            date: 2.0,
            description: 3.0,
            media_links: 3.0,
            description_pass_quality: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateWeights {
    pub title: f64,
    pub provider: f64,
    pub issued_date: f64,
    pub skills_used: f64,
}

impl Default for CertificateWeights {
    fn default() -> Self {
        Self {
            title: 2.0,
            provider: 3.0,
            issued_date: 2.0,
            skills_used: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillWeights {
    pub count: f64,
    pub endorsements: f64,
    pub relevance: f64,
    pub target_count: usize,
    pub endorsement_threshold: u64,
    /// Relevance (1–5) at or above which the relevance weight is awarded in full.
    pub relevance_pass: i64,
}

impl Default for SkillWeights {
    fn default() -> Self {
        Self {
            count: 5.0,
            endorsements: 3.0,
            relevance: 2.0,
            target_count: 15,
            endorsement_threshold: 5,
            relevance_pass: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_a_positive_max() {
        let config = ScoringConfig::default();
        for section in SectionKey::ORDER {
            assert!(config.max_for(section) > 0.0, "{section} has no max");
        }
    }

    #[test]
    fn test_rubric_plus_length_fills_text_section_max() {
        let config = ScoringConfig::default();
        assert_eq!(
            config.headline_rubric.total() + config.headline_length,
            config.max_for(SectionKey::Headline)
        );
        assert_eq!(
            config.about_rubric.total() + config.about_length,
            config.max_for(SectionKey::About)
        );
    }

    #[test]
    fn test_entry_weights_sum_to_section_max() {
        let config = ScoringConfig::default();
        let e = &config.experience;
        let experience = e.title
            + e.from
            + e.to
            + e.duration
            + e.location
            + e.employment_type
            + e.skills_used
            + e.description;
        assert_eq!(experience, config.max_for(SectionKey::Experience));

        let ed = &config.education;
        let education =
            ed.college + ed.field_of_study + ed.from + ed.to + ed.grade + ed.skills_used;
        assert_eq!(education, config.max_for(SectionKey::Education));

        let c = &config.certificates;
        assert_eq!(
            c.title + c.provider + c.issued_date + c.skills_used,
            config.max_for(SectionKey::Certificates)
        );
    }

    #[test]
    fn test_unknown_rubric_check_has_no_weight() {
        let config = ScoringConfig::default();
        assert_eq!(config.headline_rubric.weight_of("Human Touch"), None);
        assert_eq!(config.about_rubric.weight_of("Human Touch"), Some(3.0));
    }
}
