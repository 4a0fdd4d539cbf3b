//! Typed view of a submitted profile export.
//!
//! Every section is optional and every field inside a section is optional:
//! scrapers and browser extensions produce partial documents, and absence is
//! scored, never rejected. Unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDocument {
    pub profile: Option<ProfileHeader>,
    pub about: Option<AboutSection>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub projects: Option<Vec<ProjectEntry>>,
    pub skills: Option<Vec<SkillEntry>>,
    pub certificates: Option<Vec<CertificateEntry>>,
    pub volunteering: Option<Vec<VolunteerEntry>>,
    pub interests: Option<InterestsSection>,
    pub languages: Option<Vec<LanguageEntry>>,
    pub recommendations: Option<RecommendationsSection>,
    pub activity: Option<ActivitySection>,
}

impl ProfileDocument {
    /// Headline text, trimmed, if the profile carries a non-blank one.
    pub fn headline(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.headline.as_deref())
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    /// Public profile URL, the key under which evaluations are persisted.
    pub fn profile_url(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.linkedin_url.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileHeader {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub connections: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub followers: Option<u64>,
    pub linkedin_url: Option<String>,
    /// Exports carry either a flag or the banner image URL.
    #[serde(deserialize_with = "lenient_flag")]
    pub banner: Option<bool>,
    #[serde(rename = "profilePic")]
    pub profile_pic: Option<ProfilePicture>,
    #[serde(rename = "openToWork")]
    pub open_to_work: Option<OpenToWork>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilePicture {
    #[serde(deserialize_with = "null_as_default")]
    pub present: bool,
    #[serde(rename = "isDefault", deserialize_with = "null_as_default")]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenToWork {
    #[serde(deserialize_with = "null_as_default")]
    pub present: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutSection {
    pub text: Option<String>,
}

/// One employer. Exports carry either a list of `roles` (promotions at the
/// same company) or a single `role`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub roles: Option<Vec<RoleEntry>>,
    pub role: Option<RoleEntry>,
}

impl ExperienceEntry {
    pub fn all_roles(&self) -> Vec<&RoleEntry> {
        match (&self.roles, &self.role) {
            (Some(roles), _) => roles.iter().collect(),
            (None, Some(role)) => vec![role],
            (None, None) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleEntry {
    pub title: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub skills_used: Option<TextOrList>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub college: Option<String>,
    pub study_type: Option<String>,
    pub field_of_study: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub grade: Option<String>,
    pub skills_used: Option<TextOrList>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub repo_link: Option<String>,
    pub blog_link: Option<String>,
    pub demo_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub endorsements: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateEntry {
    pub title: Option<String>,
    pub provider: Option<String>,
    pub issued_date: Option<String>,
    pub skills_used: Option<TextOrList>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolunteerEntry {
    pub organization: Option<String>,
    pub role: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestsSection {
    pub companies: Option<TextOrList>,
    pub groups: Option<TextOrList>,
    pub newsletters: Option<TextOrList>,
    pub schools: Option<TextOrList>,
    #[serde(rename = "topVoices")]
    pub top_voices: Option<TextOrList>,
}

impl InterestsSection {
    /// Interest categories in display order, paired with their export names.
    pub fn categories(&self) -> [(&'static str, Option<&TextOrList>); 5] {
        [
            ("companies", self.companies.as_ref()),
            ("groups", self.groups.as_ref()),
            ("newsletters", self.newsletters.as_ref()),
            ("schools", self.schools.as_ref()),
            ("topVoices", self.top_voices.as_ref()),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    pub language: Option<String>,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationsSection {
    #[serde(deserialize_with = "null_as_default")]
    pub received: Vec<Recommendation>,
    #[serde(deserialize_with = "null_as_default")]
    pub given: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    pub from: Option<String>,
    pub position: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitySection {
    #[serde(deserialize_with = "null_as_default")]
    pub posts: Vec<Value>,
}

/// Fields that exports emit either as a comma-joined string or as a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<Value>),
}

impl TextOrList {
    pub fn is_filled(&self) -> bool {
        match self {
            TextOrList::Text(text) => !text.trim().is_empty(),
            TextOrList::List(items) => !items.is_empty(),
        }
    }
}

/// Accepts `512`, `"512"`, `"500+"` or `"1,024"`; anything else reads as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

/// Reads a presence flag: booleans as given, a non-blank string (usually the
/// image URL) or a non-zero number as present, `null` as absent.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => Some(!s.trim().is_empty()),
        Some(Value::Number(n)) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Some(Value::Array(items)) => Some(!items.is_empty()),
        Some(Value::Object(fields)) => Some(!fields.is_empty()),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_a_valid_document() {
        let doc: ProfileDocument = serde_json::from_value(json!({})).unwrap();
        assert!(doc.profile.is_none());
        assert!(doc.experience.is_none());
        assert!(doc.headline().is_none());
    }

    #[test]
    fn test_counts_accept_numbers_and_scraped_strings() {
        let header: ProfileHeader = serde_json::from_value(json!({
            "connections": "500+",
            "followers": 1234
        }))
        .unwrap();
        assert_eq!(header.connections, Some(500));
        assert_eq!(header.followers, Some(1234));

        let header: ProfileHeader =
            serde_json::from_value(json!({ "connections": "n/a" })).unwrap();
        assert_eq!(header.connections, None);
    }

    #[test]
    fn test_skills_used_accepts_string_or_list() {
        let role: RoleEntry = serde_json::from_value(json!({ "skills_used": "Rust, SQL" })).unwrap();
        assert!(role.skills_used.unwrap().is_filled());

        let role: RoleEntry = serde_json::from_value(json!({ "skills_used": [] })).unwrap();
        assert!(!role.skills_used.unwrap().is_filled());
    }

    #[test]
    fn test_single_role_and_role_list_both_flatten() {
        let single: ExperienceEntry = serde_json::from_value(json!({
            "company": "Acme",
            "role": { "title": "Engineer" }
        }))
        .unwrap();
        assert_eq!(single.all_roles().len(), 1);

        let many: ExperienceEntry = serde_json::from_value(json!({
            "company": "Acme",
            "roles": [{ "title": "Engineer" }, { "title": "Senior Engineer" }]
        }))
        .unwrap();
        assert_eq!(many.all_roles().len(), 2);
    }

    #[test]
    fn test_profile_url_ignores_blank_values() {
        let doc: ProfileDocument = serde_json::from_value(json!({
            "profile": { "linkedin_url": "   " }
        }))
        .unwrap();
        assert!(doc.profile_url().is_none());
    }

    #[test]
    fn test_banner_accepts_flag_or_image_url() {
        let header: ProfileHeader = serde_json::from_value(json!({
            "banner": "https://media.licdn.com/banner.jpg"
        }))
        .unwrap();
        assert_eq!(header.banner, Some(true));

        let header: ProfileHeader = serde_json::from_value(json!({ "banner": "" })).unwrap();
        assert_eq!(header.banner, Some(false));

        let header: ProfileHeader = serde_json::from_value(json!({ "banner": false })).unwrap();
        assert_eq!(header.banner, Some(false));

        let header: ProfileHeader = serde_json::from_value(json!({ "banner": null })).unwrap();
        assert_eq!(header.banner, None);
    }

    #[test]
    fn test_null_lists_and_flags_read_as_empty() {
        let doc: ProfileDocument = serde_json::from_value(json!({
            "profile": {
                "profilePic": { "present": true, "isDefault": null },
                "openToWork": { "present": null, "roles": null }
            },
            "recommendations": { "received": null, "given": null },
            "activity": { "posts": null }
        }))
        .unwrap();

        let header = doc.profile.unwrap();
        let pic = header.profile_pic.unwrap();
        assert!(pic.present);
        assert!(!pic.is_default);
        let open_to_work = header.open_to_work.unwrap();
        assert!(!open_to_work.present);
        assert!(open_to_work.roles.is_empty());
        assert!(doc.recommendations.unwrap().received.is_empty());
        assert!(doc.activity.unwrap().posts.is_empty());
    }
}
