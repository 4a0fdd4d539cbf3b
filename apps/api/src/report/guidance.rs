//! Static guidance shown next to every section score.

use std::collections::HashMap;

use crate::models::report::ReviewItem;
use crate::scoring::SectionKey;

/// When a max-score section swaps its review for a congratulatory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerfectReview {
    Never,
    Always,
    /// Only if the evaluator left no review items behind.
    WhenReviewEmpty,
}

#[derive(Debug, Clone)]
pub struct SectionGuidance {
    pub title: String,
    pub description: String,
    pub bonus_tips: Vec<String>,
    pub additional_info: Vec<String>,
    pub perfect_review: PerfectReview,
    pub perfect_item: Option<ReviewItem>,
}

impl SectionGuidance {
    fn new(title: &str, description: &str, bonus_tips: &[&str], additional_info: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            bonus_tips: bonus_tips.iter().map(|s| s.to_string()).collect(),
            additional_info: additional_info.iter().map(|s| s.to_string()).collect(),
            perfect_review: PerfectReview::Never,
            perfect_item: None,
        }
    }

    fn perfect(mut self, policy: PerfectReview, check_type: &str, message: &str) -> Self {
        self.perfect_review = policy;
        self.perfect_item = Some(ReviewItem::passed(check_type, message));
        self
    }

    /// The review to display for a section that scored `raw` out of `max`.
    pub fn review_for(&self, raw: f64, max: f64, review: Vec<ReviewItem>) -> Vec<ReviewItem> {
        let Some(item) = &self.perfect_item else {
            return review;
        };
        if raw < max {
            return review;
        }
        match self.perfect_review {
            PerfectReview::Always => vec![item.clone()],
            PerfectReview::WhenReviewEmpty if review.is_empty() => vec![item.clone()],
            _ => review,
        }
    }
}

/// Immutable section → guidance table, injected into the formatter.
#[derive(Debug, Clone)]
pub struct GuidanceCatalog {
    sections: HashMap<SectionKey, SectionGuidance>,
}

impl GuidanceCatalog {
    pub fn get(&self, section: SectionKey) -> Option<&SectionGuidance> {
        self.sections.get(&section)
    }
}

impl Default for GuidanceCatalog {
    fn default() -> Self {
        use PerfectReview::{Always, WhenReviewEmpty};

        let sections = HashMap::from([
            (
                SectionKey::ProfileContent,
                SectionGuidance::new(
                    "Profile Content",
                    "Key elements of your LinkedIn profile to ensure a strong first impression",
                    &["Add more professionals and peers to your network in order to gain more visibility"],
                    &[
                        "Recruiters use search filters that rely on data points like your location, 'Open to Work' status, and job titles to narrow down candidate pools",
                        "An incomplete profile content section often leaves you invisible in these searches, no matter how qualified you are",
                    ],
                ),
            ),
            (
                SectionKey::ProfilePic,
                SectionGuidance::new(
                    "Profile Picture",
                    "Key elements of your LinkedIn profile to ensure a strong first impression",
                    &["Smile and make eye contact with the camera for a more approachable look"],
                    &[
                        "A professional photo can help your profile stand out and reinforce your personal brand",
                        "LinkedIn profiles with professional photos are 14 times more likely to be viewed",
                    ],
                )
                .perfect(Always, "Profile Picture", "Profile picture is present. Make sure it shows a friendly, professional look"),
            ),
            (
                SectionKey::Banner,
                SectionGuidance::new(
                    "Banner",
                    "Showcase your personality and brand",
                    &["Use a tool like Canva to create a professional-looking banner"],
                    &[
                        "A custom banner image can increase profile views by up to 11%",
                        "Your banner image is an opportunity to showcase your personality or professional achievements",
                    ],
                )
                .perfect(Always, "Banner", "Banner is present. Use it to promote your brand or what you stand for"),
            ),
            (
                SectionKey::Headline,
                SectionGuidance::new(
                    "Headline",
                    "The headline communicates your target role and strengths, which drives clarity and searchability",
                    &[
                        "Use industry-specific keywords that recruiters search for",
                        "Include your current role or target position clearly",
                        "Add relevant certifications or credentials",
                        "Keep it in the range of 70 - 150 characters for optimal display",
                        "Use symbols like | or • to separate different elements",
                    ],
                    &[
                        "Your headline appears in search results and is the first thing people see",
                        "A strong headline can increase your profile views by up to 40%",
                        "Include 2-3 key skills that are relevant to your target role",
                        "Avoid generic terms like 'Professional' or 'Experienced'",
                        "Use action words to make your headline more dynamic",
                        "Test different versions to see which performs better",
                    ],
                ),
            ),
            (
                SectionKey::About,
                SectionGuidance::new(
                    "About",
                    "Your About section is a quick introduction: who you are, what you're good at, and what you're looking for, in your own words",
                    &["Use your 'About' section to tell a compelling story about your career"],
                    &["A strong 'About' section can engage recruiters and encourage them to reach out"],
                ),
            ),
            (
                SectionKey::Experience,
                SectionGuidance::new(
                    "Experience",
                    "Detailed descriptions of your professional roles and accomplishments",
                    &["Use numbers and quantifiable results to highlight your achievements"],
                    &["Detailed experience sections with skills and descriptions increase your chances of appearing in relevant job searches"],
                )
                .perfect(Always, "Experience", "Everything is in place. Great job on your experience section"),
            ),
            (
                SectionKey::Education,
                SectionGuidance::new(
                    "Education",
                    "Detailed descriptions of your educational background",
                    &["Include any special achievements or honors in your education section"],
                    &["Detailed education sections make your profile more compelling to employers"],
                )
                .perfect(Always, "Education", "Everything is in place. Great job on your education section"),
            ),
            (
                SectionKey::Projects,
                SectionGuidance::new(
                    "Projects",
                    "Detailed descriptions of your projects",
                    &["Make sure each project is linked to your relevant experience"],
                    &["Projects can showcase your hands-on experience and abilities"],
                )
                .perfect(Always, "Projects", "Your projects are well documented"),
            ),
            (
                SectionKey::Skills,
                SectionGuidance::new(
                    "Skills",
                    "Highlight your top skills and competencies",
                    &["Endorsements from colleagues and connections can boost your skills' visibility"],
                    &["Profiles with more skills often appear in more searches"],
                )
                .perfect(Always, "Skills", "You have a very good skill set. Keep upskilling"),
            ),
            (
                SectionKey::Certificates,
                SectionGuidance::new(
                    "Certifications",
                    "Highlight your certifications and credentials",
                    &["Certifications demonstrate your commitment to professional development"],
                    &["Profiles with certifications appear more credible and capable"],
                )
                .perfect(WhenReviewEmpty, "Certifications", "All required certification fields are present"),
            ),
            (
                SectionKey::Volunteering,
                SectionGuidance::new(
                    "Volunteer",
                    "Demonstrate your commitment to causes and communities",
                    &["Volunteering experience can help strengthen your profile if relevant to your career"],
                    &["Volunteer work can demonstrate your values and transferable skills"],
                )
                .perfect(WhenReviewEmpty, "Volunteering", "Everything is in place. Great job"),
            ),
            (
                SectionKey::Interests,
                SectionGuidance::new(
                    "Interests",
                    "Demonstrate your engagement and passions beyond work",
                    &["Include a mix of professional, personal, and industry-specific interests"],
                    &["Interests show your engagement and passions beyond work"],
                )
                .perfect(WhenReviewEmpty, "Interests", "Everything looks good"),
            ),
            (
                SectionKey::Languages,
                SectionGuidance::new(
                    "Languages",
                    "Demonstrate your language proficiency",
                    &["Fluency in multiple languages can make you more attractive to global employers"],
                    &["Multilingual profiles often stand out in global job markets"],
                )
                .perfect(WhenReviewEmpty, "Languages", "All languages list a proficiency"),
            ),
            (
                SectionKey::LinkedinUrl,
                SectionGuidance::new(
                    "LinkedIn URL",
                    "Ensure your LinkedIn URL is customized and professional",
                    &["Customize your LinkedIn URL to make it more professional (e.g., linkedin.com/in/yourname)"],
                    &[
                        "A custom LinkedIn URL is easier to share and remember",
                        "Your LinkedIn URL is an opportunity to reinforce your personal brand",
                    ],
                )
                .perfect(Always, "LinkedIn URL", "You have a customized LinkedIn URL"),
            ),
            (
                SectionKey::Recommendations,
                SectionGuidance::new(
                    "Recommendations",
                    "Showcase your professional engagement and industry connections",
                    &["A single detailed recommendation from a senior leader often holds more weight than multiple generic ones from peers."],
                    &[
                        "Recommendations that specifically mention projects, results, and soft skills provide concrete proof of your abilities.",
                        "Request recommendations from managers, clients, or senior colleagues right after completing a significant project while your contribution is fresh in their mind.",
                    ],
                )
                .perfect(WhenReviewEmpty, "Recommendations", "Everything is in place"),
            ),
            (
                SectionKey::Activity,
                SectionGuidance::new(
                    "Activity",
                    "Showcase your professional engagement and industry connections",
                    &["Share relevant content regularly to keep your profile active"],
                    &["Regular content sharing can help you stay top of mind with recruiters and potential employers"],
                )
                .perfect(WhenReviewEmpty, "Activity", "You post regularly and stay active on LinkedIn. Keep it up"),
            ),
        ]);

        Self { sections }
    }
}
