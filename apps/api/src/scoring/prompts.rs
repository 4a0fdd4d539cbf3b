// Prompt templates for generation-assisted evaluators.
// Placeholders are `{name}` and are filled with `str::replace` before sending;
// literal braces in the JSON examples are left untouched.

use crate::llm_client::prompts::system_with_json_rule;

// ────────────────────────────────────────────────────────────────────────────
// Headline
// ────────────────────────────────────────────────────────────────────────────

pub const HEADLINE_SYSTEM: &str = "\
You are an expert LinkedIn profile reviewer and career coach with extensive experience in professional branding and recruitment. \
Your expertise includes understanding LinkedIn's algorithm, recruiter search patterns, and headline optimization best practices. \
You analyze headlines for effectiveness, clarity, and recruiter appeal following industry standards.";

/// Replace `{headline}` before sending.
pub const HEADLINE_PROMPT_TEMPLATE: &str = r#"## LinkedIn Headline to Analyze:
"{headline}"

## Evaluation Criteria:

**1. Professional Identity**
- Must include current role/profession or target role
- Should be specific, not generic (e.g., "Software Engineer" not "Professional")

**2. Skills Integration**
- Includes 1 or 2 primary, relevant skills that recruiters search for

**3. Searchability & Keywords**
- Contains industry keywords recruiters search for
- Avoids meaningless buzzwords

**4. Formatting & Structure**
- Uses clear separators (such as "|", "•", "," or "-") between distinct sections
- Consistent, professional formatting (e.g., "Role | Certification | Skill | Education | Organization")

## Required JSON Output Format:
{
  "overall_suggestion": "Comprehensive improvement advice for the entire headline",
  "checks": [
    {"check_type": "Professional Identity", "criteria_meet": true, "remark": "Why this criterion is or is not met"},
    {"check_type": "Skills Integration", "criteria_meet": false, "remark": "Why this criterion is or is not met"},
    {"check_type": "Searchability & Keywords", "criteria_meet": true, "remark": "Why this criterion is or is not met"},
    {"check_type": "Formatting & Structure", "criteria_meet": true, "remark": "Why this criterion is or is not met"}
  ]
}"#;

pub fn headline(headline: &str) -> (String, String) {
    (
        system_with_json_rule(HEADLINE_SYSTEM),
        HEADLINE_PROMPT_TEMPLATE.replace("{headline}", headline),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// About
// ────────────────────────────────────────────────────────────────────────────

pub const ABOUT_SYSTEM: &str = "\
You are an expert LinkedIn profile reviewer and career coach specializing in professional storytelling and About section optimization. \
You analyze About sections for engagement, professionalism, and search visibility following industry standards.";

/// Replace `{about}` before sending.
pub const ABOUT_PROMPT_TEMPLATE: &str = r#"## LinkedIn About Section to Analyze:
"{about}"

## Evaluation Criteria:

**1. Professional Career Story**
- Clear explanation of who the person is, their roles, and industries
- Demonstrates career progression and focus

**2. Skills and Strengths**
- Mentions specific technical or soft skills relevant to the headline and searchable by recruiters

**3. Achievements and Impact**
- Mark as met if ANY achievement, result, impact, or accomplishment is mentioned. Judge presence, not strength.

**4. Human Touch**
- Includes any line showing passion, motivation, or personal qualities (adaptability, collaboration, continuous learning)

**5. Call to Action**
- Mark as met if there is ANY invitation to connect, collaborate, discuss, share ideas, or explore opportunities
  ("feel free to", "open to", "reach out", and similar). Judge presence, not strength.

## Required JSON Output Format:
{
  "overall_suggestion": "Comprehensive improvement advice for the entire about section",
  "checks": [
    {"check_type": "Professional Career Story", "criteria_meet": false, "remark": "Why this criterion is or is not met"},
    {"check_type": "Skills and Strengths", "criteria_meet": true, "remark": "Why this criterion is or is not met"},
    {"check_type": "Achievements and Impact", "criteria_meet": false, "remark": "Why this criterion is or is not met"},
    {"check_type": "Human Touch", "criteria_meet": true, "remark": "Why this criterion is or is not met"},
    {"check_type": "Call to Action", "criteria_meet": false, "remark": "Why this criterion is or is not met"}
  ]
}"#;

pub fn about(about: &str) -> (String, String) {
    (
        system_with_json_rule(ABOUT_SYSTEM),
        ABOUT_PROMPT_TEMPLATE.replace("{about}", about),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Experience description
// ────────────────────────────────────────────────────────────────────────────

pub const EXPERIENCE_SYSTEM: &str = "\
You are an expert LinkedIn profile reviewer specializing in work experience optimization. \
You evaluate experience descriptions for role clarity, demonstrated impact, and recruiter appeal.";

/// Replace `{role_title}`, `{company}`, then `{description}` before sending.
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"## Experience Description to Analyze:
Role: "{role_title}" at {company}
Description: "{description}"

## Evaluation Criteria:

**1. Role Clarity**
- Does the description clearly explain the person's role and responsibilities?
- Would a recruiter understand what this person actually did? Vague text like "responsible for various tasks" fails.

**2. Impact Demonstrated**
- Does it show measurable results, achievements, or problems solved?
- Does it include quantifiable metrics (numbers, percentages, scale)?

## Required JSON Output Format:
{
  "analysis": {
    "role_clarity": true,
    "impact_demonstrated": false,
    "remark": "What is good and what needs improvement in the description"
  }
}"#;

pub fn experience_description(role_title: &str, company: &str, description: &str) -> (String, String) {
    let prompt = EXPERIENCE_PROMPT_TEMPLATE
        .replace("{role_title}", role_title)
        .replace("{company}", company)
        .replace("{description}", description);
    (system_with_json_rule(EXPERIENCE_SYSTEM), prompt)
}

// ────────────────────────────────────────────────────────────────────────────
// Project description
// ────────────────────────────────────────────────────────────────────────────

pub const PROJECT_SYSTEM: &str = "\
You are a technical project evaluator. Analyze project descriptions for quality and provide improvement suggestions. \
Rate the description on a scale of 1-5 where: \
5 = clear technical details, specific technologies, measurable outcomes; \
4 = well-structured with good technical content; \
3 = basic description with some technical details; \
2 = vague or lacks technical specifics; \
1 = very basic or unclear.";

/// Replace `{title}`, then `{description}` before sending.
pub const PROJECT_PROMPT_TEMPLATE: &str = r#"Evaluate this project description:

Project Title: "{title}"
Description: "{description}"

Focus on technical details, technologies used, measurable outcomes, and clarity.

## Required JSON Output Format:
{
  "score": 3,
  "suggestion": "One or two lines of specific advice to improve the description"
}"#;

pub fn project_description(title: &str, description: &str) -> (String, String) {
    let prompt = PROJECT_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{description}", description);
    (system_with_json_rule(PROJECT_SYSTEM), prompt)
}

// ────────────────────────────────────────────────────────────────────────────
// Skills relevance
// ────────────────────────────────────────────────────────────────────────────

pub const SKILLS_SYSTEM: &str = "\
You are a career development expert specializing in LinkedIn profile optimization and industry trends. \
Analyze how well a candidate's skills align with their professional headline and suggest high-demand, \
relevant skills that recruiters actively search for.";

/// Replace `{headline}` and `{skills}` before sending.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Evaluate skills relevance for this LinkedIn profile:

Professional Headline: "{headline}"
Listed Skills: {skills}

Rate how well the current skills align with the headline (1 = poor alignment, 5 = excellent alignment)
and list 3-5 specific in-demand skills that should be added to better match the headline.

## Required JSON Output Format:
{
  "relevance_score": 4,
  "suggested_skills": ["Skill A", "Skill B", "Skill C"]
}"#;

pub fn skills_relevance(headline: &str, skills: &[&str]) -> (String, String) {
    let prompt = SKILLS_PROMPT_TEMPLATE
        .replace("{skills}", &skills.join(", "))
        .replace("{headline}", headline);
    (system_with_json_rule(SKILLS_SYSTEM), prompt)
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendation clarity
// ────────────────────────────────────────────────────────────────────────────

pub const RECOMMENDATIONS_SYSTEM: &str = "\
You are a LinkedIn profile optimization expert specializing in recommendation analysis. \
Evaluate the clarity, specificity, and impact of LinkedIn recommendations: are measurable results mentioned, \
and is the tone professional and credible? Provide actionable suggestions for improvement.";

/// Replace `{recommendations}` before sending.
pub const RECOMMENDATIONS_PROMPT_TEMPLATE: &str = r#"Analyze these LinkedIn recommendations for clarity and quality:

{recommendations}

Give 2-3 specific suggestions that would make the recommendations more specific, measurable, and impactful,
and a brief overall assessment ("Good", "Needs Improvement", "Excellent").

## Required JSON Output Format:
{
  "suggestions": ["First suggestion", "Second suggestion"],
  "overall_quality": "Needs Improvement"
}"#;

/// `entries` are `(from, position, text)` triples in received order.
pub fn recommendation_clarity(entries: &[(&str, &str, &str)]) -> (String, String) {
    let listing = entries
        .iter()
        .enumerate()
        .map(|(i, (from, position, text))| {
            format!("Recommendation {}:\nFrom: {from} ({position})\nText: {text}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    (
        system_with_json_rule(RECOMMENDATIONS_SYSTEM),
        RECOMMENDATIONS_PROMPT_TEMPLATE.replace("{recommendations}", &listing),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_prompt_embeds_text_and_keeps_schema() {
        let (system, prompt) = headline("Backend Engineer | Rust");
        assert!(system.contains("Return ONLY valid JSON"));
        assert!(prompt.contains("\"Backend Engineer | Rust\""));
        assert!(prompt.contains(r#""check_type": "Formatting & Structure""#));
        assert!(!prompt.contains("{headline}"));
    }

    #[test]
    fn test_experience_prompt_fills_every_placeholder() {
        let (_, prompt) = experience_description("Engineer", "Acme", "Built billing");
        assert!(prompt.contains("Role: \"Engineer\" at Acme"));
        assert!(prompt.contains("Description: \"Built billing\""));
        assert!(!prompt.contains("{company}"));
    }

    #[test]
    fn test_recommendation_prompt_numbers_entries() {
        let (_, prompt) = recommendation_clarity(&[("Ana", "CTO", "Great engineer")]);
        assert!(prompt.contains("Recommendation 1:\nFrom: Ana (CTO)\nText: Great engineer"));
    }
}
