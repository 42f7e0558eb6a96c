//! Prompt construction for the generative evaluation path.
//!
//! The template is fixed: persona, the four profile fields verbatim, the
//! exact output schema, and the four evaluation dimensions. Nothing in it
//! varies per call except the substituted profile fields.

use super::models::{ProfileInput, NOT_PROVIDED};

/// Evaluation prompt template. Replace `{full_name}`, `{skills}`,
/// `{experience}`, `{education}`, `{bio}` before sending.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are an expert recruiter and career coach evaluating a student's profile for a tech position.

STUDENT PROFILE:
- Name: {full_name}
- Skills: {skills}
- Experience: {experience}
- Education: {education}
- Bio: {bio}

Based on this profile, provide evaluation in JSON format with these EXACT fields:
{
  "strengths": ["strength 1", "strength 2", "strength 3"],
  "weaknesses": ["weakness 1", "weakness 2"],
  "suggestions": ["suggestion 1", "suggestion 2", "suggestion 3"],
  "readinessScore": 75,
  "eligibility": "Eligible"
}

IMPORTANT:
- readinessScore: integer 0-100
- eligibility: must be exactly one of: "Eligible", "Needs Improvement", "Not Ready"
- Return ONLY valid JSON, no extra text

Evaluation based on:
- Technical skills level
- Experience relevance
- Overall readiness for positions
- Growth potential"#;

/// Renders the evaluation prompt for a profile. Deterministic and pure:
/// the same profile always produces the same prompt. Absent optional fields
/// render as the "Not provided" sentinel.
pub fn build_prompt(profile: &ProfileInput) -> String {
    EVALUATION_PROMPT_TEMPLATE
        .replace("{full_name}", &profile.full_name)
        .replace("{skills}", &profile.skills)
        .replace(
            "{experience}",
            profile.experience.as_deref().unwrap_or(NOT_PROVIDED),
        )
        .replace(
            "{education}",
            profile.education.as_deref().unwrap_or(NOT_PROVIDED),
        )
        .replace("{bio}", profile.bio.as_deref().unwrap_or(NOT_PROVIDED))
}
