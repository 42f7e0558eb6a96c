//! Core data model for the evaluation flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Sentinel rendered in place of absent optional profile fields.
/// Downstream code never sees a null — absent always becomes this string.
pub const NOT_PROVIDED: &str = "Not provided";

/// A validated evaluation request. `full_name` and `skills` are required;
/// everything else is optional and substituted with [`NOT_PROVIDED`] when
/// rendered into a prompt.
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub full_name: String,
    pub skills: String,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub bio: Option<String>,
}

impl ProfileInput {
    /// Validates and constructs a profile. Blank (after trim) `full_name` or
    /// `skills` is rejected, matching the HTTP contract's 400 message.
    pub fn new(
        full_name: String,
        skills: String,
        experience: Option<String>,
        education: Option<String>,
        bio: Option<String>,
    ) -> Result<Self, AppError> {
        if full_name.trim().is_empty() || skills.trim().is_empty() {
            return Err(AppError::Validation(
                "Missing required fields: fullName, skills".to_string(),
            ));
        }
        Ok(Self {
            full_name,
            skills,
            experience,
            education,
            bio,
        })
    }
}

/// Which evaluation path the caller selected. The two modes are explicit
/// alternatives — the engine never silently falls back from one to the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    #[default]
    Generative,
    Heuristic,
}

/// Three-way readiness classification, serialized with the exact literals
/// the model contract and the web client expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    Eligible,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    #[serde(rename = "Not Ready")]
    NotReady,
}

impl Eligibility {
    /// Score thresholds: ≥75 Eligible, ≥50 Needs Improvement, else Not Ready.
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            Eligibility::Eligible
        } else if score >= 50 {
            Eligibility::NeedsImprovement
        } else {
            Eligibility::NotReady
        }
    }

    /// Parses one of the three allowed literals. Anything else is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Eligible" => Some(Eligibility::Eligible),
            "Needs Improvement" => Some(Eligibility::NeedsImprovement),
            "Not Ready" => Some(Eligibility::NotReady),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "Eligible",
            Eligibility::NeedsImprovement => "Needs Improvement",
            Eligibility::NotReady => "Not Ready",
        }
    }
}

/// Which path produced an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationSource {
    Generative,
    Heuristic,
}

/// An evaluation as produced by a scorer or validator, before the engine's
/// post-processing pass. The score may still be out of range and eligibility
/// may be absent; `finalize` clamps, reconciles, and stamps.
#[derive(Debug, Clone)]
pub struct EvaluationDraft {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub readiness_score: i32,
    pub eligibility: Option<Eligibility>,
}

/// The final evaluation artifact returned to callers and persisted by the
/// store. Wire field names are camelCase to match the original API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub readiness_score: u8,
    pub eligibility: Eligibility,
    pub evaluated_at: DateTime<Utc>,
    pub source: EvaluationSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_requires_full_name() {
        let err = ProfileInput::new("  ".to_string(), "rust".to_string(), None, None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: fullName, skills"
        );
    }

    #[test]
    fn test_profile_requires_skills() {
        let err =
            ProfileInput::new("Ann".to_string(), "".to_string(), None, None, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_profile_accepts_minimal_input() {
        let profile =
            ProfileInput::new("Ann".to_string(), "rust".to_string(), None, None, None).unwrap();
        assert_eq!(profile.full_name, "Ann");
        assert!(profile.experience.is_none());
    }

    #[test]
    fn test_eligibility_thresholds() {
        assert_eq!(Eligibility::from_score(100), Eligibility::Eligible);
        assert_eq!(Eligibility::from_score(75), Eligibility::Eligible);
        assert_eq!(Eligibility::from_score(74), Eligibility::NeedsImprovement);
        assert_eq!(Eligibility::from_score(50), Eligibility::NeedsImprovement);
        assert_eq!(Eligibility::from_score(49), Eligibility::NotReady);
        assert_eq!(Eligibility::from_score(0), Eligibility::NotReady);
    }

    #[test]
    fn test_eligibility_serializes_exact_literals() {
        assert_eq!(
            serde_json::to_string(&Eligibility::NeedsImprovement).unwrap(),
            r#""Needs Improvement""#
        );
        assert_eq!(
            serde_json::to_string(&Eligibility::NotReady).unwrap(),
            r#""Not Ready""#
        );
    }

    #[test]
    fn test_eligibility_from_label_rejects_unknown() {
        assert_eq!(Eligibility::from_label("Eligible"), Some(Eligibility::Eligible));
        assert_eq!(Eligibility::from_label("eligible"), None);
        assert_eq!(Eligibility::from_label("Maybe"), None);
    }

    #[test]
    fn test_evaluation_mode_deserializes_lowercase() {
        let mode: EvaluationMode = serde_json::from_str(r#""heuristic""#).unwrap();
        assert_eq!(mode, EvaluationMode::Heuristic);
        assert_eq!(EvaluationMode::default(), EvaluationMode::Generative);
    }

    #[test]
    fn test_evaluation_wire_field_names_are_camel_case() {
        let evaluation = Evaluation {
            strengths: vec!["a".to_string()],
            weaknesses: vec!["b".to_string()],
            suggestions: vec!["c".to_string()],
            readiness_score: 82,
            eligibility: Eligibility::Eligible,
            evaluated_at: Utc::now(),
            source: EvaluationSource::Generative,
        };
        let json = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(json["readinessScore"], 82);
        assert!(json.get("evaluatedAt").is_some());
        assert_eq!(json["source"], "generative");
    }
}
