//! Response validation for the generative path.
//!
//! This is the highest-risk seam in the service: it consumes untrusted,
//! free-form text from a non-deterministic backend and must never let a
//! malformed payload through as a valid evaluation. Every failure here is
//! `AppError::MalformedResponse` — non-retryable for the same prompt.

use serde_json::{Map, Value};

use super::models::{Eligibility, EvaluationDraft};
use crate::errors::AppError;

/// Extracts and validates an evaluation from raw model output. The backend
/// may wrap the JSON object in explanatory prose; only the first balanced
/// `{...}` span is considered. Unexpected extra keys are dropped.
pub fn parse_evaluation(raw: &str) -> Result<EvaluationDraft, AppError> {
    let span = extract_json_object(raw).ok_or_else(|| {
        AppError::MalformedResponse("no JSON object found in model output".to_string())
    })?;

    let value: Value = serde_json::from_str(span)
        .map_err(|e| AppError::MalformedResponse(format!("model output is not valid JSON: {e}")))?;
    let object = value.as_object().ok_or_else(|| {
        AppError::MalformedResponse("model output is not a JSON object".to_string())
    })?;

    let strengths = require_string_list(object, "strengths")?;
    let weaknesses = require_string_list(object, "weaknesses")?;
    let suggestions = require_string_list(object, "suggestions")?;

    // Presence and number-ness are distinct checks: a present `0` is valid,
    // an absent field is not.
    let score = object
        .get("readinessScore")
        .ok_or_else(|| missing_field("readinessScore"))?
        .as_f64()
        .ok_or_else(|| {
            AppError::MalformedResponse("`readinessScore` must be a number".to_string())
        })?;

    let label = object
        .get("eligibility")
        .ok_or_else(|| missing_field("eligibility"))?
        .as_str()
        .ok_or_else(|| {
            AppError::MalformedResponse("`eligibility` must be a string".to_string())
        })?;
    let eligibility = Eligibility::from_label(label).ok_or_else(|| {
        AppError::MalformedResponse(format!(
            "`eligibility` must be one of \"Eligible\", \"Needs Improvement\", \"Not Ready\"; got \"{label}\""
        ))
    })?;

    Ok(EvaluationDraft {
        strengths,
        weaknesses,
        suggestions,
        readiness_score: score.round() as i32,
        eligibility: Some(eligibility),
    })
}

/// Finds the first balanced `{...}` span, tracking string and escape state
/// so braces inside JSON strings don't terminate the scan early.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn require_string_list(object: &Map<String, Value>, key: &str) -> Result<Vec<String>, AppError> {
    let items = object
        .get(key)
        .ok_or_else(|| missing_field(key))?
        .as_array()
        .ok_or_else(|| AppError::MalformedResponse(format!("`{key}` must be an array")))?;

    if items.is_empty() {
        return Err(AppError::MalformedResponse(format!(
            "`{key}` must not be empty"
        )));
    }

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AppError::MalformedResponse(format!("`{key}` must contain only strings"))
            })
        })
        .collect()
}

fn missing_field(key: &str) -> AppError {
    AppError::MalformedResponse(format!("missing field `{key}`"))
}
