use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::models::{Evaluation, EvaluationMode, ProfileInput};
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::{ProfileStatus, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    // Required fields arrive as Options so a missing value produces the
    // documented 400 body instead of a deserialization rejection.
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub mode: EvaluationMode,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub success: bool,
    pub evaluation: EvaluationBody,
}

/// Evaluation plus the model identifier, as the web client expects.
#[derive(Debug, Serialize)]
pub struct EvaluationBody {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub model: String,
}

/// POST /api/evaluate
///
/// When `userId` is supplied the evaluation is also persisted and the
/// profile status advanced to `evaluated`; a second evaluation for the same
/// user is a conflict.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let profile = ProfileInput::new(
        req.full_name.unwrap_or_default(),
        req.skills.unwrap_or_default(),
        req.experience,
        req.education,
        req.bio,
    )?;

    info!(name = %profile.full_name, mode = ?req.mode, "evaluating profile");
    let evaluation = state.engine.evaluate(&profile, req.mode).await?;

    if let Some(user_id) = req.user_id.as_deref() {
        state.store.save(user_id, &evaluation).await?;
        state
            .store
            .update_profile_status(user_id, ProfileStatus::Evaluated)
            .await?;
    }

    info!(
        score = evaluation.readiness_score,
        eligibility = evaluation.eligibility.as_str(),
        "evaluation complete"
    );

    Ok(Json(EvaluateResponse {
        success: true,
        evaluation: EvaluationBody {
            model: state.engine.model().to_string(),
            evaluation,
        },
    }))
}

/// GET /api/evaluation/:user_id
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Evaluation>, AppError> {
    let evaluation = state
        .store
        .get(&user_id)
        .await?
        .ok_or(StoreError::NotFound(user_id))?;
    Ok(Json(evaluation))
}
