//! Evaluation engine — turns a validated profile into a structured,
//! bounded evaluation via either the generative path (prompt → gateway →
//! validator) or the deterministic heuristic path.
//!
//! The engine is stateless and reentrant: a pure function of its input plus
//! the current time, safe to call concurrently and repeatedly for the same
//! profile. It never swallows a failure into a default evaluation.

pub mod handlers;
pub mod heuristic;
pub mod models;
pub mod prompts;
pub mod validator;

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::ModelGateway;
use self::models::{
    Eligibility, Evaluation, EvaluationDraft, EvaluationMode, EvaluationSource, ProfileInput,
};

pub struct EvaluationEngine {
    gateway: Arc<dyn ModelGateway>,
}

impl EvaluationEngine {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Model identifier reported to API clients alongside each evaluation.
    pub fn model(&self) -> &str {
        self.gateway.model()
    }

    /// Evaluates a profile in the caller-selected mode. The modes are
    /// explicit alternatives: a generative failure surfaces as an error
    /// rather than silently falling back to the heuristic path.
    pub async fn evaluate(
        &self,
        profile: &ProfileInput,
        mode: EvaluationMode,
    ) -> Result<Evaluation, AppError> {
        self.evaluate_with_rng(profile, mode, &mut StdRng::from_entropy())
            .await
    }

    /// Same as [`evaluate`](Self::evaluate) with an injected randomness
    /// source, so tests can assert deterministic filler padding.
    pub async fn evaluate_with_rng<R: Rng + Send>(
        &self,
        profile: &ProfileInput,
        mode: EvaluationMode,
        rng: &mut R,
    ) -> Result<Evaluation, AppError> {
        let draft = match mode {
            EvaluationMode::Generative => {
                let prompt = prompts::build_prompt(profile);
                let raw = self.gateway.invoke(&prompt).await?;
                validator::parse_evaluation(&raw)?
            }
            EvaluationMode::Heuristic => heuristic::score(profile, rng),
        };

        let source = match mode {
            EvaluationMode::Generative => EvaluationSource::Generative,
            EvaluationMode::Heuristic => EvaluationSource::Heuristic,
        };

        Ok(finalize(draft, source))
    }
}

/// Post-processing applied to every draft regardless of source: clamp the
/// score into [0,100], reconcile eligibility only when absent, and stamp
/// the timestamp and source.
///
/// An upstream-supplied eligibility is trusted verbatim even when it
/// disagrees with the score-derived bucket; the inconsistency is logged
/// rather than silently corrected.
fn finalize(draft: EvaluationDraft, source: EvaluationSource) -> Evaluation {
    let score = draft.readiness_score.clamp(0, 100) as u8;
    let derived = Eligibility::from_score(score);

    let eligibility = match draft.eligibility {
        Some(supplied) => {
            if supplied != derived {
                warn!(
                    score,
                    supplied = supplied.as_str(),
                    derived = derived.as_str(),
                    "upstream eligibility disagrees with score-derived bucket; keeping upstream value"
                );
            }
            supplied
        }
        None => derived,
    };

    Evaluation {
        strengths: draft.strengths,
        weaknesses: draft.weaknesses,
        suggestions: draft.suggestions,
        readiness_score: score,
        eligibility,
        evaluated_at: Utc::now(),
        source,
    }
}
