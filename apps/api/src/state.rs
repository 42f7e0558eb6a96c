use std::sync::Arc;

use crate::evaluation::EvaluationEngine;
use crate::store::EvaluationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<EvaluationEngine>,
    /// Pluggable persistence collaborator. Default: `InMemoryStore`.
    pub store: Arc<dyn EvaluationStore>,
}
