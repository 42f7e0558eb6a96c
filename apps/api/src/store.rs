//! Evaluation persistence — the collaborator that owns the
//! one-evaluation-per-user invariant. The engine itself is stateless;
//! everything durable lives behind the [`EvaluationStore`] trait.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evaluation::models::Evaluation;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("evaluation already exists for user {0}")]
    AlreadyEvaluated(String),

    #[error("no evaluation found for user {0}")]
    NotFound(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Profile lifecycle status. "submitted" is a transient UI label in the
/// current flow — submission and evaluation are one client-perceived action,
/// so profiles move from draft to evaluated directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Draft,
    Submitted,
    Evaluated,
}

/// Persistence seam for evaluations and profile status. Carried in
/// `AppState` as `Arc<dyn EvaluationStore>` so backends can be swapped
/// without touching handlers or the engine.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    /// Conditional write: rejects a second evaluation for the same user.
    /// This is where the at-most-one invariant (and double-submit
    /// protection) lives, not in the engine.
    async fn save(&self, user_id: &str, evaluation: &Evaluation) -> Result<(), StoreError>;

    async fn get(&self, user_id: &str) -> Result<Option<Evaluation>, StoreError>;

    async fn update_profile_status(
        &self,
        user_id: &str,
        status: ProfileStatus,
    ) -> Result<(), StoreError>;

    async fn profile_status(&self, user_id: &str) -> Result<Option<ProfileStatus>, StoreError>;
}

#[derive(Default)]
struct StoreInner {
    evaluations: HashMap<String, Evaluation>,
    statuses: HashMap<String, ProfileStatus>,
}

/// In-memory store backend.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreInner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EvaluationStore for InMemoryStore {
    async fn save(&self, user_id: &str, evaluation: &Evaluation) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        match inner.evaluations.entry(user_id.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyEvaluated(user_id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(evaluation.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, user_id: &str) -> Result<Option<Evaluation>, StoreError> {
        Ok(self.read()?.evaluations.get(user_id).cloned())
    }

    async fn update_profile_status(
        &self,
        user_id: &str,
        status: ProfileStatus,
    ) -> Result<(), StoreError> {
        self.write()?.statuses.insert(user_id.to_string(), status);
        Ok(())
    }

    async fn profile_status(&self, user_id: &str) -> Result<Option<ProfileStatus>, StoreError> {
        Ok(self.read()?.statuses.get(user_id).copied())
    }
}
