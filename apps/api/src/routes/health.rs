use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with a timestamp.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "SkillBridge evaluation API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
