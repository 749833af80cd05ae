use crate::server::ReportState;
use axum::extract::State;
use axum::response::Json;
use serde_json::{Value, json};
use std::sync::Arc;

pub async fn health_check(State(state): State<Arc<ReportState>>) -> Json<Value> {
    let log_path = state.log.path();
    let meta = std::fs::metadata(log_path).ok();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "source": state.source.describe(),
        "log": {
            "path": log_path.to_string_lossy(),
            "file_exists": meta.is_some(),
            "size_bytes": meta.as_ref().map(|m| m.len()),
        },
    }))
}
