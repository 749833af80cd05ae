use crate::cycle::run_cycle;
use crate::server::ReportState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use std::sync::Arc;

/// `GET /api/slowest` — run one cycle, answer with the display fields plus
/// the log line and the entry as written.
pub async fn slowest(State(state): State<Arc<ReportState>>) -> (StatusCode, Json<Value>) {
    match run_cycle(state.source.as_ref(), &state.log).await {
        Ok(outcome) => {
            let mut body = json!(outcome.report.display);
            body["log_line"] = json!(outcome.report.log_line);
            body["entry"] = json!(outcome.entry);
            (StatusCode::OK, Json(body))
        }
        Err(e) => {
            let status = e.status_code();
            (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                Json(json!({
                    "error": e.to_string(),
                    "kind": e.kind(),
                    "status": status,
                })),
            )
        }
    }
}
