use crate::cycle::run_cycle;
use crate::render::render_page;
use crate::server::ReportState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use std::sync::Arc;

/// `GET /` — run one cycle and render the page.
///
/// Failures still render a full page, with the error's status code.
pub async fn report_page(State(state): State<Arc<ReportState>>) -> (StatusCode, Html<String>) {
    let result = run_cycle(state.source.as_ref(), &state.log).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    };
    (status, Html(render_page(&result, &state.log_name())))
}
