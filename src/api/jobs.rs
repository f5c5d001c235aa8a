use axum::{ extract::State, http::StatusCode, response::IntoResponse, Json };
use serde::Deserialize;

use crate::error::{ AppError, Result };

use super::AppState;

/// Scheduled price-alert evaluation pass, for external schedulers. The same
/// pass also runs on the in-process interval.
pub async fn check_alerts(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    state.alert_checker.check_alerts().await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Retention sweep endpoint. Failure reports 400 with `{ "error": ... }`.
pub async fn sweep_alerts(State(state): State<AppState>) -> impl IntoResponse {
    match state.alert_checker.sweep().await {
        Ok(count) => {
            let message = format!("Deactivated {} stale alerts", count);
            (StatusCode::OK, Json(serde_json::json!({ "message": message })))
        }
        Err(e) => {
            tracing::error!(code = e.code(), "retention sweep failed: {}", e);
            (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}

#[derive(Deserialize)]
pub struct BugReportRequest {
    pub description: String,
}

pub async fn bug_report(
    State(state): State<AppState>,
    Json(request): Json<BugReportRequest>
) -> Result<Json<serde_json::Value>> {
    let description = request.description.trim();
    if description.is_empty() {
        return Err(AppError::InvalidInput("Bug description cannot be empty".to_string()));
    }

    let body = format!("A user submitted a bug report:\n\n{}", description);
    state.mailer.send(&state.bug_report_email, "Bug report", &body).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}
