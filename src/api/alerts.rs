use axum::{ extract::{ Path, State }, Json };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::db::{ decimal_to_f64, entity::{ alert_history, plan_tracking } };
use crate::error::{ AppError, Result };
use crate::plans::{ Plan, UsageTier };
use crate::services::tracking_service::CreateTrackingRequest;

use super::AppState;

#[derive(Deserialize)]
pub struct CreateAlertRequest {
    pub user_id: String,
    /// The canonical plan as returned by search; a durable copy is stored on
    /// first tracking.
    pub plan: Plan,
    /// Falls back to the profile's universal defaults when omitted.
    #[serde(default)]
    pub kwh_usage: Option<String>,
    #[serde(default)]
    pub price_threshold: Option<f64>,
}

#[derive(Serialize)]
pub struct AlertResponse {
    pub id: Uuid,
    pub user_id: String,
    pub plan_id: Uuid,
    pub kwh_usage: String,
    pub price_threshold: Option<f64>,
    pub active: bool,
    pub created_at: String,
}

impl From<plan_tracking::Model> for AlertResponse {
    fn from(tracking: plan_tracking::Model) -> Self {
        Self {
            id: tracking.id,
            user_id: tracking.user_id,
            plan_id: tracking.plan_id,
            kwh_usage: tracking.kwh_usage,
            price_threshold: decimal_to_f64(tracking.price_threshold),
            active: tracking.active,
            created_at: tracking.created_at.to_rfc3339(),
        }
    }
}

pub async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateAlertRequest>
) -> Result<Json<AlertResponse>> {
    // Resolve missing parameters from the profile's universal defaults.
    let (kwh_usage, price_threshold) = match (request.kwh_usage, request.price_threshold) {
        (Some(usage), Some(threshold)) => (usage, threshold),
        (usage, threshold) => {
            let profile = state.profile_service.get_profile(&request.user_id).await?;
            let usage = usage.unwrap_or(profile.universal_kwh_usage);
            let threshold = match threshold {
                Some(t) => t,
                None =>
                    profile.universal_price_threshold
                        .and_then(decimal_to_f64)
                        .ok_or_else(|| {
                            AppError::InvalidInput(
                                "No price threshold given and no universal default set".to_string()
                            )
                        })?,
            };
            (usage, threshold)
        }
    };

    let tier = kwh_usage.parse::<UsageTier>()?;

    if price_threshold <= 0.0 {
        return Err(AppError::InvalidInput("Price threshold must be positive".to_string()));
    }

    let tracking = state.tracking_service.create_tracking(CreateTrackingRequest {
        user_id: request.user_id,
        plan: request.plan,
        kwh_usage: tier,
        price_threshold,
    }).await?;

    Ok(Json(tracking.into()))
}

pub async fn list_alerts(
    State(state): State<AppState>,
    Path(user_id): Path<String>
) -> Result<Json<Vec<AlertResponse>>> {
    let trackings = state.tracking_service.list_trackings(&user_id).await?;
    Ok(Json(trackings.into_iter().map(AlertResponse::from).collect()))
}

pub async fn delete_alert(
    State(state): State<AppState>,
    Path((user_id, alert_id)): Path<(String, Uuid)>
) -> Result<Json<serde_json::Value>> {
    state.tracking_service.delete_tracking(&user_id, alert_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Serialize)]
pub struct AlertHistoryResponse {
    pub id: Uuid,
    pub zip_code: String,
    pub kwh_usage: String,
    pub price_threshold: Option<f64>,
    pub plans: serde_json::Value,
    pub created_at: String,
}

impl From<alert_history::Model> for AlertHistoryResponse {
    fn from(entry: alert_history::Model) -> Self {
        Self {
            id: entry.id,
            zip_code: entry.zip_code,
            kwh_usage: entry.kwh_usage,
            price_threshold: decimal_to_f64(entry.price_threshold),
            plans: entry.plans,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

pub async fn alert_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>
) -> Result<Json<Vec<AlertHistoryResponse>>> {
    let entries = state.tracking_service.alert_history(&user_id).await?;
    Ok(Json(entries.into_iter().map(AlertHistoryResponse::from).collect()))
}
