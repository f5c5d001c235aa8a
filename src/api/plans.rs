use axum::{ extract::State, Json };
use serde::Deserialize;

use crate::error::{ AppError, Result };
use crate::plans::{ filter, FilterCriteria, Plan };

use super::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub zip_code: String,
    #[serde(default)]
    pub estimated_use: Option<String>,
    /// Optional server-side application of the filter/sort pipeline.
    #[serde(default)]
    pub criteria: Option<FilterCriteria>,
}

pub async fn search_plans(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>
) -> Result<Json<Vec<Plan>>> {
    let zip = request.zip_code.trim();
    if zip.len() != 5 || !zip.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidInput("ZIP code must be 5 digits".to_string()));
    }

    let plans = state.search_service.search(zip, request.estimated_use.as_deref()).await?;

    let plans = match &request.criteria {
        Some(criteria) => filter::apply(plans, criteria),
        None => plans,
    };

    Ok(Json(plans))
}
