use axum::{ extract::{ Path, State }, Json };
use serde::{ Deserialize, Serialize };

use crate::db::{ decimal_to_f64, entity::user_profile };
use crate::error::Result;
use crate::services::profile_service::SaveProfileRequest;

use super::AppState;

#[derive(Deserialize)]
pub struct SaveProfileBody {
    pub zip_code: String,
    pub current_kwh_usage: String,
    #[serde(default)]
    pub renewable_preference: bool,
    pub universal_kwh_usage: String,
    #[serde(default)]
    pub universal_price_threshold: Option<f64>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub zip_code: String,
    pub current_kwh_usage: String,
    pub renewable_preference: bool,
    pub universal_kwh_usage: String,
    pub universal_price_threshold: Option<f64>,
}

impl From<user_profile::Model> for ProfileResponse {
    fn from(profile: user_profile::Model) -> Self {
        Self {
            user_id: profile.user_id,
            zip_code: profile.zip_code,
            current_kwh_usage: profile.current_kwh_usage,
            renewable_preference: profile.renewable_preference,
            universal_kwh_usage: profile.universal_kwh_usage,
            universal_price_threshold: profile.universal_price_threshold.and_then(decimal_to_f64),
        }
    }
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>
) -> Result<Json<ProfileResponse>> {
    let profile = state.profile_service.get_profile(&user_id).await?;
    Ok(Json(profile.into()))
}

pub async fn save_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<SaveProfileBody>
) -> Result<Json<ProfileResponse>> {
    let request = SaveProfileRequest {
        zip_code: body.zip_code,
        current_kwh_usage: body.current_kwh_usage,
        renewable_preference: body.renewable_preference,
        universal_kwh_usage: body.universal_kwh_usage,
        universal_price_threshold: body.universal_price_threshold,
    };

    let profile = state.profile_service.save_profile(&user_id, request).await?;
    Ok(Json(profile.into()))
}
