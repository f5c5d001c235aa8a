use chrono::Utc;
use sea_orm::{ ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait };

use crate::db::{ entity::user_profile, f64_to_decimal };
use crate::error::{ AppError, Result };

#[derive(Clone)]
pub struct ProfileService {
    db: DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct SaveProfileRequest {
    pub zip_code: String,
    pub current_kwh_usage: String,
    pub renewable_preference: bool,
    pub universal_kwh_usage: String,
    pub universal_price_threshold: Option<f64>,
}

impl ProfileService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<user_profile::Model> {
        user_profile::Entity
            ::find_by_id(user_id)
            .one(&self.db).await?
            .ok_or_else(|| AppError::NotFound("Profile".to_string()))
    }

    /// Create the profile on first save, update it afterwards. Soft lifecycle
    /// only; there is no delete path.
    pub async fn save_profile(
        &self,
        user_id: &str,
        req: SaveProfileRequest
    ) -> Result<user_profile::Model> {
        let now = Utc::now();
        let threshold = req.universal_price_threshold.map(f64_to_decimal);

        let existing = user_profile::Entity::find_by_id(user_id).one(&self.db).await?;

        let profile = match existing {
            Some(profile) => {
                let mut active: user_profile::ActiveModel = profile.into();
                active.zip_code = ActiveValue::Set(req.zip_code);
                active.current_kwh_usage = ActiveValue::Set(req.current_kwh_usage);
                active.renewable_preference = ActiveValue::Set(req.renewable_preference);
                active.universal_kwh_usage = ActiveValue::Set(req.universal_kwh_usage);
                active.universal_price_threshold = ActiveValue::Set(threshold);
                active.updated_at = ActiveValue::Set(now);
                active.update(&self.db).await?
            }
            None => {
                let active = user_profile::ActiveModel {
                    user_id: ActiveValue::Set(user_id.to_string()),
                    zip_code: ActiveValue::Set(req.zip_code),
                    current_kwh_usage: ActiveValue::Set(req.current_kwh_usage),
                    renewable_preference: ActiveValue::Set(req.renewable_preference),
                    universal_kwh_usage: ActiveValue::Set(req.universal_kwh_usage),
                    universal_price_threshold: ActiveValue::Set(threshold),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                };
                active.insert(&self.db).await?
            }
        };

        Ok(profile)
    }
}
