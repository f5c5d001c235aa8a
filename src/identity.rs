use std::time::Duration;

use crate::error::{ AppError, Result };

/// Resolves user emails through the managed auth provider's admin API.
/// Account/session semantics stay with the provider; the alert pipeline only
/// needs the address to notify.
pub struct IdentityService {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl IdentityService {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            client: reqwest::Client::builder().timeout(Duration::from_secs(10)).build().unwrap(),
            base_url,
            service_key,
        }
    }

    pub async fn email_for_user(&self, user_id: &str) -> Result<String> {
        let url = format!("{}/admin/users/{}", self.base_url, user_id);

        let response = self.client
            .get(&url)
            .bearer_auth(&self.service_key)
            .send().await
            .map_err(|e| AppError::Internal(format!("identity provider unreachable: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("User".to_string()));
        }

        if !response.status().is_success() {
            return Err(
                AppError::Internal(
                    format!("identity provider returned status: {}", response.status())
                )
            );
        }

        let user: serde_json::Value = response
            .json().await
            .map_err(|e| AppError::Internal(format!("unparseable identity response: {}", e)))?;

        user.get("email")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::NotFound("User email".to_string()))
    }
}
