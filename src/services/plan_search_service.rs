use std::time::Duration;

use chrono::Utc;
use sea_orm::{ ActiveModelTrait, ActiveValue, DatabaseConnection };
use uuid::Uuid;

use crate::db::{ entity::api_history, f64_to_decimal };
use crate::error::{ AppError, Result };
use crate::plans::{ normalize_plan, Plan };

/// Fetches raw plan records from the upstream listing API for a ZIP code and
/// normalizes them into canonical [`Plan`]s.
pub struct PlanSearchService {
    client: reqwest::Client,
    base_url: String,
    drop_invalid: bool,
    db: DatabaseConnection,
}

impl PlanSearchService {
    pub fn new(db: DatabaseConnection, base_url: String, drop_invalid: bool) -> Self {
        Self {
            client: reqwest::Client::builder().timeout(Duration::from_secs(10)).build().unwrap(),
            base_url,
            drop_invalid,
            db,
        }
    }

    /// One search request/response cycle: fetch, normalize, snapshot.
    ///
    /// `estimated_use` is accepted for interface parity but never sent
    /// upstream; the listing API returns all tiers regardless.
    pub async fn search(&self, zip_code: &str, _estimated_use: Option<&str>) -> Result<Vec<Plan>> {
        let raw = self.fetch_raw(zip_code).await?;

        if raw.is_empty() {
            return Err(AppError::NoPlansFound);
        }

        let mut plans = Vec::with_capacity(raw.len());
        for (index, record) in raw.iter().enumerate() {
            match normalize_plan(record) {
                Ok(plan) => plans.push(plan),
                Err(message) if self.drop_invalid => {
                    tracing::warn!(index, "dropping invalid upstream record: {}", message);
                }
                Err(message) => {
                    return Err(AppError::Validation { index, message });
                }
            }
        }

        if plans.is_empty() {
            return Err(AppError::NoPlansFound);
        }

        tracing::debug!(zip_code, count = plans.len(), "normalized upstream plans");

        // Snapshot failures must not fail the search.
        if let Err(e) = self.record_snapshots(&plans).await {
            tracing::warn!("failed to record price snapshots: {}", e);
        }

        Ok(plans)
    }

    async fn fetch_raw(&self, zip_code: &str) -> Result<Vec<serde_json::Value>> {
        let url = format!("{}/offers/getoffers?zip={}", self.base_url, zip_code);

        let response = self.client
            .get(&url)
            .send().await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(
                AppError::UpstreamUnavailable(
                    format!("listing API returned status: {}", response.status())
                )
            );
        }

        response
            .json().await
            .map_err(|e| AppError::UpstreamUnavailable(format!("unparseable response: {}", e)))
    }

    /// Append one api_history row per plan; this is the time-ordered snapshot
    /// source the alert evaluator prefers.
    async fn record_snapshots(&self, plans: &[Plan]) -> Result<()> {
        let now = Utc::now();

        for plan in plans {
            let snapshot = api_history::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                company_id: ActiveValue::Set(plan.company_id.clone()),
                plan_name: ActiveValue::Set(plan.plan_name.clone()),
                price_kwh500: ActiveValue::Set(f64_to_decimal(plan.price_kwh500)),
                price_kwh1000: ActiveValue::Set(f64_to_decimal(plan.price_kwh1000)),
                price_kwh2000: ActiveValue::Set(f64_to_decimal(plan.price_kwh2000)),
                created_at: ActiveValue::Set(now),
            };
            snapshot.insert(&self.db).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::plans::{ filter, normalize_plan, FilterCriteria };
    use serde_json::json;

    // The end-to-end normalization scenario for ZIP 75001: one record with a
    // quoted 1000 kWh price, one missing all rate fields.
    #[test]
    fn test_search_normalization_scenario() {
        let raw = vec![
            json!({
                "company_id": "176",
                "company_name": "Acme Energy",
                "plan_name": "Saver 12",
                "price_kwh1000": "9.5"
            }),
            json!({
                "company_id": "204",
                "company_name": "Lone Star Power",
                "plan_name": "Flex"
            })
        ];

        let plans: Vec<_> = raw
            .iter()
            .map(|r| normalize_plan(r).unwrap())
            .collect();

        assert_eq!(plans[0].price_kwh1000, 0.095);
        assert_eq!(plans[1].price_kwh1000, 0.0);

        let sorted = filter::apply(plans, &FilterCriteria::default());
        assert_eq!(sorted[0].plan_name, "Flex");
        assert_eq!(sorted[1].plan_name, "Saver 12");
    }
}
