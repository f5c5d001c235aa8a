use chrono::{ Duration, Utc };
use sea_orm::{
    ActiveModelTrait,
    ActiveValue,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::db::{
    decimal_to_f64,
    entity::{ alert_history, api_history, energy_plan, plan_tracking },
    f64_to_decimal,
};
use crate::error::{ AppError, Result };
use crate::plans::{ Plan, UsageTier };

#[derive(Clone)]
pub struct TrackingService {
    db: DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct CreateTrackingRequest {
    pub user_id: String,
    /// The canonical plan from the search results; a durable copy is made
    /// here because search-result plans are transient.
    pub plan: Plan,
    pub kwh_usage: UsageTier,
    pub price_threshold: f64,
}

impl TrackingService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a price alert. Reuses an existing alert row for the same
    /// user+plan (updating its threshold/usage and re-activating it) instead
    /// of inserting a duplicate.
    pub async fn create_tracking(
        &self,
        req: CreateTrackingRequest
    ) -> Result<plan_tracking::Model> {
        let now = Utc::now();
        let plan_row = self.ensure_plan(&req.plan).await?;

        let existing = plan_tracking::Entity
            ::find()
            .filter(plan_tracking::Column::UserId.eq(&req.user_id))
            .filter(plan_tracking::Column::PlanId.eq(plan_row.id))
            .one(&self.db).await?;

        let tracking = match existing {
            Some(tracking) => {
                let mut active: plan_tracking::ActiveModel = tracking.into();
                active.kwh_usage = ActiveValue::Set(req.kwh_usage.as_str().to_string());
                active.price_threshold = ActiveValue::Set(f64_to_decimal(req.price_threshold));
                active.active = ActiveValue::Set(true);
                active.updated_at = ActiveValue::Set(now);
                active.update(&self.db).await?
            }
            None => {
                let active = plan_tracking::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4()),
                    user_id: ActiveValue::Set(req.user_id),
                    plan_id: ActiveValue::Set(plan_row.id),
                    kwh_usage: ActiveValue::Set(req.kwh_usage.as_str().to_string()),
                    price_threshold: ActiveValue::Set(f64_to_decimal(req.price_threshold)),
                    active: ActiveValue::Set(true),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                };
                active.insert(&self.db).await?
            }
        };

        Ok(tracking)
    }

    /// List all alerts for a user
    pub async fn list_trackings(&self, user_id: &str) -> Result<Vec<plan_tracking::Model>> {
        let trackings = plan_tracking::Entity
            ::find()
            .filter(plan_tracking::Column::UserId.eq(user_id))
            .all(&self.db).await?;
        Ok(trackings)
    }

    /// Delete an alert
    pub async fn delete_tracking(&self, user_id: &str, id: Uuid) -> Result<()> {
        plan_tracking::Entity
            ::delete_many()
            .filter(plan_tracking::Column::Id.eq(id))
            .filter(plan_tracking::Column::UserId.eq(user_id))
            .exec(&self.db).await?;
        Ok(())
    }

    /// Get all active alerts
    pub async fn active_trackings(&self) -> Result<Vec<plan_tracking::Model>> {
        let trackings = plan_tracking::Entity
            ::find()
            .filter(plan_tracking::Column::Active.eq(true))
            .all(&self.db).await?;
        Ok(trackings)
    }

    pub async fn plan_by_id(&self, plan_id: Uuid) -> Result<energy_plan::Model> {
        energy_plan::Entity
            ::find_by_id(plan_id)
            .one(&self.db).await?
            .ok_or_else(|| AppError::NotFound("Plan".to_string()))
    }

    /// Resolve the freshest known price for a plan key at the given tier:
    /// latest api_history snapshot first, live energy_plans row as fallback,
    /// `None` when neither exists (the caller skips the alert this pass).
    pub async fn resolve_current_price(
        &self,
        company_id: &str,
        plan_name: &str,
        tier: UsageTier
    ) -> Result<Option<f64>> {
        let snapshot = api_history::Entity
            ::find()
            .filter(api_history::Column::CompanyId.eq(company_id))
            .filter(api_history::Column::PlanName.eq(plan_name))
            .order_by_desc(api_history::Column::CreatedAt)
            .one(&self.db).await?;

        if let Some(snapshot) = snapshot {
            let price = match tier {
                UsageTier::Kwh500 => snapshot.price_kwh500,
                UsageTier::Kwh1000 => snapshot.price_kwh1000,
                UsageTier::Kwh2000 => snapshot.price_kwh2000,
            };
            return Ok(decimal_to_f64(price));
        }

        let live = energy_plan::Entity
            ::find()
            .filter(energy_plan::Column::CompanyId.eq(company_id))
            .filter(energy_plan::Column::PlanName.eq(plan_name))
            .one(&self.db).await?;

        Ok(
            live.and_then(|plan| {
                let price = match tier {
                    UsageTier::Kwh500 => plan.price_kwh500,
                    UsageTier::Kwh1000 => plan.price_kwh1000,
                    UsageTier::Kwh2000 => plan.price_kwh2000,
                };
                decimal_to_f64(price)
            })
        )
    }

    /// Set an alert inactive. Called after a successful notification; never
    /// before, so a failed send leaves the alert eligible for the next pass.
    pub async fn deactivate(&self, id: Uuid) -> Result<()> {
        let tracking = plan_tracking::Entity::find_by_id(id).one(&self.db).await?;

        if let Some(tracking) = tracking {
            let mut active: plan_tracking::ActiveModel = tracking.into();
            active.active = ActiveValue::Set(false);
            active.updated_at = ActiveValue::Set(Utc::now());
            active.update(&self.db).await?;
        }

        Ok(())
    }

    /// Retention sweep: deactivate every alert older than `days`, regardless
    /// of trigger state. Returns the number of rows affected.
    pub async fn sweep_stale(&self, days: i64) -> Result<u64> {
        let cutoff = sweep_cutoff(Utc::now(), days);

        let result = plan_tracking::Entity
            ::update_many()
            .col_expr(plan_tracking::Column::Active, Expr::value(false))
            .filter(plan_tracking::Column::Active.eq(true))
            .filter(plan_tracking::Column::CreatedAt.lt(cutoff))
            .exec(&self.db).await?;

        Ok(result.rows_affected)
    }

    /// Append the notification log entry written when an alert fires.
    pub async fn record_history(
        &self,
        user_id: &str,
        zip_code: &str,
        kwh_usage: UsageTier,
        price_threshold: f64,
        plans: serde_json::Value
    ) -> Result<()> {
        let entry = alert_history::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id.to_string()),
            zip_code: ActiveValue::Set(zip_code.to_string()),
            kwh_usage: ActiveValue::Set(kwh_usage.as_str().to_string()),
            price_threshold: ActiveValue::Set(f64_to_decimal(price_threshold)),
            plans: ActiveValue::Set(plans),
            created_at: ActiveValue::Set(Utc::now()),
        };
        entry.insert(&self.db).await?;
        Ok(())
    }

    pub async fn alert_history(&self, user_id: &str) -> Result<Vec<alert_history::Model>> {
        let entries = alert_history::Entity
            ::find()
            .filter(alert_history::Column::UserId.eq(user_id))
            .order_by_desc(alert_history::Column::CreatedAt)
            .all(&self.db).await?;
        Ok(entries)
    }

    /// Find the durable plan copy for (company_id, plan_name), inserting it
    /// from the search-result plan if this is the first time anyone tracks it.
    async fn ensure_plan(&self, plan: &Plan) -> Result<energy_plan::Model> {
        let existing = energy_plan::Entity
            ::find()
            .filter(energy_plan::Column::CompanyId.eq(&plan.company_id))
            .filter(energy_plan::Column::PlanName.eq(&plan.plan_name))
            .one(&self.db).await?;

        if let Some(existing) = existing {
            return Ok(existing);
        }

        let now = Utc::now();
        let active = energy_plan::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            company_id: ActiveValue::Set(plan.company_id.clone()),
            company_name: ActiveValue::Set(plan.company_name.clone()),
            company_logo: ActiveValue::Set(plan.company_logo.clone()),
            plan_name: ActiveValue::Set(plan.plan_name.clone()),
            plan_type_name: ActiveValue::Set(plan.plan_type_name.clone()),
            term_value: ActiveValue::Set(plan.term_value),
            price_kwh500: ActiveValue::Set(f64_to_decimal(plan.price_kwh500)),
            price_kwh1000: ActiveValue::Set(f64_to_decimal(plan.price_kwh1000)),
            price_kwh2000: ActiveValue::Set(f64_to_decimal(plan.price_kwh2000)),
            base_charge: ActiveValue::Set(plan.base_charge.map(f64_to_decimal)),
            minimum_usage: ActiveValue::Set(plan.minimum_usage),
            new_customer: ActiveValue::Set(plan.new_customer),
            prepaid: ActiveValue::Set(plan.prepaid),
            timeofuse: ActiveValue::Set(plan.timeofuse),
            renewable: ActiveValue::Set(plan.renewable),
            jdp_rating: ActiveValue::Set(plan.jdp_rating.map(f64_to_decimal)),
            jdp_rating_year: ActiveValue::Set(plan.jdp_rating_year.clone()),
            plan_details: ActiveValue::Set(plan.plan_details.clone()),
            pricing_details: ActiveValue::Set(plan.pricing_details.clone()),
            promotions: ActiveValue::Set(plan.promotions.clone()),
            fact_sheet: ActiveValue::Set(plan.fact_sheet.clone()),
            terms_of_service: ActiveValue::Set(plan.terms_of_service.clone()),
            yrac_url: ActiveValue::Set(plan.yrac_url.clone()),
            enroll_phone: ActiveValue::Set(plan.enroll_phone.clone()),
            go_to_plan: ActiveValue::Set(plan.go_to_plan.clone()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        let inserted = active.insert(&self.db).await?;
        Ok(inserted)
    }
}

/// Alerts created strictly before this instant are swept, regardless of
/// whether their price condition was ever met.
pub fn sweep_cutoff(now: chrono::DateTime<chrono::Utc>, days: i64) -> chrono::DateTime<chrono::Utc> {
    now - Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_cutoff_deactivates_alerts_past_retention() {
        let now = Utc::now();
        let cutoff = sweep_cutoff(now, 30);

        // An alert created 31 days ago falls before the cutoff and is swept.
        let created_31_days_ago = now - Duration::days(31);
        assert!(created_31_days_ago < cutoff);

        // One created 29 days ago survives.
        let created_29_days_ago = now - Duration::days(29);
        assert!(created_29_days_ago >= cutoff);
    }

    #[test]
    fn test_sweep_cutoff_boundary_is_exclusive() {
        let now = Utc::now();
        let cutoff = sweep_cutoff(now, 30);

        // An alert created exactly at the cutoff is not yet stale; the sweep
        // filters on created_at < cutoff.
        let created_exactly_30_days_ago = now - Duration::days(30);
        assert!(!(created_exactly_30_days_ago < cutoff));
    }
}
