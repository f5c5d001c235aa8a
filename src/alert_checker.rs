use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::time::{ interval, Duration };

use crate::db::{ decimal_to_f64, entity::energy_plan };
use crate::identity::IdentityService;
use crate::mailer::Mailer;
use crate::plans::UsageTier;
use crate::services::{ ProfileService, TrackingService };

/// A price drop only triggers when the resolved price is a real quote at or
/// below the threshold. Zero means unparsed/missing data, never a free plan
/// match.
pub fn should_trigger(current_price: f64, threshold: f64) -> bool {
    current_price > 0.0 && current_price <= threshold
}

/// Render the notification for a fired alert.
pub fn render_alert_email(
    plan: &energy_plan::Model,
    tier: UsageTier,
    current_price: f64,
    threshold: f64
) -> (String, String) {
    let subject = format!("Price drop: {} from {}", plan.plan_name, plan.company_name);
    let body = format!(
        "Good news!\n\n\
        The plan you are tracking has dropped to or below your target price.\n\n\
        Plan: {plan_name}\n\
        Provider: {company}\n\
        Usage level: {tier}\n\
        Current price: ${price:.4}/kWh\n\
        Your threshold: ${threshold:.4}/kWh\n\n\
        This alert has been deactivated. You can set up a new one from your dashboard.",
        plan_name = plan.plan_name,
        company = plan.company_name,
        tier = tier,
        price = current_price,
        threshold = threshold,
    );
    (subject, body)
}

/// Background evaluator for active price alerts, plus the 30-day retention
/// sweep. Alerts are processed sequentially; every per-alert failure is
/// logged and skipped so one bad alert never aborts the pass.
pub struct AlertChecker {
    db: DatabaseConnection,
    mailer: Arc<Mailer>,
    identity: Arc<IdentityService>,
    retention_days: i64,
}

impl AlertChecker {
    pub fn new(
        db: DatabaseConnection,
        mailer: Arc<Mailer>,
        identity: Arc<IdentityService>,
        retention_days: i64
    ) -> Self {
        Self {
            db,
            mailer,
            identity,
            retention_days,
        }
    }

    /// Run the evaluation pass on a fixed interval.
    pub async fn run(self: Arc<Self>, interval_secs: u64) {
        let mut interval = interval(Duration::from_secs(interval_secs));

        loop {
            interval.tick().await;

            if let Err(e) = self.check_alerts().await {
                tracing::error!("alert checker pass failed: {}", e);
            }
        }
    }

    /// Run the retention sweep on its own interval.
    pub async fn run_sweeper(self: Arc<Self>, interval_secs: u64) {
        let mut interval = interval(Duration::from_secs(interval_secs));

        loop {
            interval.tick().await;

            match self.sweep().await {
                Ok(count) if count > 0 => {
                    tracing::info!("retention sweep deactivated {} stale alerts", count);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("retention sweep failed: {}", e);
                }
            }
        }
    }

    /// One evaluation pass over all active alerts.
    pub async fn check_alerts(&self) -> crate::error::Result<()> {
        let tracking = TrackingService::new(self.db.clone());
        let profiles = ProfileService::new(self.db.clone());

        let alerts = tracking.active_trackings().await?;
        tracing::debug!(count = alerts.len(), "evaluating active price alerts");

        for alert in alerts {
            let plan = match tracking.plan_by_id(alert.plan_id).await {
                Ok(plan) => plan,
                Err(e) => {
                    tracing::warn!(alert_id = %alert.id, "tracked plan unavailable: {}", e);
                    continue;
                }
            };

            let tier = match alert.kwh_usage.parse::<UsageTier>() {
                Ok(tier) => tier,
                Err(_) => {
                    tracing::warn!(alert_id = %alert.id, "unknown usage tier: {}", alert.kwh_usage);
                    continue;
                }
            };

            let current_price = match
                tracking.resolve_current_price(&plan.company_id, &plan.plan_name, tier).await
            {
                Ok(Some(price)) => price,
                Ok(None) => {
                    // No snapshot and no live row; alert stays active.
                    tracing::debug!(alert_id = %alert.id, "no price available this pass");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(alert_id = %alert.id, "price lookup failed: {}", e);
                    continue;
                }
            };

            let threshold = decimal_to_f64(alert.price_threshold).unwrap_or(0.0);

            if !should_trigger(current_price, threshold) {
                continue;
            }

            let email = match self.identity.email_for_user(&alert.user_id).await {
                Ok(email) => email,
                Err(e) => {
                    tracing::warn!(alert_id = %alert.id, "email lookup failed: {}", e);
                    continue;
                }
            };

            let (subject, body) = render_alert_email(&plan, tier, current_price, threshold);

            // Deactivation happens only after a successful send, so a failed
            // send retries on the next pass (at-least-once delivery).
            if let Err(e) = self.mailer.send(&email, &subject, &body).await {
                tracing::warn!(alert_id = %alert.id, "notification failed, alert stays active: {}", e);
                continue;
            }

            if let Err(e) = tracking.deactivate(alert.id).await {
                tracing::error!(alert_id = %alert.id, "failed to deactivate after send: {}", e);
            }

            let zip_code = profiles
                .get_profile(&alert.user_id).await
                .map(|p| p.zip_code)
                .unwrap_or_default();

            let snapshot =
                serde_json::json!([{
                "company_id": plan.company_id,
                "company_name": plan.company_name,
                "plan_name": plan.plan_name,
                "price": current_price,
            }]);

            if
                let Err(e) = tracking.record_history(
                    &alert.user_id,
                    &zip_code,
                    tier,
                    threshold,
                    snapshot
                ).await
            {
                tracing::warn!(alert_id = %alert.id, "failed to record alert history: {}", e);
            }

            tracing::info!(
                "price alert fired for user {} on {} / {} at ${:.4}",
                alert.user_id,
                plan.company_name,
                plan.plan_name,
                current_price
            );
        }

        Ok(())
    }

    /// Deactivate alerts past the retention window, regardless of trigger
    /// state.
    pub async fn sweep(&self) -> crate::error::Result<u64> {
        TrackingService::new(self.db.clone()).sweep_stale(self.retention_days).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_at_or_below_threshold() {
        assert!(should_trigger(9.9, 10.0));
        assert!(should_trigger(10.0, 10.0));
        assert!(!should_trigger(10.1, 10.0));
    }

    #[test]
    fn test_zero_price_never_triggers() {
        // Zero means unparsed/missing data, not a free plan.
        assert!(!should_trigger(0.0, 10.0));
        assert!(!should_trigger(-1.0, 10.0));
    }

    #[test]
    fn test_zero_threshold_never_triggers() {
        assert!(!should_trigger(0.05, 0.0));
    }
}
