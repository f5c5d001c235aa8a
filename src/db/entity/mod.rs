pub mod energy_plan;
pub mod user_profile;
pub mod plan_tracking;
pub mod api_history;
pub mod alert_history;

pub use energy_plan::Entity as EnergyPlan;
pub use user_profile::Entity as UserProfile;
pub use plan_tracking::Entity as PlanTracking;
pub use api_history::Entity as ApiHistory;
pub use alert_history::Entity as AlertHistory;
