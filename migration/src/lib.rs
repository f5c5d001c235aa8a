pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_energy_plans_table;
mod m20250301_000002_create_user_profiles_table;
mod m20250301_000003_create_user_plan_tracking_table;
mod m20250301_000004_create_api_history_table;
mod m20250301_000005_create_alert_history_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_energy_plans_table::Migration),
            Box::new(m20250301_000002_create_user_profiles_table::Migration),
            Box::new(m20250301_000003_create_user_plan_tracking_table::Migration),
            Box::new(m20250301_000004_create_api_history_table::Migration),
            Box::new(m20250301_000005_create_alert_history_table::Migration)
        ]
    }
}
