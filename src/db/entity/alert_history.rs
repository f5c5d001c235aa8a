use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Append-only log entry written when a notification fires. Never mutated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alert_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub zip_code: String,
    pub kwh_usage: String,
    pub price_threshold: Decimal,
    /// Snapshot of the matched plan(s) at trigger time.
    pub plans: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
