use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// One standing price alert: notify the user once when the tracked plan's
/// price at `kwh_usage` drops to or below `price_threshold`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_plan_tracking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub plan_id: Uuid,
    pub kwh_usage: String, // "500", "1000", "2000"
    pub price_threshold: Decimal,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
