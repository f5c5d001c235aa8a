use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Time-ordered price snapshot per plan key, appended by the search gateway.
/// The alert evaluator prefers the latest row here over the live plan copy.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "api_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: String,
    pub plan_name: String,
    pub price_kwh500: Decimal,
    pub price_kwh1000: Decimal,
    pub price_kwh2000: Decimal,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
