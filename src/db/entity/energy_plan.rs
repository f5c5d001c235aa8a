use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Durable copy of a canonical plan, inserted lazily when a user first
/// tracks it. Keyed logically by (company_id, plan_name).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "energy_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: String,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub plan_name: String,
    pub plan_type_name: String,
    pub term_value: Option<i32>,
    pub price_kwh500: Decimal,
    pub price_kwh1000: Decimal,
    pub price_kwh2000: Decimal,
    pub base_charge: Option<Decimal>,
    pub minimum_usage: bool,
    pub new_customer: bool,
    pub prepaid: bool,
    pub timeofuse: bool,
    pub renewable: i32,
    pub jdp_rating: Option<Decimal>,
    pub jdp_rating_year: Option<String>,
    pub plan_details: Option<String>,
    pub pricing_details: Option<String>,
    pub promotions: Option<String>,
    pub fact_sheet: Option<String>,
    pub terms_of_service: Option<String>,
    pub yrac_url: Option<String>,
    pub enroll_phone: Option<String>,
    pub go_to_plan: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
