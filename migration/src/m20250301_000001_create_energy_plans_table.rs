use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(EnergyPlans::Table)
                .if_not_exists()
                .col(ColumnDef::new(EnergyPlans::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(EnergyPlans::CompanyId).string().not_null())
                .col(ColumnDef::new(EnergyPlans::CompanyName).string().not_null())
                .col(ColumnDef::new(EnergyPlans::CompanyLogo).string())
                .col(ColumnDef::new(EnergyPlans::PlanName).string().not_null())
                .col(ColumnDef::new(EnergyPlans::PlanTypeName).string().not_null())
                .col(ColumnDef::new(EnergyPlans::TermValue).integer())
                .col(ColumnDef::new(EnergyPlans::PriceKwh500).decimal().not_null())
                .col(ColumnDef::new(EnergyPlans::PriceKwh1000).decimal().not_null())
                .col(ColumnDef::new(EnergyPlans::PriceKwh2000).decimal().not_null())
                .col(ColumnDef::new(EnergyPlans::BaseCharge).decimal())
                .col(ColumnDef::new(EnergyPlans::MinimumUsage).boolean().not_null().default(false))
                .col(ColumnDef::new(EnergyPlans::NewCustomer).boolean().not_null().default(false))
                .col(ColumnDef::new(EnergyPlans::Prepaid).boolean().not_null().default(false))
                .col(ColumnDef::new(EnergyPlans::Timeofuse).boolean().not_null().default(false))
                .col(ColumnDef::new(EnergyPlans::Renewable).integer().not_null().default(0))
                .col(ColumnDef::new(EnergyPlans::JdpRating).decimal())
                .col(ColumnDef::new(EnergyPlans::JdpRatingYear).string())
                .col(ColumnDef::new(EnergyPlans::PlanDetails).text())
                .col(ColumnDef::new(EnergyPlans::PricingDetails).text())
                .col(ColumnDef::new(EnergyPlans::Promotions).text())
                .col(ColumnDef::new(EnergyPlans::FactSheet).string())
                .col(ColumnDef::new(EnergyPlans::TermsOfService).string())
                .col(ColumnDef::new(EnergyPlans::YracUrl).string())
                .col(ColumnDef::new(EnergyPlans::EnrollPhone).string())
                .col(ColumnDef::new(EnergyPlans::GoToPlan).string())
                .col(ColumnDef::new(EnergyPlans::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(EnergyPlans::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned()
        ).await?;

        // Durable plan copies are keyed by (company_id, plan_name); upstream has
        // no stable primary key.
        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_energy_plans_company_plan")
                .table(EnergyPlans::Table)
                .col(EnergyPlans::CompanyId)
                .col(EnergyPlans::PlanName)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EnergyPlans::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum EnergyPlans {
    Table,
    Id,
    CompanyId,
    CompanyName,
    CompanyLogo,
    PlanName,
    PlanTypeName,
    TermValue,
    PriceKwh500,
    PriceKwh1000,
    PriceKwh2000,
    BaseCharge,
    MinimumUsage,
    NewCustomer,
    Prepaid,
    Timeofuse,
    Renewable,
    JdpRating,
    JdpRatingYear,
    PlanDetails,
    PricingDetails,
    Promotions,
    FactSheet,
    TermsOfService,
    YracUrl,
    EnrollPhone,
    GoToPlan,
    CreatedAt,
    UpdatedAt,
}
