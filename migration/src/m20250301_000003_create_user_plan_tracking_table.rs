use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(UserPlanTracking::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserPlanTracking::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(UserPlanTracking::UserId).string().not_null())
                .col(ColumnDef::new(UserPlanTracking::PlanId).uuid().not_null())
                .col(ColumnDef::new(UserPlanTracking::KwhUsage).string().not_null()) // "500", "1000", "2000"
                .col(ColumnDef::new(UserPlanTracking::PriceThreshold).decimal().not_null())
                .col(ColumnDef::new(UserPlanTracking::Active).boolean().not_null().default(true))
                .col(
                    ColumnDef::new(UserPlanTracking::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .col(
                    ColumnDef::new(UserPlanTracking::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_user_plan_tracking_user_id")
                .table(UserPlanTracking::Table)
                .col(UserPlanTracking::UserId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_user_plan_tracking_active")
                .table(UserPlanTracking::Table)
                .col(UserPlanTracking::Active)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserPlanTracking::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum UserPlanTracking {
    Table,
    Id,
    UserId,
    PlanId,
    KwhUsage,
    PriceThreshold,
    Active,
    CreatedAt,
    UpdatedAt,
}
