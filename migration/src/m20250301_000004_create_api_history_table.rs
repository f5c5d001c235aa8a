use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(ApiHistory::Table)
                .if_not_exists()
                .col(ColumnDef::new(ApiHistory::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(ApiHistory::CompanyId).string().not_null())
                .col(ColumnDef::new(ApiHistory::PlanName).string().not_null())
                .col(ColumnDef::new(ApiHistory::PriceKwh500).decimal().not_null())
                .col(ColumnDef::new(ApiHistory::PriceKwh1000).decimal().not_null())
                .col(ColumnDef::new(ApiHistory::PriceKwh2000).decimal().not_null())
                .col(ColumnDef::new(ApiHistory::CreatedAt).timestamp_with_time_zone().not_null())
                .to_owned()
        ).await?;

        // The alert evaluator reads the latest snapshot per plan key.
        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_api_history_plan_created")
                .table(ApiHistory::Table)
                .col(ApiHistory::CompanyId)
                .col(ApiHistory::PlanName)
                .col(ApiHistory::CreatedAt)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ApiHistory::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum ApiHistory {
    Table,
    Id,
    CompanyId,
    PlanName,
    PriceKwh500,
    PriceKwh1000,
    PriceKwh2000,
    CreatedAt,
}
