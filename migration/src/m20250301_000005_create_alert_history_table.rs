use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(AlertHistory::Table)
                .if_not_exists()
                .col(ColumnDef::new(AlertHistory::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(AlertHistory::UserId).string().not_null())
                .col(ColumnDef::new(AlertHistory::ZipCode).string().not_null())
                .col(ColumnDef::new(AlertHistory::KwhUsage).string().not_null())
                .col(ColumnDef::new(AlertHistory::PriceThreshold).decimal().not_null())
                .col(ColumnDef::new(AlertHistory::Plans).json_binary().not_null())
                .col(ColumnDef::new(AlertHistory::CreatedAt).timestamp_with_time_zone().not_null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_alert_history_user_id")
                .table(AlertHistory::Table)
                .col(AlertHistory::UserId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AlertHistory::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum AlertHistory {
    Table,
    Id,
    UserId,
    ZipCode,
    KwhUsage,
    PriceThreshold,
    Plans,
    CreatedAt,
}
