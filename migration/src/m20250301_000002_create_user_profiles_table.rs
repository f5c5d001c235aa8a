use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(UserProfiles::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserProfiles::UserId).string().not_null().primary_key())
                .col(ColumnDef::new(UserProfiles::ZipCode).string().not_null())
                .col(ColumnDef::new(UserProfiles::CurrentKwhUsage).string().not_null())
                .col(
                    ColumnDef::new(UserProfiles::RenewablePreference)
                        .boolean()
                        .not_null()
                        .default(false)
                )
                .col(ColumnDef::new(UserProfiles::UniversalKwhUsage).string().not_null())
                .col(ColumnDef::new(UserProfiles::UniversalPriceThreshold).decimal())
                .col(ColumnDef::new(UserProfiles::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(UserProfiles::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned()
        ).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserProfiles::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum UserProfiles {
    Table,
    UserId,
    ZipCode,
    CurrentKwhUsage,
    RenewablePreference,
    UniversalKwhUsage,
    UniversalPriceThreshold,
    CreatedAt,
    UpdatedAt,
}
