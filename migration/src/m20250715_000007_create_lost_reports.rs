use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250715_000001_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ReportType::Enum)
                    .values([ReportType::Lost, ReportType::Found])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LostReport::Table)
                    .if_not_exists()
                    .col(uuid(LostReport::Id).primary_key())
                    .col(uuid(LostReport::UserId).not_null())
                    .col(
                        ColumnDef::new(LostReport::ReportType)
                            .custom(ReportType::Enum)
                            .not_null(),
                    )
                    .col(string_len(LostReport::Make, 100).not_null())
                    .col(string_len(LostReport::Model, 100).not_null())
                    .col(integer_null(LostReport::Year))
                    .col(string_len_null(LostReport::RegistrationNo, 30))
                    .col(string_len(LostReport::Location, 255).not_null())
                    .col(date(LostReport::EventDate).not_null())
                    .col(text(LostReport::Description).not_null())
                    .col(boolean(LostReport::Resolved).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(LostReport::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lost_report_user")
                            .from(LostReport::Table, LostReport::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LostReport::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ReportType::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LostReport {
    Table,
    Id,
    UserId,
    ReportType,
    Make,
    Model,
    Year,
    RegistrationNo,
    Location,
    EventDate,
    Description,
    Resolved,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum ReportType {
    #[sea_orm(iden = "report_type")]
    Enum,
    #[sea_orm(iden = "lost")]
    Lost,
    #[sea_orm(iden = "found")]
    Found,
}
