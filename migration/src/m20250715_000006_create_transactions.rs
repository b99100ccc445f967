use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250715_000005_create_rental_bookings::RentalBooking;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TransactionStatus::Enum)
                    .values([
                        TransactionStatus::NotApplicable,
                        TransactionStatus::Cancelled,
                        TransactionStatus::Paid,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(uuid(Transaction::Id).primary_key())
                    .col(uuid(Transaction::BookingId).not_null().unique_key())
                    .col(
                        ColumnDef::new(Transaction::Status)
                            .custom(TransactionStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Transaction::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_booking")
                            .from(Transaction::Table, Transaction::BookingId)
                            .to(RentalBooking::Table, RentalBooking::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transaction::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TransactionStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Transaction {
    Table,
    Id,
    BookingId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum TransactionStatus {
    #[sea_orm(iden = "transaction_status")]
    Enum,
    #[sea_orm(iden = "not_applicable")]
    NotApplicable,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
    #[sea_orm(iden = "paid")]
    Paid,
}
