use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RentalVehicle::Table)
                    .if_not_exists()
                    .col(uuid(RentalVehicle::Id).primary_key())
                    .col(string_len(RentalVehicle::Make, 100).not_null())
                    .col(string_len(RentalVehicle::Model, 100).not_null())
                    .col(integer(RentalVehicle::Year).not_null())
                    .col(big_integer(RentalVehicle::RatePerHour).not_null())
                    .col(big_integer(RentalVehicle::RatePerDay).not_null())
                    .col(big_integer(RentalVehicle::RatePerWeek).not_null())
                    .col(big_integer(RentalVehicle::RatePerMonth).not_null())
                    .col(boolean(RentalVehicle::Available).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(RentalVehicle::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RentalVehicle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RentalVehicle {
    Table,
    Id,
    Make,
    Model,
    Year,
    RatePerHour,
    RatePerDay,
    RatePerWeek,
    RatePerMonth,
    Available,
    CreatedAt,
}
