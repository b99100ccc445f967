use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250715_000001_create_users::User;
use super::m20250715_000002_create_vehicles::Vehicle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(AppointmentStatus::Enum)
                    .values([
                        AppointmentStatus::Pending,
                        AppointmentStatus::Confirmed,
                        AppointmentStatus::Cancelled,
                        AppointmentStatus::Completed,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(uuid(Appointment::Id).primary_key())
                    .col(uuid(Appointment::BuyerUserId).not_null())
                    .col(uuid(Appointment::VehicleId).not_null())
                    // Snapshot of the vehicle owner at creation time; deliberately
                    // not a foreign key so it survives later ownership changes.
                    .col(uuid(Appointment::SellerUserId).not_null())
                    .col(date(Appointment::Date).not_null())
                    .col(time(Appointment::Time).not_null())
                    .col(string_len(Appointment::Location, 255).not_null())
                    .col(text_null(Appointment::Description))
                    .col(
                        ColumnDef::new(Appointment::Status)
                            .custom(AppointmentStatus::Enum)
                            .not_null(),
                    )
                    .col(integer(Appointment::Version).not_null().default(0))
                    .col(
                        timestamp_with_time_zone(Appointment::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_buyer")
                            .from(Appointment::Table, Appointment::BuyerUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_vehicle")
                            .from(Appointment::Table, Appointment::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointment::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(AppointmentStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Appointment {
    Table,
    Id,
    BuyerUserId,
    VehicleId,
    SellerUserId,
    Date,
    Time,
    Location,
    Description,
    Status,
    Version,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum AppointmentStatus {
    #[sea_orm(iden = "appointment_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
    #[sea_orm(iden = "completed")]
    Completed,
}
