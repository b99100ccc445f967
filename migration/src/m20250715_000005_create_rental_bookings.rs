use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250715_000001_create_users::User;
use super::m20250715_000003_create_rental_vehicles::RentalVehicle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(RentalType::Enum)
                    .values([
                        RentalType::Hour,
                        RentalType::Day,
                        RentalType::Week,
                        RentalType::Month,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(DriveOption::Enum)
                    .values([DriveOption::SelfDrive, DriveOption::HiredDriver])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentMethod::Enum)
                    .values([PaymentMethod::Prepaid, PaymentMethod::PayAtPickup])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([
                        BookingStatus::NotPaid,
                        BookingStatus::Pending,
                        BookingStatus::Active,
                        BookingStatus::Late,
                        BookingStatus::Completed,
                        BookingStatus::CompletedLate,
                        BookingStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RentalBooking::Table)
                    .if_not_exists()
                    .col(uuid(RentalBooking::Id).primary_key())
                    .col(uuid(RentalBooking::UserId).not_null())
                    .col(uuid(RentalBooking::VehicleId).not_null())
                    .col(string_len(RentalBooking::PickupLocation, 255).not_null())
                    .col(date(RentalBooking::PickupDate).not_null())
                    .col(time(RentalBooking::PickupTime).not_null())
                    .col(string_len(RentalBooking::ReturnLocation, 255).not_null())
                    .col(date(RentalBooking::ReturnDate).not_null())
                    .col(time(RentalBooking::ReturnTime).not_null())
                    .col(
                        ColumnDef::new(RentalBooking::RentalType)
                            .custom(RentalType::Enum)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RentalBooking::DriveOption)
                            .custom(DriveOption::Enum)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RentalBooking::PaymentMethod)
                            .custom(PaymentMethod::Enum)
                            .not_null(),
                    )
                    .col(big_integer(RentalBooking::TotalAmount).not_null())
                    .col(
                        ColumnDef::new(RentalBooking::Status)
                            .custom(BookingStatus::Enum)
                            .not_null(),
                    )
                    .col(integer(RentalBooking::Version).not_null().default(0))
                    .col(
                        timestamp_with_time_zone(RentalBooking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_booking_user")
                            .from(RentalBooking::Table, RentalBooking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_booking_vehicle")
                            .from(RentalBooking::Table, RentalBooking::VehicleId)
                            .to(RentalVehicle::Table, RentalVehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RentalBooking::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(PaymentMethod::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(DriveOption::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(RentalType::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RentalBooking {
    Table,
    Id,
    UserId,
    VehicleId,
    PickupLocation,
    PickupDate,
    PickupTime,
    ReturnLocation,
    ReturnDate,
    ReturnTime,
    RentalType,
    DriveOption,
    PaymentMethod,
    TotalAmount,
    Status,
    Version,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum RentalType {
    #[sea_orm(iden = "rental_type")]
    Enum,
    #[sea_orm(iden = "hour")]
    Hour,
    #[sea_orm(iden = "day")]
    Day,
    #[sea_orm(iden = "week")]
    Week,
    #[sea_orm(iden = "month")]
    Month,
}

#[derive(DeriveIden)]
pub enum DriveOption {
    #[sea_orm(iden = "drive_option")]
    Enum,
    #[sea_orm(iden = "self_drive")]
    SelfDrive,
    #[sea_orm(iden = "hired_driver")]
    HiredDriver,
}

#[derive(DeriveIden)]
pub enum PaymentMethod {
    #[sea_orm(iden = "payment_method")]
    Enum,
    #[sea_orm(iden = "prepaid")]
    Prepaid,
    #[sea_orm(iden = "pay_at_pickup")]
    PayAtPickup,
}

#[derive(DeriveIden)]
pub enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "not_paid")]
    NotPaid,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "late")]
    Late,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "completed_late")]
    CompletedLate,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
