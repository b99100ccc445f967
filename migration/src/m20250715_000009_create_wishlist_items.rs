use sea_orm_migration::{prelude::*, schema::*};

use super::m20250715_000001_create_users::User;
use super::m20250715_000002_create_vehicles::Vehicle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WishlistItem::Table)
                    .if_not_exists()
                    .col(uuid(WishlistItem::Id).primary_key())
                    .col(uuid(WishlistItem::UserId).not_null())
                    .col(uuid(WishlistItem::VehicleId).not_null())
                    .col(
                        timestamp_with_time_zone(WishlistItem::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_item_user")
                            .from(WishlistItem::Table, WishlistItem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_item_vehicle")
                            .from(WishlistItem::Table, WishlistItem::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wishlist_item_user_vehicle")
                    .table(WishlistItem::Table)
                    .col(WishlistItem::UserId)
                    .col(WishlistItem::VehicleId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WishlistItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WishlistItem {
    Table,
    Id,
    UserId,
    VehicleId,
    CreatedAt,
}
