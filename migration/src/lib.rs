pub use sea_orm_migration::prelude::*;

mod m20250715_000001_create_users;
mod m20250715_000002_create_vehicles;
mod m20250715_000003_create_rental_vehicles;
mod m20250715_000004_create_appointments;
mod m20250715_000005_create_rental_bookings;
mod m20250715_000006_create_transactions;
mod m20250715_000007_create_lost_reports;
mod m20250715_000008_create_contact_messages;
mod m20250715_000009_create_wishlist_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250715_000001_create_users::Migration),
            Box::new(m20250715_000002_create_vehicles::Migration),
            Box::new(m20250715_000003_create_rental_vehicles::Migration),
            Box::new(m20250715_000004_create_appointments::Migration),
            Box::new(m20250715_000005_create_rental_bookings::Migration),
            Box::new(m20250715_000006_create_transactions::Migration),
            Box::new(m20250715_000007_create_lost_reports::Migration),
            Box::new(m20250715_000008_create_contact_messages::Migration),
            Box::new(m20250715_000009_create_wishlist_items::Migration),
        ]
    }
}
