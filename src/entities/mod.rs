pub mod appointment;
pub mod contact_message;
pub mod lost_report;
pub mod rental_booking;
pub mod rental_vehicle;
pub mod transaction;
pub mod user;
pub mod vehicle;
pub mod wishlist_item;
