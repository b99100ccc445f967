pub mod admin;
pub mod appointments;
pub mod auth;
pub mod board;
pub mod contact;
pub mod rentals;
pub mod vehicles;
pub mod wishlist;
