pub mod appointment;
pub mod notify;
pub mod rental;
