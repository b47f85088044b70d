//! Starting, wiring and stopping the actors behind the service.

mod booking_system;

pub use booking_system::BookingSystem;
