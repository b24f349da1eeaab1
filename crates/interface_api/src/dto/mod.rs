//! Request and response bodies

pub mod claims;
pub mod notes;
pub mod uploads;
pub mod views;
