//! Request handlers

pub mod audit;
pub mod claims;
pub mod dashboard;
pub mod filters;
pub mod health;
pub mod notes;
pub mod uploads;
