//! Core Kernel - Foundational types shared by the fraud triage workspace
//!
//! This crate provides the building blocks used across all other crates:
//! - Strongly-typed identifiers for claims, patients, providers and records
//! - A clock abstraction so "now" and "today" can be pinned in tests
//! - The port error taxonomy used by every service boundary

pub mod identifiers;
pub mod temporal;
pub mod ports;
pub mod error;

pub use identifiers::{
    ClaimId, PatientId, ProviderId, NoteId, AuditEntryId, UploadId,
};
pub use temporal::{Clock, SystemClock, FixedClock, SharedClock};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
