//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims triage test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data (dates, CSV files, clocks, mock services)
//! - `builders`: Builder for claims with sensible defaults
//! - `ports`: Port adapters that always fail, for error-path tests
//! - `assertions`: Custom assertion helpers for claim pages
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod ports;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use ports::*;
pub use assertions::*;
pub use generators::*;
