//! Mock Data Services
//!
//! In-process adapters for every dashboard port. Each adapter serves embedded
//! fixture data after an artificial delay, standing in for a real backend.
//!
//! # Latency
//!
//! Default delays mirror a slow remote service (claims list 800 ms, single
//! claim 500 ms, upload 2 s, audit log 600 ms, graph 1 s, statistics
//! 700 ms). Tests use [`LatencyProfile::none`].
//!
//! # Upload outcomes
//!
//! The upload endpoint asks an [`UploadOutcomeProvider`] how to respond.
//! [`RandomUploadOutcome`] reproduces the flaky default behaviour; the fixed
//! and scripted providers make outcomes deterministic.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_mock::{MockServices, MockConfig};
//!
//! let services = MockServices::from_config(&MockConfig::default())?;
//! let claims = services.claims.fetch_claims().await?;
//! ```
//!
//! [`UploadOutcomeProvider`]: domain_claims::UploadOutcomeProvider

pub mod adapters;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod outcome;

pub use adapters::{MockAuditService, MockClaimsService, MockGraphService, MockServices, MockStatsService};
pub use config::{LatencyProfile, MockConfig};
pub use error::MockError;
pub use outcome::{AcceptAll, FixedUploadOutcome, RandomUploadOutcome, ScriptedUploadOutcome, SAMPLE_ROW_ERROR};
