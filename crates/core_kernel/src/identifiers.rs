//! Strongly-typed identifiers for triage entities
//!
//! Claim, patient and provider references arrive from source data (CSV files,
//! fixture feeds) and are kept verbatim. Notes, audit entries and uploads are
//! assigned identifiers locally; those carry a type prefix followed by a
//! time-ordered UUID so newer records sort after older ones.
//!
//! Newtype wrappers stop a patient reference from being passed where a claim
//! reference is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_ref {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing reference
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the reference as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the reference is empty
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consumes the wrapper, returning the inner string
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        define_ref!($name, concat!("Locally assigned identifier with the `", $prefix, "-` prefix"));

        impl $name {
            /// Generates a new time-ordered identifier
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::now_v7().simple()))
            }

            /// Returns the identifier prefix
            pub fn prefix() -> &'static str {
                $prefix
            }
        }
    };
}

// Source references
define_ref!(ClaimId, "Claim identifier as issued by the claims source");
define_ref!(PatientId, "Patient reference attached to a claim");
define_ref!(ProviderId, "Provider (facility) reference attached to a claim");

// Locally generated
define_id!(NoteId, "NOTE");
define_id!(AuditEntryId, "AUD");
define_id!(UploadId, "UPL");
