//! Risk tier classification
//!
//! The tier is a pure function of the fraud score. Both thresholds are
//! strict: a score of exactly 0.7 is still medium, exactly 0.4 is still low.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClaimError;

/// Scores strictly above this are high risk
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Scores strictly above this (and not high) are medium risk
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;
/// Scores strictly above this get the default suspicious flag on ingestion
pub const SUSPICIOUS_FLAG_THRESHOLD: f64 = 0.5;

/// Risk tier, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Classifies a fraud score
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if score > MEDIUM_RISK_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Capitalised label used by dashboard distributions
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    pub fn all() -> [RiskTier; 3] {
        [RiskTier::Low, RiskTier::Medium, RiskTier::High]
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high" => Ok(RiskTier::High),
            _ => Err(ClaimError::InvalidRiskTier(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(RiskTier::from_score(0.7), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(0.4), RiskTier::Low);
        assert_eq!(RiskTier::from_score(0.7000001), RiskTier::High);
        assert_eq!(RiskTier::from_score(0.4000001), RiskTier::Medium);
    }

    #[test]
    fn test_severity_order() {
        assert!(RiskTier::Low < RiskTier::Medium);
        assert!(RiskTier::Medium < RiskTier::High);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<RiskTier>().unwrap(), RiskTier::High);
        assert!("severe".parse::<RiskTier>().is_err());
    }
}
