//! Upload outcome providers

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

use domain_claims::{UploadOutcomeProvider, UploadRequest, UploadResult};

use crate::config::UploadOutcomeConfig;
use crate::error::MockError;

/// Row error attached to some random outcomes
pub const SAMPLE_ROW_ERROR: &str = "Sample error: Invalid date format in row 5";

/// Flaky upload endpoint
///
/// Accepts with probability `success_rate`, reports an accepted count drawn
/// from `min_count..max_count` regardless of the file, and attaches
/// [`SAMPLE_ROW_ERROR`] with probability `error_rate`. Success, count and
/// error are drawn independently, so a rejected upload still reports a count.
pub struct RandomUploadOutcome {
    rng: Mutex<StdRng>,
    config: UploadOutcomeConfig,
}

impl RandomUploadOutcome {
    /// Seeds from `config.seed` when set, otherwise from entropy
    pub fn new(config: UploadOutcomeConfig) -> Result<Self, MockError> {
        if config.min_count >= config.max_count {
            return Err(MockError::InvalidConfig(
                "upload count range is empty".to_string(),
            ));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            rng: Mutex::new(rng),
            config,
        })
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            config: UploadOutcomeConfig {
                seed: Some(seed),
                ..UploadOutcomeConfig::default()
            },
        }
    }
}

impl UploadOutcomeProvider for RandomUploadOutcome {
    fn next_outcome(&self, request: &UploadRequest) -> UploadResult {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let success = rng.gen_bool(self.config.success_rate.clamp(0.0, 1.0));
        let count = rng.gen_range(self.config.min_count..self.config.max_count);
        let errors = if rng.gen_bool(self.config.error_rate.clamp(0.0, 1.0)) {
            vec![SAMPLE_ROW_ERROR.to_string()]
        } else {
            Vec::new()
        };

        debug!(
            filename = %request.filename,
            success,
            count,
            errors = errors.len(),
            "Drew random upload outcome"
        );
        UploadResult {
            success,
            count,
            errors,
        }
    }
}

/// Always answers with the same result
#[derive(Debug, Clone)]
pub struct FixedUploadOutcome {
    result: UploadResult,
}

impl FixedUploadOutcome {
    pub fn new(result: UploadResult) -> Self {
        Self { result }
    }

    pub fn reject(error: impl Into<String>) -> Self {
        Self::new(UploadResult::rejected(vec![error.into()]))
    }
}

impl UploadOutcomeProvider for FixedUploadOutcome {
    fn next_outcome(&self, _request: &UploadRequest) -> UploadResult {
        self.result.clone()
    }
}

/// Accepts every upload and echoes the row count
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl UploadOutcomeProvider for AcceptAll {
    fn next_outcome(&self, request: &UploadRequest) -> UploadResult {
        UploadResult::accepted(u32::try_from(request.row_count).unwrap_or(u32::MAX))
    }
}

/// Plays back a queue of results, then accepts with the submitted row count
#[derive(Debug, Default)]
pub struct ScriptedUploadOutcome {
    queue: Mutex<VecDeque<UploadResult>>,
}

impl ScriptedUploadOutcome {
    pub fn new(outcomes: impl IntoIterator<Item = UploadResult>) -> Self {
        Self {
            queue: Mutex::new(outcomes.into_iter().collect()),
        }
    }

    /// Outcomes not yet played
    pub fn remaining(&self) -> usize {
        self.queue
            .lock()
            .map(|queue| queue.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }
}

impl UploadOutcomeProvider for ScriptedUploadOutcome {
    fn next_outcome(&self, request: &UploadRequest) -> UploadResult {
        let next = self
            .queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        next.unwrap_or_else(|| AcceptAll.next_outcome(request))
    }
}
