//! CSV upload workflow
//!
//! ```text
//! file type ─> file size ─> parse + validate ─> upload endpoint
//!     │            │              │                  │
//!     └────────────┴──────────────┘          success │ rejected / error
//!        rejected, nothing recorded                  ▼
//!                                      history entry (success or failed)
//! ```
//!
//! On success the upload is recorded in the history and the audit trail, and
//! the parsed claims are merged into the store. Progress is cosmetic: it
//! climbs by 10 per tick up to 90 while work is in flight, jumps to 100 when
//! the endpoint answers, then resets to 0.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use domain_claims::ingest::{validate_file_size, validate_file_type, DEFAULT_MAX_FILE_MB};
use domain_claims::query::paginate;
use domain_claims::{
    validate_and_parse, AuditAction, ClaimsPort, NewAuditEntry, Page, PageRequest, UploadRecord,
    UploadRequest, UploadResult,
};

use crate::error::UploadError;
use crate::store::ClaimStore;
use crate::triage::DEFAULT_ACTOR;

/// Progress ceiling while waiting on the endpoint
pub const PROGRESS_CEILING: u8 = 90;
const PROGRESS_STEP: u8 = 10;

/// A file handed to the upload workflow
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn csv(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content_type: Some("text/csv".to_string()),
            bytes: contents.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_file_mb: u64,
    pub progress_tick: Duration,
    pub actor: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_mb: DEFAULT_MAX_FILE_MB,
            progress_tick: Duration::from_millis(200),
            actor: DEFAULT_ACTOR.to_string(),
        }
    }
}

/// A successful upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub record: UploadRecord,
    pub result: UploadResult,
    /// Parsed claims that were new to the store
    pub merged: usize,
    pub warnings: Vec<String>,
}

pub struct UploadService {
    store: Arc<ClaimStore>,
    claims: Arc<dyn ClaimsPort>,
    settings: UploadSettings,
    progress: Arc<watch::Sender<u8>>,
}

impl UploadService {
    pub fn new(store: Arc<ClaimStore>, claims: Arc<dyn ClaimsPort>, settings: UploadSettings) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            store,
            claims,
            settings,
            progress: Arc::new(progress),
        }
    }

    /// Observes upload progress (0..=100)
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    /// Runs the whole upload workflow for one file
    ///
    /// # Errors
    ///
    /// - `InvalidFile` / `InvalidCsv`: nothing is recorded
    /// - `Rejected` / `Port`: a failed history entry is recorded
    pub async fn upload(&self, file: UploadFile) -> Result<UploadOutcome, UploadError> {
        validate_file_type(&file.filename, file.content_type.as_deref())?;
        validate_file_size(file.bytes.len() as u64, self.settings.max_file_mb)?;

        let ticker = self.start_progress();
        let result = self.process(&file).await;
        ticker.abort();
        self.progress.send_replace(0);
        result
    }

    async fn process(&self, file: &UploadFile) -> Result<UploadOutcome, UploadError> {
        let report = validate_and_parse(file.bytes.as_slice(), self.store.clock().today());
        if !report.is_valid() {
            warn!(filename = %file.filename, errors = ?report.errors, "CSV validation failed");
            return Err(UploadError::InvalidCsv(report.errors));
        }

        let request = UploadRequest {
            filename: file.filename.clone(),
            row_count: report.rows.len(),
        };
        let response = self.claims.upload_claims(&request).await;
        self.progress.send_replace(100);

        match response {
            Ok(result) if result.success => {
                let record = UploadRecord::succeeded(&file.filename, self.store.clock().now(), result.count);
                self.store.add_upload(record.clone()).await;
                self.store
                    .add_audit_entry(NewAuditEntry::new(
                        record.upload_date,
                        AuditAction::CsvUpload,
                        &self.settings.actor,
                        format!("Uploaded {} with {} records", file.filename, result.count),
                    ))
                    .await;
                let merged = self.store.merge_claims(report.rows).await;
                info!(
                    filename = %file.filename,
                    accepted = result.count,
                    merged,
                    "Upload succeeded"
                );
                Ok(UploadOutcome {
                    record,
                    result,
                    merged,
                    warnings: report.warnings,
                })
            }
            Ok(result) => {
                warn!(filename = %file.filename, errors = ?result.errors, "Upload rejected");
                self.record_failure(&file.filename).await;
                Err(UploadError::Rejected(result.errors))
            }
            Err(e) => {
                error!(filename = %file.filename, error = %e, "Upload failed");
                self.record_failure(&file.filename).await;
                Err(UploadError::Port(e))
            }
        }
    }

    async fn record_failure(&self, filename: &str) {
        self.store
            .add_upload(UploadRecord::failed(filename, self.store.clock().now()))
            .await;
    }

    fn start_progress(&self) -> JoinHandle<()> {
        self.progress.send_replace(0);
        let progress = Arc::clone(&self.progress);
        let tick = self.settings.progress_tick.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut reached = false;
                progress.send_modify(|value| {
                    if *value < PROGRESS_CEILING {
                        *value = (*value + PROGRESS_STEP).min(PROGRESS_CEILING);
                    }
                    reached = *value >= PROGRESS_CEILING;
                });
                if reached {
                    break;
                }
            }
        })
    }

    /// One page of the upload history, newest first
    pub async fn history_page(&self, page: usize) -> Page<UploadRecord> {
        paginate(&self.store.upload_history().await, PageRequest::new(page))
    }
}
