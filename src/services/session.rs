use crate::error::{ClientError, Result};
use crate::models::config::{validate_for_scan, ScanConfig, ScanMode};
use crate::models::profile::{export_profile, import_profile, Profile};
use crate::models::scan::{PathScanRequest, ScanResult, TextScanRequest};
use crate::services::api::ApiClient;
use crate::services::workflow::WorkflowController;
use log::{debug, error, info};
use std::path::PathBuf;

/// Lifecycle of the current scan action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    Idle,
    Loading,
    Done,
    Error(String),
}

/// The outbound request prepared for the selected scan mode.
#[derive(Debug, Clone)]
pub enum ScanRequest {
    Path(PathScanRequest),
    Text(TextScanRequest),
    Files {
        files: Vec<PathBuf>,
        approved_for_ai: bool,
        ruleset: String,
    },
}

/// Handle for one scan invocation. The token ties the eventual response
/// back to the session state it was issued against.
#[derive(Debug)]
pub struct ScanTicket {
    token: u64,
    pub request: ScanRequest,
}

impl ScanTicket {
    pub fn token(&self) -> u64 {
        self.token
    }
}

/// Owns the editable configuration, the transient inputs, and the workflow,
/// and orchestrates scan invocations against them.
///
/// At most one scan runs at a time: a trigger while one is loading is
/// rejected. Each invocation carries a monotonically increasing token, and a
/// response whose token is no longer current (because `reset` ran in the
/// meantime) is discarded instead of being applied to the reset state.
pub struct ScanSession {
    config: ScanConfig,
    files: Vec<PathBuf>,
    pasted: String,
    status: ScanStatus,
    workflow: WorkflowController,
    request_token: u64,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
            files: Vec::new(),
            pasted: String::new(),
            status: ScanStatus::Idle,
            workflow: WorkflowController::new(),
            request_token: 0,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ScanConfig {
        &mut self.config
    }

    pub fn set_files(&mut self, files: Vec<PathBuf>) {
        self.files = files;
    }

    pub fn set_pasted(&mut self, content: impl Into<String>) {
        self.pasted = content.into();
    }

    pub fn status(&self) -> &ScanStatus {
        &self.status
    }

    pub fn workflow(&self) -> &WorkflowController {
        &self.workflow
    }

    pub fn workflow_mut(&mut self) -> &mut WorkflowController {
        &mut self.workflow
    }

    /// Validates the selected input source and prepares the request for it.
    ///
    /// Fails with [`ClientError::ScanInFlight`] while a scan is loading and
    /// with [`ClientError::Validation`] when the selected source is empty;
    /// in both cases nothing is dispatched.
    pub fn begin_scan(&mut self) -> Result<ScanTicket> {
        if self.status == ScanStatus::Loading {
            return Err(ClientError::ScanInFlight);
        }
        validate_for_scan(&self.config, &self.files, &self.pasted)?;

        self.status = ScanStatus::Loading;
        self.request_token += 1;

        let request = match self.config.scan_mode {
            ScanMode::Path => ScanRequest::Path(PathScanRequest {
                path: self.config.path.clone(),
                recursive: true,
                approved_for_ai: self.config.approved_for_ai,
                ruleset: self.config.ruleset.clone(),
            }),
            ScanMode::Paste => ScanRequest::Text(TextScanRequest {
                content: self.pasted.clone(),
                approved_for_ai: self.config.approved_for_ai,
                ruleset: self.config.ruleset.clone(),
            }),
            ScanMode::Upload => ScanRequest::Files {
                files: self.files.clone(),
                approved_for_ai: self.config.approved_for_ai,
                ruleset: self.config.ruleset.clone(),
            },
        };

        Ok(ScanTicket {
            token: self.request_token,
            request,
        })
    }

    /// Applies the outcome of an invocation started by [`begin_scan`].
    ///
    /// A stale token (the session was reset in flight) is dropped without
    /// touching any state. A success installs the result atomically and
    /// opens findings; a failure records the message and leaves any prior
    /// result as it was.
    pub fn apply_scan_outcome(&mut self, token: u64, outcome: Result<ScanResult>) {
        if token != self.request_token {
            debug!("discarding stale scan response (token {} != {})", token, self.request_token);
            return;
        }
        match outcome {
            Ok(result) => {
                info!(
                    "scan {} finished: {} findings, eligibility {:?}",
                    result.scan_id, result.risk_summary.total_findings, result.eligibility
                );
                self.workflow.complete_scan(result);
                self.status = ScanStatus::Done;
            }
            Err(err) => {
                error!("scan failed: {}", err);
                self.status = ScanStatus::Error(err.to_string());
            }
        }
    }

    /// Runs one full scan: validate, dispatch the request matching the scan
    /// mode, and apply the outcome. Exactly one request goes out.
    pub async fn run_scan(&mut self, client: &ApiClient) -> Result<()> {
        let ticket = match self.begin_scan() {
            Ok(ticket) => ticket,
            Err(ClientError::ScanInFlight) => return Err(ClientError::ScanInFlight),
            Err(err) => {
                self.status = ScanStatus::Error(err.to_string());
                return Err(err);
            }
        };

        let outcome = match &ticket.request {
            ScanRequest::Path(request) => client.scan_path(request).await,
            ScanRequest::Text(request) => client.scan_text(request).await,
            ScanRequest::Files {
                files,
                approved_for_ai,
                ruleset,
            } => client.scan_files(files, *approved_for_ai, ruleset).await,
        };

        match outcome {
            Ok(result) => {
                self.apply_scan_outcome(ticket.token, Ok(result));
                Ok(())
            }
            Err(err) => {
                self.apply_scan_outcome(ticket.token, Err(err.clone()));
                Err(err)
            }
        }
    }

    /// Snapshots the current configuration as a portable profile.
    pub fn export_profile(&self, name: &str) -> Profile {
        export_profile(&self.config, name)
    }

    /// Replaces the configuration from a profile document and clears the
    /// transient file selection and pasted text. The existing configuration
    /// is untouched when the document is rejected.
    pub fn import_profile(&mut self, document: &serde_json::Value) -> Result<()> {
        let config = import_profile(document, &self.config)?;
        self.config = config;
        self.files.clear();
        self.pasted.clear();
        Ok(())
    }

    /// Full workflow reset: configuration back to defaults, transient
    /// inputs and result discarded, flags cleared. Any scan still in flight
    /// becomes stale and its response will be dropped.
    pub fn reset(&mut self) {
        self.request_token += 1;
        self.config = ScanConfig::default();
        self.files.clear();
        self.pasted.clear();
        self.status = ScanStatus::Idle;
        self.workflow.reset();
    }
}
