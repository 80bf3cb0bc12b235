//! Client-side orchestration for the DArbiter AI-readiness scanning
//! service: scan configuration and its portable profile format, the
//! step-gated certification workflow, remediation reconciliation, and the
//! HTTP client for the external scan service.
//!
//! Detection rules, eligibility policy, and report rendering all live in
//! the service; this crate only drives them.

pub mod error;
pub mod models;
pub mod services;

pub use error::ClientError;
pub use models::config::{ScanConfig, ScanMode};
pub use models::profile::{export_profile, import_profile, Profile};
pub use models::scan::{
    Certificate, Eligibility, Finding, RemediationItem, RiskLevel, RuleSetInfo, ScanResult,
};
pub use services::api::ApiClient;
pub use services::remediation::{merge_remediation, MergedRemediation};
pub use services::session::{ScanSession, ScanStatus};
pub use services::workflow::{StepId, WorkflowController, STEPS};
