use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical AI-readiness outcome for scanned data.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Eligibility {
    AiSafe,
    Conditional,
    NotAiSafe,
    Restricted,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCategory {
    Pii,
    Secret,
    ConfigRisk,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiUsage {
    Inference,
    Training,
}

/// A single detected issue inside the scanned data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub category: FindingCategory,
    pub label: String,
    pub severity: RiskLevel,
    pub file_path: String,
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub total_findings: u32,
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    #[serde(default)]
    pub low: u32,
    pub overall: RiskLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityDecision {
    pub status: Eligibility,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub policy_references: Vec<String>,
}

/// Recommended corrective label + actions tied to a finding category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemediationItem {
    #[serde(default)]
    pub finding_id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// The structured result of one scan invocation. Produced once by the
/// service, never mutated afterwards; a later scan replaces it wholesale.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub scan_id: String,
    pub ruleset: String,
    #[serde(default)]
    pub usage: Option<AiUsage>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(default)]
    pub findings: Vec<Finding>,
    pub risk_summary: RiskSummary,
    pub eligibility: Eligibility,
    pub decision: EligibilityDecision,
    #[serde(default)]
    pub remediation: Vec<RemediationItem>,
}

/// One entry of GET /rulesets.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RuleSetInfo {
    pub file: String,
    pub name: String,
    pub version: String,
}

/// GET /certify/{scanId} body.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub scan_id: String,
    pub scope: String,
    pub status: Eligibility,
    #[serde(default)]
    pub usage: Option<AiUsage>,
    pub ruleset: String,
    pub issued_at: DateTime<Utc>,
}

/// POST /scan/path body.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PathScanRequest {
    pub path: String,
    pub recursive: bool,
    pub approved_for_ai: bool,
    pub ruleset: String,
}

/// POST /scan/text body.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TextScanRequest {
    pub content: String,
    pub approved_for_ai: bool,
    pub ruleset: String,
}
