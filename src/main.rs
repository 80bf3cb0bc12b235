use anyhow::{Context, Result};
use darbiter_client::services::prefs::{FilePrefStore, PrefStore};
use darbiter_client::services::session::ScanStatus;
use darbiter_client::{merge_remediation, ApiClient, ScanMode, ScanSession, StepId};
use dotenv::dotenv;
use log::info;
use std::env;

/// Drives one full certification pass from the command line: configure a
/// path scan, review the findings the service returned, acknowledge each
/// stage, and pull the certification artifacts.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let base_url = env::var("DARBITER_BASE_URL")
        .unwrap_or_else(|_| darbiter_client::services::api::DEFAULT_BASE_URL.to_string());
    let prefs_file =
        env::var("DARBITER_PREFS_FILE").unwrap_or_else(|_| "darbiter_prefs.json".to_string());

    let prefs = FilePrefStore::new(&prefs_file);
    info!("theme preference: {}", prefs.theme().as_str());

    let client = ApiClient::new(&base_url);
    info!("using scan service at {}", base_url);

    let rulesets = client.list_rulesets().await.unwrap_or_default();
    for ruleset in &rulesets {
        println!("ruleset: {} ({} v{})", ruleset.file, ruleset.name, ruleset.version);
    }

    let Some(scan_path) = env::args().nth(1) else {
        println!("usage: darbiter-client <path-to-scan>");
        return Ok(());
    };

    let mut session = ScanSession::new();
    session.config_mut().scan_mode = ScanMode::Path;
    session.config_mut().path = scan_path;
    if let Some(first) = rulesets.first() {
        session.config_mut().ruleset = first.file.clone();
    }

    session
        .run_scan(&client)
        .await
        .context("scan invocation failed")?;

    let result = session
        .workflow()
        .result()
        .context("scan finished without a result")?
        .clone();
    println!(
        "scan {}: {} findings, overall risk {:?}, eligibility {:?}",
        result.scan_id,
        result.risk_summary.total_findings,
        result.risk_summary.overall,
        result.eligibility
    );
    for finding in &result.findings {
        println!(
            "  [{:?}] {} at {} ({:?})",
            finding.severity, finding.label, finding.file_path, finding.category
        );
    }

    session.workflow_mut().mark_eligibility_reviewed();
    for reason in &result.decision.reasons {
        println!("  decision: {}", reason);
    }
    for policy in &result.decision.policy_references {
        println!("  policy: {}", policy);
    }

    session.workflow_mut().mark_remediation_viewed();
    for entry in merge_remediation(&result.remediation) {
        println!("  remediate {}: {}", entry.label, entry.actions.join(", "));
    }

    session.workflow_mut().unlock_reports();
    if session.workflow().expanded_step() == Some(StepId::Reports) {
        let certificate = client.certificate(&result.scan_id).await?;
        println!(
            "certificate: scope {} status {:?} issued {}",
            certificate.scope, certificate.status, certificate.issued_at
        );
        let pdf = client.summary_pdf(&result.scan_id).await?;
        println!("summary pdf: {} bytes", pdf.len());
    }

    if *session.status() == ScanStatus::Done {
        info!("workflow complete");
    }
    Ok(())
}
