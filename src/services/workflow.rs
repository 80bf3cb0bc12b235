use crate::models::scan::ScanResult;
use log::debug;

/// The fixed, ordered steps of the certification workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Intake,
    Findings,
    Eligibility,
    Remediation,
    Reports,
}

pub struct StepInfo {
    pub id: StepId,
    pub title: &'static str,
}

pub const STEPS: [StepInfo; 5] = [
    StepInfo { id: StepId::Intake, title: "Intake & Configuration" },
    StepInfo { id: StepId::Findings, title: "Findings Summary" },
    StepInfo { id: StepId::Eligibility, title: "Eligibility Decision" },
    StepInfo { id: StepId::Remediation, title: "Remediation Guidance" },
    StepInfo { id: StepId::Reports, title: "Certification & Reports" },
];

fn step_index(id: StepId) -> usize {
    STEPS.iter().position(|s| s.id == id).unwrap_or(0)
}

/// Monotone acknowledgement flags. Once set, a flag only clears on a full
/// workflow reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressFlags {
    pub eligibility_checked: bool,
    pub remediation_viewed: bool,
    pub reports_unlocked: bool,
}

/// Step-gating state machine over the workflow.
///
/// Reachability is a pure function of the installed scan result and the
/// progress flags; because each flag is only set by the action taken on the
/// step before it, the reachable set is always a prefix of the step order.
#[derive(Debug)]
pub struct WorkflowController {
    expanded: Option<StepId>,
    flags: ProgressFlags,
    result: Option<ScanResult>,
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowController {
    pub fn new() -> Self {
        Self {
            expanded: Some(StepId::Intake),
            flags: ProgressFlags::default(),
            result: None,
        }
    }

    pub fn expanded_step(&self) -> Option<StepId> {
        self.expanded
    }

    pub fn flags(&self) -> ProgressFlags {
        self.flags
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    /// Whether a step may currently be opened. Deterministic in the scan
    /// result presence and the progress flags.
    pub fn can_open(&self, step: StepId) -> bool {
        match step {
            StepId::Intake => true,
            StepId::Findings => self.result.is_some(),
            StepId::Eligibility => self.flags.eligibility_checked,
            StepId::Remediation => self.flags.remediation_viewed,
            StepId::Reports => self.flags.reports_unlocked,
        }
    }

    /// Gated toggle: opening the already-expanded step collapses it,
    /// opening another expands it. Ungated steps are ignored.
    pub fn open(&mut self, step: StepId) {
        if !self.can_open(step) {
            debug!("step {:?} is gated, ignoring open", step);
            return;
        }
        self.expanded = if self.expanded == Some(step) {
            None
        } else {
            Some(step)
        };
    }

    /// Expands the next openable step after the current one, skipping any
    /// that are still gated. No openable successor leaves state unchanged.
    pub fn advance(&mut self) {
        let from = self.expanded.map(step_index).map_or(0, |i| i + 1);
        for step in &STEPS[from.min(STEPS.len())..] {
            if self.can_open(step.id) {
                self.expanded = Some(step.id);
                return;
            }
        }
    }

    /// Expands the previous openable step before the current one. With
    /// everything collapsed there is no "previous", so nothing happens.
    pub fn retreat(&mut self) {
        let Some(current) = self.expanded else {
            return;
        };
        for step in STEPS[..step_index(current)].iter().rev() {
            if self.can_open(step.id) {
                self.expanded = Some(step.id);
                return;
            }
        }
    }

    /// Installs a fresh scan result and jumps straight to the findings
    /// step. Replaces any previous result wholesale.
    pub fn complete_scan(&mut self, result: ScanResult) {
        debug!("scan {} complete, opening findings", result.scan_id);
        self.result = Some(result);
        self.expanded = Some(StepId::Findings);
    }

    /// Each acknowledgement sets its monotone flag and jumps straight to
    /// the step it just unlocked, regardless of what was expanded before.
    pub fn mark_eligibility_reviewed(&mut self) {
        self.flags.eligibility_checked = true;
        self.expanded = Some(StepId::Eligibility);
    }

    pub fn mark_remediation_viewed(&mut self) {
        self.flags.remediation_viewed = true;
        self.expanded = Some(StepId::Remediation);
    }

    pub fn unlock_reports(&mut self) {
        self.flags.reports_unlocked = true;
        self.expanded = Some(StepId::Reports);
    }

    /// Back to the initial state: result discarded, flags cleared, intake
    /// expanded.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scan::{
        Eligibility, EligibilityDecision, RiskLevel, RiskSummary, ScanResult,
    };
    use chrono::Utc;

    fn sample_result() -> ScanResult {
        ScanResult {
            scan_id: "scan-1".to_string(),
            ruleset: "combined_baseline.yaml".to_string(),
            usage: None,
            started_at: Utc::now(),
            finished_at: Utc::now(),
            findings: vec![],
            risk_summary: RiskSummary {
                total_findings: 0,
                critical: 0,
                high: 0,
                medium: 0,
                low: 0,
                overall: RiskLevel::Low,
            },
            eligibility: Eligibility::AiSafe,
            decision: EligibilityDecision {
                status: Eligibility::AiSafe,
                reasons: vec![],
                policy_references: vec![],
            },
            remediation: vec![],
        }
    }

    #[test]
    fn only_intake_is_reachable_initially() {
        let workflow = WorkflowController::new();
        assert!(workflow.can_open(StepId::Intake));
        assert!(!workflow.can_open(StepId::Findings));
        assert!(!workflow.can_open(StepId::Eligibility));
        assert!(!workflow.can_open(StepId::Remediation));
        assert!(!workflow.can_open(StepId::Reports));
    }

    #[test]
    fn completing_a_scan_unlocks_and_opens_findings() {
        let mut workflow = WorkflowController::new();
        workflow.complete_scan(sample_result());
        assert!(workflow.can_open(StepId::Findings));
        assert_eq!(workflow.expanded_step(), Some(StepId::Findings));
        // Later steps still gated until acknowledged.
        assert!(!workflow.can_open(StepId::Eligibility));
    }

    #[test]
    fn open_toggles_and_is_idempotent_in_pairs() {
        let mut workflow = WorkflowController::new();
        let before = workflow.expanded_step();
        workflow.open(StepId::Intake);
        workflow.open(StepId::Intake);
        assert_eq!(workflow.expanded_step(), before);

        workflow.open(StepId::Intake);
        assert_eq!(workflow.expanded_step(), None);
    }

    #[test]
    fn gated_open_is_a_no_op() {
        let mut workflow = WorkflowController::new();
        workflow.open(StepId::Reports);
        assert_eq!(workflow.expanded_step(), Some(StepId::Intake));
    }

    #[test]
    fn advance_skips_gated_steps() {
        let mut workflow = WorkflowController::new();
        workflow.complete_scan(sample_result());
        workflow.open(StepId::Intake);
        assert_eq!(workflow.expanded_step(), Some(StepId::Intake));

        // Findings is open but eligibility onwards is gated, so advancing
        // twice sticks at findings.
        workflow.advance();
        assert_eq!(workflow.expanded_step(), Some(StepId::Findings));
        workflow.advance();
        assert_eq!(workflow.expanded_step(), Some(StepId::Findings));
    }

    #[test]
    fn retreat_moves_to_previous_openable_step() {
        let mut workflow = WorkflowController::new();
        workflow.complete_scan(sample_result());
        workflow.retreat();
        assert_eq!(workflow.expanded_step(), Some(StepId::Intake));
        // Nothing before intake.
        workflow.retreat();
        assert_eq!(workflow.expanded_step(), Some(StepId::Intake));
    }

    #[test]
    fn acknowledgements_walk_the_workflow_forward() {
        let mut workflow = WorkflowController::new();
        workflow.complete_scan(sample_result());

        workflow.mark_eligibility_reviewed();
        assert_eq!(workflow.expanded_step(), Some(StepId::Eligibility));

        workflow.mark_remediation_viewed();
        assert_eq!(workflow.expanded_step(), Some(StepId::Remediation));

        workflow.unlock_reports();
        assert_eq!(workflow.expanded_step(), Some(StepId::Reports));
    }

    #[test]
    fn acknowledgement_opens_its_step_even_when_collapsed() {
        let mut workflow = WorkflowController::new();
        workflow.complete_scan(sample_result());
        workflow.open(StepId::Findings);
        assert_eq!(workflow.expanded_step(), None);

        workflow.mark_eligibility_reviewed();
        assert_eq!(workflow.expanded_step(), Some(StepId::Eligibility));
        assert!(workflow.can_open(StepId::Eligibility));
    }

    #[test]
    fn reachable_steps_form_a_prefix_of_the_order() {
        let mut workflow = WorkflowController::new();
        workflow.complete_scan(sample_result());
        workflow.mark_eligibility_reviewed();
        workflow.mark_remediation_viewed();
        workflow.unlock_reports();

        let mut seen_gated = false;
        for step in &STEPS {
            let open = workflow.can_open(step.id);
            assert!(!(seen_gated && open), "gap in reachable prefix at {:?}", step.id);
            seen_gated |= !open;
        }
    }

    #[test]
    fn can_open_is_monotone_in_the_flags() {
        let mut workflow = WorkflowController::new();
        workflow.complete_scan(sample_result());

        let reachable_before: Vec<bool> =
            STEPS.iter().map(|s| workflow.can_open(s.id)).collect();
        workflow.mark_eligibility_reviewed();
        workflow.mark_remediation_viewed();
        for (step, was_open) in STEPS.iter().zip(reachable_before) {
            if was_open {
                assert!(workflow.can_open(step.id));
            }
        }
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut workflow = WorkflowController::new();
        workflow.complete_scan(sample_result());
        workflow.mark_eligibility_reviewed();
        workflow.reset();

        assert_eq!(workflow.expanded_step(), Some(StepId::Intake));
        assert!(workflow.result().is_none());
        assert_eq!(workflow.flags(), ProgressFlags::default());
        assert!(!workflow.can_open(StepId::Findings));
    }
}
