//! # Approval Line Engine
//!
//! Ordered, level-gated sequential approval attached to a purchase request.
//! Advances step by step: approving the active step activates the next one
//! or completes the workflow; rejecting it skips the remainder and drives
//! the purchase request to its rejected status through the transition
//! validator.
//!
//! Concurrent `process_approval` calls against the same purchase request are
//! serialized on a per-request lock, preserving the one-active-step
//! invariant; the losing racer receives `StaleApproval`.

use super::line::{ApprovalLine, ApprovalStepStatus};
use super::template::{ApprovalTemplate, StepAssignee};
use crate::error::{Result, WorkflowError};
use crate::members::{Member, MemberDirectory};
use crate::state_machine::rules::TransitionContext;
use crate::state_machine::validator::StatusManager;
use crate::status::EntityFamily;
use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Action applied to the active approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    Approve,
    Reject,
}

/// Purchase-request status applied on a rejected workflow.
const REJECTED_STATUS: &str = "REJECTED";

pub struct ApprovalEngine {
    lines: DashMap<i64, ApprovalLine>,
    // line ids per purchase request, in creation (= step) order
    by_request: DashMap<i64, Vec<i64>>,
    templates: DashMap<i64, ApprovalTemplate>,
    request_locks: DashMap<i64, Arc<Mutex<()>>>,
    next_line_id: AtomicI64,
    directory: Arc<MemberDirectory>,
    status: Arc<StatusManager>,
    min_approval_level: u8,
}

impl ApprovalEngine {
    pub fn new(
        directory: Arc<MemberDirectory>,
        status: Arc<StatusManager>,
        min_approval_level: u8,
    ) -> Self {
        Self {
            lines: DashMap::new(),
            by_request: DashMap::new(),
            templates: DashMap::new(),
            request_locks: DashMap::new(),
            next_line_id: AtomicI64::new(1),
            directory,
            status,
            min_approval_level,
        }
    }

    /// Register a reusable approval template.
    pub fn register_template(&self, template: ApprovalTemplate) -> Result<()> {
        template.validate()?;
        self.templates.insert(template.id, template);
        Ok(())
    }

    /// Materialize one approval line per approver id, step numbers assigned
    /// by list order starting at 1. Any still-open lines from an earlier
    /// submission are superseded (skipped), never deleted. Only `Pending` is
    /// accepted as the initial status; step 1 is activated here, and any
    /// other starting status would break the one-active-step invariant.
    pub async fn create_approval_line(
        &self,
        purchase_request_id: i64,
        approver_ids: &[i64],
        initial_status: ApprovalStepStatus,
    ) -> Result<Vec<ApprovalLine>> {
        if approver_ids.is_empty() {
            return Err(WorkflowError::validation(
                "approver list must not be empty",
            ));
        }
        if initial_status != ApprovalStepStatus::Pending {
            return Err(WorkflowError::validation(format!(
                "approval lines must start as pending, got {initial_status}"
            )));
        }

        let lock = self.request_lock(purchase_request_id);
        let _guard = lock.lock().await;

        self.supersede_open_lines(purchase_request_id);

        let mut created = Vec::with_capacity(approver_ids.len());
        let mut line_ids = Vec::with_capacity(approver_ids.len());
        for (index, approver_id) in approver_ids.iter().enumerate() {
            let step = index as u32 + 1;
            let id = self.next_line_id.fetch_add(1, Ordering::SeqCst);
            let mut line =
                ApprovalLine::new(id, purchase_request_id, step, *approver_id, initial_status);
            // step 1 is the active step from the start
            if step == 1 {
                line.status = ApprovalStepStatus::InReview;
            }
            line_ids.push(id);
            self.lines.insert(id, line.clone());
            created.push(line);
        }
        self.by_request
            .entry(purchase_request_id)
            .or_default()
            .extend(line_ids);

        info!(
            purchase_request_id,
            steps = created.len(),
            "approval line created"
        );
        Ok(created)
    }

    /// Materialize approval lines from a registered template, resolving one
    /// approver per step from the member directory. The requester id feeds
    /// the template's `Requester` role.
    pub async fn create_from_template(
        &self,
        purchase_request_id: i64,
        template_id: i64,
        requester_id: i64,
    ) -> Result<Vec<ApprovalLine>> {
        let template = self
            .templates
            .get(&template_id)
            .map(|t| t.clone())
            .ok_or_else(|| WorkflowError::not_found(format!("template {template_id}")))?;

        let mut approver_ids = Vec::with_capacity(template.steps.len());
        for step in &template.steps {
            let approver = match &step.assignee {
                StepAssignee::Requester => requester_id,
                StepAssignee::Department {
                    department,
                    min_level,
                    max_level,
                } => self
                    .directory
                    .in_department_with_level(department, *min_level, *max_level)
                    .first()
                    .map(|m| m.id)
                    .ok_or_else(|| WorkflowError::NoEligibleApprover {
                        step: step.step,
                        reason: format!(
                            "no active member in {department} within levels [{min_level}, {max_level}]"
                        ),
                    })?,
            };
            approver_ids.push(approver);
        }

        self.create_approval_line(
            purchase_request_id,
            &approver_ids,
            ApprovalStepStatus::Pending,
        )
        .await
    }

    /// Process the active approval step.
    ///
    /// On APPROVE the next step is activated; if this was the last step,
    /// the purchase request advances to `next_status_code` (default
    /// RECEIVED) with the approvals-complete condition satisfied. On REJECT
    /// all subsequent steps are skipped and the purchase request transitions
    /// to its rejected terminal status.
    pub async fn process_approval(
        &self,
        line_id: i64,
        action: ApprovalAction,
        comment: Option<&str>,
        next_status_code: Option<&str>,
    ) -> Result<ApprovalLine> {
        let purchase_request_id = self
            .lines
            .get(&line_id)
            .map(|l| l.purchase_request_id)
            .ok_or_else(|| WorkflowError::not_found(format!("approval line {line_id}")))?;

        let lock = self.request_lock(purchase_request_id);
        let _guard = lock.lock().await;

        // re-read under the lock; a concurrent caller may have won the race
        let line = self
            .lines
            .get(&line_id)
            .map(|l| l.clone())
            .ok_or_else(|| WorkflowError::not_found(format!("approval line {line_id}")))?;

        match line.status {
            ApprovalStepStatus::InReview => {}
            ApprovalStepStatus::Pending => {
                return Err(WorkflowError::validation(format!(
                    "approval line {line_id} (step {}) is not the active step",
                    line.step
                )));
            }
            _ => return Err(WorkflowError::StaleApproval { line_id }),
        }

        // The purchase-request transition runs before any line mutation:
        // if it fails, the active step stays IN_REVIEW and the workflow is
        // still processable. Line mutations themselves cannot fail here
        // since every id was re-read under the lock.
        let updated = match action {
            ApprovalAction::Approve => {
                match self.next_open_line(purchase_request_id, line.step) {
                    Some(next_id) => {
                        let updated =
                            self.mutate_line(line_id, ApprovalStepStatus::Approved, comment)?;
                        self.activate_line(next_id)?;
                        updated
                    }
                    None => {
                        self.complete_workflow(purchase_request_id, &line, next_status_code)
                            .await?;
                        self.mutate_line(line_id, ApprovalStepStatus::Approved, comment)?
                    }
                }
            }
            ApprovalAction::Reject => {
                self.status
                    .change_status(
                        EntityFamily::PurchaseRequest,
                        purchase_request_id,
                        REJECTED_STATUS,
                        &format!("approver:{}", line.approver_id),
                        Some("approval rejected"),
                    )
                    .await?;
                let updated =
                    self.mutate_line(line_id, ApprovalStepStatus::Rejected, comment)?;
                self.skip_open_lines_after(purchase_request_id, line.step);
                updated
            }
        };

        info!(
            line_id,
            purchase_request_id,
            step = line.step,
            action = ?action,
            "approval processed"
        );
        Ok(updated)
    }

    /// Approval lines for one purchase request, ordered by step.
    pub fn approval_lines(&self, purchase_request_id: i64) -> Vec<ApprovalLine> {
        let mut lines: Vec<ApprovalLine> = self
            .by_request
            .get(&purchase_request_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.lines.get(id).map(|l| l.clone()))
                    .collect()
            })
            .unwrap_or_default();
        lines.sort_by_key(|l| (l.step, l.id));
        lines
    }

    /// All open lines (pending or in review) across requests.
    pub fn pending_approvals(&self) -> Vec<ApprovalLine> {
        self.filtered(|l| l.status.is_open())
    }

    /// All settled lines (approved, rejected, or skipped) across requests.
    pub fn completed_approvals(&self) -> Vec<ApprovalLine> {
        self.filtered(|l| !l.status.is_open())
    }

    /// The single active line for a request, if the workflow is running.
    pub fn active_line(&self, purchase_request_id: i64) -> Option<ApprovalLine> {
        self.approval_lines(purchase_request_id)
            .into_iter()
            .find(|l| l.status.is_active())
    }

    /// Members whose organizational level meets the global approval policy
    /// minimum. Template steps carry their own ranges and do not consult
    /// this.
    pub fn eligible_approvers(&self) -> Vec<Member> {
        self.directory.at_or_above_level(self.min_approval_level)
    }

    fn filtered(&self, predicate: impl Fn(&ApprovalLine) -> bool) -> Vec<ApprovalLine> {
        let mut lines: Vec<ApprovalLine> = self
            .lines
            .iter()
            .filter(|l| predicate(l))
            .map(|l| l.clone())
            .collect();
        lines.sort_by_key(|l| (l.purchase_request_id, l.step, l.id));
        lines
    }

    fn request_lock(&self, purchase_request_id: i64) -> Arc<Mutex<()>> {
        self.request_locks
            .entry(purchase_request_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn mutate_line(
        &self,
        line_id: i64,
        status: ApprovalStepStatus,
        comment: Option<&str>,
    ) -> Result<ApprovalLine> {
        let mut entry = self
            .lines
            .get_mut(&line_id)
            .ok_or_else(|| WorkflowError::not_found(format!("approval line {line_id}")))?;
        entry.status = status;
        entry.approved_at = Some(Utc::now());
        entry.comment = comment.map(str::to_string);
        Ok(entry.clone())
    }

    fn activate_line(&self, line_id: i64) -> Result<()> {
        let mut entry = self
            .lines
            .get_mut(&line_id)
            .ok_or_else(|| WorkflowError::not_found(format!("approval line {line_id}")))?;
        entry.status = ApprovalStepStatus::InReview;
        Ok(())
    }

    fn next_open_line(&self, purchase_request_id: i64, after_step: u32) -> Option<i64> {
        self.approval_lines(purchase_request_id)
            .into_iter()
            .find(|l| l.step > after_step && l.status == ApprovalStepStatus::Pending)
            .map(|l| l.id)
    }

    fn skip_open_lines_after(&self, purchase_request_id: i64, after_step: u32) {
        for line in self.approval_lines(purchase_request_id) {
            if line.step > after_step && line.status.is_open() {
                if let Some(mut entry) = self.lines.get_mut(&line.id) {
                    entry.status = ApprovalStepStatus::Skipped;
                }
            }
        }
    }

    fn supersede_open_lines(&self, purchase_request_id: i64) {
        for line in self.approval_lines(purchase_request_id) {
            if line.status.is_open() {
                if let Some(mut entry) = self.lines.get_mut(&line.id) {
                    entry.status = ApprovalStepStatus::Skipped;
                }
            }
        }
    }

    async fn complete_workflow(
        &self,
        purchase_request_id: i64,
        last_line: &ApprovalLine,
        next_status_code: Option<&str>,
    ) -> Result<()> {
        let to_code = next_status_code.unwrap_or("RECEIVED");
        let ctx = TransitionContext {
            approvals_complete: Some(true),
            ..Default::default()
        };
        self.status
            .change_status_with(
                EntityFamily::PurchaseRequest,
                purchase_request_id,
                to_code,
                &format!("approver:{}", last_line.approver_id),
                Some("approval workflow complete"),
                &ctx,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::publisher::EventPublisher;
    use crate::state_machine::persistence::InMemoryStatusStore;
    use crate::state_machine::validator::TransitionValidator;
    use crate::status::InMemoryHistoryStore;

    fn engine() -> (ApprovalEngine, Arc<StatusManager>) {
        let status = Arc::new(StatusManager::new(
            TransitionValidator::standard(),
            Arc::new(InMemoryStatusStore::new()),
            Arc::new(InMemoryHistoryStore::new()),
            EventPublisher::new(64),
        ));
        let directory = Arc::new(MemberDirectory::new());
        directory.upsert(Member {
            id: 10,
            name: "alice".to_string(),
            department: "purchasing".to_string(),
            level: 5,
            active: true,
        });
        directory.upsert(Member {
            id: 11,
            name: "bob".to_string(),
            department: "finance".to_string(),
            level: 4,
            active: true,
        });
        directory.upsert(Member {
            id: 12,
            name: "carol".to_string(),
            department: "finance".to_string(),
            level: 2,
            active: true,
        });
        (
            ApprovalEngine::new(directory, status.clone(), 3),
            status,
        )
    }

    async fn with_request(status: &StatusManager, id: i64) {
        status
            .init_entity(EntityFamily::PurchaseRequest, id)
            .await
            .unwrap();
    }

    fn assert_single_active(engine: &ApprovalEngine, request_id: i64) {
        let active = engine
            .approval_lines(request_id)
            .into_iter()
            .filter(|l| l.status.is_active())
            .count();
        assert!(active <= 1, "more than one active step for {request_id}");
    }

    #[tokio::test]
    async fn test_empty_approver_list_rejected() {
        let (engine, _) = engine();
        let err = engine
            .create_approval_line(1, &[], ApprovalStepStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_pending_initial_status_rejected() {
        let (engine, status) = engine();
        with_request(&status, 1).await;

        for initial in [
            ApprovalStepStatus::InReview,
            ApprovalStepStatus::Approved,
            ApprovalStepStatus::Rejected,
            ApprovalStepStatus::Skipped,
        ] {
            let err = engine
                .create_approval_line(1, &[10, 11], initial)
                .await
                .unwrap_err();
            assert!(matches!(err, WorkflowError::Validation(_)), "{initial}");
        }
        // nothing was created
        assert!(engine.approval_lines(1).is_empty());
    }

    #[tokio::test]
    async fn test_failed_completion_leaves_workflow_processable() {
        // the purchase request was never initialized, so the completing
        // transition fails; the sole step must stay active
        let (engine, status) = engine();
        let lines = engine
            .create_approval_line(1, &[10], ApprovalStepStatus::Pending)
            .await
            .unwrap();

        let err = engine
            .process_approval(lines[0].id, ApprovalAction::Approve, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));
        assert_eq!(
            engine.approval_lines(1)[0].status,
            ApprovalStepStatus::InReview
        );
        assert!(engine.active_line(1).is_some());

        // once the request exists, the same approval goes through
        with_request(&status, 1).await;
        engine
            .process_approval(lines[0].id, ApprovalAction::Approve, None, None)
            .await
            .unwrap();
        assert_eq!(
            status
                .current_status(EntityFamily::PurchaseRequest, 1)
                .await
                .unwrap()
                .child_code,
            "RECEIVED"
        );
    }

    #[tokio::test]
    async fn test_failed_rejection_leaves_lines_open() {
        let (engine, status) = engine();
        let lines = engine
            .create_approval_line(1, &[10, 11], ApprovalStepStatus::Pending)
            .await
            .unwrap();

        let err = engine
            .process_approval(lines[0].id, ApprovalAction::Reject, Some("no"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));

        // no step was settled or skipped
        let all = engine.approval_lines(1);
        assert_eq!(all[0].status, ApprovalStepStatus::InReview);
        assert_eq!(all[1].status, ApprovalStepStatus::Pending);

        with_request(&status, 1).await;
        engine
            .process_approval(lines[0].id, ApprovalAction::Reject, Some("no"), None)
            .await
            .unwrap();
        assert_eq!(engine.approval_lines(1)[1].status, ApprovalStepStatus::Skipped);
    }

    #[tokio::test]
    async fn test_create_assigns_contiguous_steps_and_activates_first() {
        let (engine, status) = engine();
        with_request(&status, 1).await;

        let lines = engine
            .create_approval_line(1, &[10, 11, 12], ApprovalStepStatus::Pending)
            .await
            .unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines.iter().map(|l| l.step).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(lines[0].status, ApprovalStepStatus::InReview);
        assert_eq!(lines[1].status, ApprovalStepStatus::Pending);
        assert_eq!(lines[2].status, ApprovalStepStatus::Pending);
        assert_single_active(&engine, 1);
    }

    #[tokio::test]
    async fn test_approve_advances_to_next_step() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        let lines = engine
            .create_approval_line(1, &[10, 11], ApprovalStepStatus::Pending)
            .await
            .unwrap();

        let updated = engine
            .process_approval(lines[0].id, ApprovalAction::Approve, Some("ok"), None)
            .await
            .unwrap();
        assert_eq!(updated.status, ApprovalStepStatus::Approved);
        assert!(updated.approved_at.is_some());
        assert_eq!(updated.comment.as_deref(), Some("ok"));

        let active = engine.active_line(1).unwrap();
        assert_eq!(active.step, 2);
        assert_single_active(&engine, 1);
    }

    #[tokio::test]
    async fn test_final_approve_completes_workflow() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        let lines = engine
            .create_approval_line(1, &[10], ApprovalStepStatus::Pending)
            .await
            .unwrap();

        engine
            .process_approval(lines[0].id, ApprovalAction::Approve, None, None)
            .await
            .unwrap();

        assert!(engine.active_line(1).is_none());
        // purchase request advanced out of REQUESTED
        assert_eq!(
            status
                .current_status(EntityFamily::PurchaseRequest, 1)
                .await
                .unwrap()
                .child_code,
            "RECEIVED"
        );
    }

    #[tokio::test]
    async fn test_reject_skips_remainder_and_rejects_request() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        let lines = engine
            .create_approval_line(1, &[10, 11, 12], ApprovalStepStatus::Pending)
            .await
            .unwrap();

        engine
            .process_approval(lines[0].id, ApprovalAction::Approve, None, None)
            .await
            .unwrap();
        engine
            .process_approval(lines[1].id, ApprovalAction::Reject, Some("no"), None)
            .await
            .unwrap();

        let all = engine.approval_lines(1);
        assert_eq!(all[0].status, ApprovalStepStatus::Approved);
        assert_eq!(all[1].status, ApprovalStepStatus::Rejected);
        assert_eq!(all[2].status, ApprovalStepStatus::Skipped);
        assert!(engine.active_line(1).is_none());

        assert_eq!(
            status
                .current_status(EntityFamily::PurchaseRequest, 1)
                .await
                .unwrap()
                .child_code,
            "REJECTED"
        );
    }

    #[tokio::test]
    async fn test_processing_future_step_is_validation_error() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        let lines = engine
            .create_approval_line(1, &[10, 11], ApprovalStepStatus::Pending)
            .await
            .unwrap();

        let err = engine
            .process_approval(lines[1].id, ApprovalAction::Approve, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reprocessing_settled_step_is_stale() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        let lines = engine
            .create_approval_line(1, &[10, 11], ApprovalStepStatus::Pending)
            .await
            .unwrap();

        engine
            .process_approval(lines[0].id, ApprovalAction::Approve, None, None)
            .await
            .unwrap();
        let err = engine
            .process_approval(lines[0].id, ApprovalAction::Approve, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::StaleApproval { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_approvals_one_winner() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        let engine = Arc::new(engine);
        let lines = engine
            .create_approval_line(1, &[10, 11], ApprovalStepStatus::Pending)
            .await
            .unwrap();

        let a = {
            let engine = engine.clone();
            let id = lines[0].id;
            tokio::spawn(async move {
                engine
                    .process_approval(id, ApprovalAction::Approve, None, None)
                    .await
            })
        };
        let b = {
            let engine = engine.clone();
            let id = lines[0].id;
            tokio::spawn(async move {
                engine
                    .process_approval(id, ApprovalAction::Approve, None, None)
                    .await
            })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let stale = results
            .iter()
            .filter(|r| matches!(r, Err(WorkflowError::StaleApproval { .. })))
            .count();
        assert_eq!(wins, 1);
        assert_eq!(stale, 1);
        assert_single_active(&engine, 1);
    }

    #[tokio::test]
    async fn test_create_from_template_resolves_eligibility() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        engine
            .register_template(ApprovalTemplate {
                id: 7,
                name: "standard".to_string(),
                steps: vec![
                    crate::approval::template::ApprovalTemplateStep {
                        step: 1,
                        assignee: StepAssignee::Requester,
                        description: "requester sign-off".to_string(),
                    },
                    crate::approval::template::ApprovalTemplateStep {
                        step: 2,
                        assignee: StepAssignee::Department {
                            department: "finance".to_string(),
                            min_level: 3,
                            max_level: 6,
                        },
                        description: "finance review".to_string(),
                    },
                ],
            })
            .unwrap();

        let lines = engine.create_from_template(1, 7, 99).await.unwrap();
        assert_eq!(lines[0].approver_id, 99);
        // bob (level 4) is the only finance member in range
        assert_eq!(lines[1].approver_id, 11);
    }

    #[tokio::test]
    async fn test_template_without_eligible_approver_fails() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        engine
            .register_template(ApprovalTemplate {
                id: 8,
                name: "impossible".to_string(),
                steps: vec![crate::approval::template::ApprovalTemplateStep {
                    step: 1,
                    assignee: StepAssignee::Department {
                        department: "legal".to_string(),
                        min_level: 3,
                        max_level: 6,
                    },
                    description: "legal review".to_string(),
                }],
            })
            .unwrap();

        let err = engine.create_from_template(1, 8, 99).await.unwrap_err();
        assert!(matches!(err, WorkflowError::NoEligibleApprover { step: 1, .. }));
    }

    #[tokio::test]
    async fn test_eligible_approvers_respects_policy_level() {
        let (engine, _) = engine();
        let ids: Vec<i64> = engine.eligible_approvers().iter().map(|m| m.id).collect();
        // carol (level 2) is below the policy minimum of 3
        assert_eq!(ids, vec![10, 11]);
    }

    #[tokio::test]
    async fn test_pending_and_completed_queries() {
        let (engine, status) = engine();
        with_request(&status, 1).await;
        let lines = engine
            .create_approval_line(1, &[10, 11], ApprovalStepStatus::Pending)
            .await
            .unwrap();
        engine
            .process_approval(lines[0].id, ApprovalAction::Approve, None, None)
            .await
            .unwrap();

        let pending = engine.pending_approvals();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].step, 2);

        let completed = engine.completed_approvals();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].status, ApprovalStepStatus::Approved);
    }
}
