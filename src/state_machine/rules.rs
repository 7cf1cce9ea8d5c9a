//! # Transition Rules
//!
//! Declared transition rules per entity family, looked up by
//! `(family, from)`. Conditional rules evaluate against a caller-supplied
//! [`TransitionContext`]; an unevaluable condition denies the transition.

use crate::error::{Result, WorkflowError};
use crate::status::{EntityFamily, StatusCatalog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a transition is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalType {
    /// Performed by the engine itself as part of a pipeline advance.
    Auto,
    /// Requires an explicit operator action.
    Manual,
    /// Allowed only when the rule's condition evaluates to true.
    Conditional,
}

/// Declarative condition attached to a `Conditional` rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum TransitionCondition {
    /// All approval lines of the owning purchase request are approved.
    ApprovalsComplete,
    /// The transaction amount does not exceed the given limit.
    AmountAtMost(i64),
    /// The stage deadline has not passed at evaluation time.
    DeadlineNotPassed,
}

/// Context supplied by the caller for conditional evaluation. Absent fields
/// make the condition unevaluable, which denies the transition.
#[derive(Debug, Clone, Default)]
pub struct TransitionContext {
    pub amount: Option<i64>,
    pub approvals_complete: Option<bool>,
    pub deadline: Option<DateTime<Utc>>,
}

impl TransitionCondition {
    /// Evaluate against the context; `None` means unevaluable.
    pub fn evaluate(&self, ctx: &TransitionContext) -> Option<bool> {
        match self {
            Self::ApprovalsComplete => ctx.approvals_complete,
            Self::AmountAtMost(limit) => ctx.amount.map(|amount| amount <= *limit),
            Self::DeadlineNotPassed => ctx.deadline.map(|deadline| Utc::now() <= deadline),
        }
    }
}

/// One declared transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRule {
    pub family: EntityFamily,
    pub from: String,
    pub to: String,
    pub approval_type: ApprovalType,
    pub condition: Option<TransitionCondition>,
}

/// Rule table, looked up by `(family, from)`.
#[derive(Debug, Clone, Default)]
pub struct TransitionRuleSet {
    rules: HashMap<(EntityFamily, String), Vec<TransitionRule>>,
}

impl TransitionRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: TransitionRule) -> &mut Self {
        self.rules
            .entry((rule.family, rule.from.clone()))
            .or_default()
            .push(rule);
        self
    }

    fn allow(&mut self, family: EntityFamily, from: &str, to: &str, approval_type: ApprovalType) {
        self.add(TransitionRule {
            family,
            from: from.to_string(),
            to: to.to_string(),
            approval_type,
            condition: None,
        });
    }

    fn allow_if(
        &mut self,
        family: EntityFamily,
        from: &str,
        to: &str,
        condition: TransitionCondition,
    ) {
        self.add(TransitionRule {
            family,
            from: from.to_string(),
            to: to.to_string(),
            approval_type: ApprovalType::Conditional,
            condition: Some(condition),
        });
    }

    /// Find the rule matching `(family, from, to)`, if any.
    pub fn find(&self, family: EntityFamily, from: &str, to: &str) -> Option<&TransitionRule> {
        self.rules
            .get(&(family, from.to_string()))
            .and_then(|rules| rules.iter().find(|r| r.to == to))
    }

    /// All rules leaving `(family, from)`.
    pub fn from_status(&self, family: EntityFamily, from: &str) -> &[TransitionRule] {
        self.rules
            .get(&(family, from.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// No rule may leave a terminal definition; catalog codes must exist.
    pub fn validate(&self, catalog: &StatusCatalog) -> Result<()> {
        for rules in self.rules.values() {
            for rule in rules {
                let from_def = catalog.definition(rule.family, &rule.from).ok_or_else(|| {
                    WorkflowError::Configuration(format!(
                        "rule references unknown status {} in family {}",
                        rule.from, rule.family
                    ))
                })?;
                if from_def.is_terminal {
                    return Err(WorkflowError::Configuration(format!(
                        "rule leaves terminal status {} in family {}",
                        rule.from, rule.family
                    )));
                }
                if catalog.definition(rule.family, &rule.to).is_none() {
                    return Err(WorkflowError::Configuration(format!(
                        "rule references unknown status {} in family {}",
                        rule.to, rule.family
                    )));
                }
            }
        }
        Ok(())
    }

    /// Canonical rule table for the procurement pipeline.
    pub fn standard() -> Self {
        let mut set = Self::new();

        let bd = EntityFamily::Bidding;
        set.allow(bd, "PENDING", "ONGOING", ApprovalType::Manual);
        set.allow(bd, "PENDING", "CANCELED", ApprovalType::Manual);
        set.allow(bd, "ONGOING", "CLOSED", ApprovalType::Manual);
        set.allow(bd, "ONGOING", "CANCELED", ApprovalType::Manual);

        let bc = EntityFamily::BiddingContract;
        set.allow(bc, "DRAFT", "IN_PROGRESS", ApprovalType::Manual);
        set.allow(bc, "DRAFT", "CANCELED", ApprovalType::Manual);
        set.allow(bc, "IN_PROGRESS", "CLOSED", ApprovalType::Manual);
        set.allow(bc, "IN_PROGRESS", "CANCELED", ApprovalType::Manual);

        // Strictly linear request pipeline; leaving REQUESTED forward
        // requires the approval workflow to have finished.
        let pr = EntityFamily::PurchaseRequest;
        set.allow_if(pr, "REQUESTED", "RECEIVED", TransitionCondition::ApprovalsComplete);
        set.allow(pr, "REQUESTED", "REJECTED", ApprovalType::Manual);
        set.allow(pr, "RECEIVED", "VENDOR_SELECTION", ApprovalType::Auto);
        set.allow(pr, "VENDOR_SELECTION", "CONTRACT_PENDING", ApprovalType::Auto);
        set.allow(pr, "CONTRACT_PENDING", "INSPECTION", ApprovalType::Auto);
        set.allow(pr, "INSPECTION", "INVOICE_ISSUED", ApprovalType::Auto);
        set.allow(pr, "INVOICE_ISSUED", "PAYMENT_COMPLETED", ApprovalType::Auto);

        let sp = EntityFamily::Supplier;
        set.allow(sp, "PENDING", "APPROVED", ApprovalType::Manual);
        set.allow(sp, "PENDING", "REJECTED", ApprovalType::Manual);
        set.allow(sp, "PENDING", "SUSPENDED", ApprovalType::Manual);
        set.allow(sp, "PENDING", "BLACKLIST", ApprovalType::Manual);
        set.allow(sp, "APPROVED", "SUSPENDED", ApprovalType::Manual);
        set.allow(sp, "APPROVED", "BLACKLIST", ApprovalType::Manual);

        let iv = EntityFamily::Invoice;
        set.allow(iv, "ISSUED", "VERIFIED", ApprovalType::Manual);
        set.allow(iv, "ISSUED", "REJECTED", ApprovalType::Manual);

        let py = EntityFamily::Payment;
        set.allow(py, "PENDING", "COMPLETED", ApprovalType::Manual);
        set.allow(py, "PENDING", "CANCELED", ApprovalType::Manual);

        set
    }
}

/// Linear purchase-request progression used by the "next status" helper.
pub const PURCHASE_REQUEST_FLOW: [&str; 7] = [
    "REQUESTED",
    "RECEIVED",
    "VENDOR_SELECTION",
    "CONTRACT_PENDING",
    "INSPECTION",
    "INVOICE_ISSUED",
    "PAYMENT_COMPLETED",
];

/// Next status in the linear purchase-request pipeline, `None` at the end
/// or for statuses outside the linear flow (e.g. REJECTED).
pub fn next_purchase_request_status(current: &str) -> Option<&'static str> {
    PURCHASE_REQUEST_FLOW
        .iter()
        .position(|s| *s == current)
        .and_then(|i| PURCHASE_REQUEST_FLOW.get(i + 1))
        .copied()
}
