use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStepStatus {
    /// Waiting for earlier steps to be approved.
    Pending,
    /// The current active step; at most one per purchase request.
    InReview,
    /// Approved by its approver.
    Approved,
    /// Rejected by its approver.
    Rejected,
    /// Skipped because an earlier step was rejected.
    Skipped,
}

impl ApprovalStepStatus {
    /// Whether this step can still change.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InReview)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::InReview)
    }
}

impl fmt::Display for ApprovalStepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Skipped => "skipped",
        };
        write!(f, "{s}")
    }
}

/// One approval step bound to a purchase request.
///
/// Steps are contiguous integers starting at 1. Lines are created in a
/// batch when a request enters approval, mutated only by approval
/// processing, and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalLine {
    pub id: i64,
    pub purchase_request_id: i64,
    pub step: u32,
    pub approver_id: i64,
    pub status: ApprovalStepStatus,
    pub approved_at: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}

impl ApprovalLine {
    pub fn new(
        id: i64,
        purchase_request_id: i64,
        step: u32,
        approver_id: i64,
        status: ApprovalStepStatus,
    ) -> Self {
        Self {
            id,
            purchase_request_id,
            step,
            approver_id,
            status,
            approved_at: None,
            comment: None,
        }
    }
}
