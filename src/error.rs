//! # Structured Error Handling
//!
//! Error taxonomy for the workflow engine. Errors raised by the transition
//! validator and the approval engine are returned to callers; failures inside
//! the event-propagation path are contained by that layer and never surface
//! here (see [`crate::relations`] and [`crate::events`]).

use thiserror::Error;

/// Errors surfaced to callers of the workflow engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Attempted transition is not permitted by the rule table or the
    /// current state.
    #[error("illegal transition for {family}: {from} -> {to}: {reason}")]
    IllegalTransition {
        family: String,
        from: String,
        to: String,
        reason: String,
    },

    /// Template materialization found no valid approver for a step.
    #[error("no eligible approver for template step {step}: {reason}")]
    NoEligibleApprover { step: u32, reason: String },

    /// Concurrent processing of the same approval step; exactly one caller
    /// wins, the loser receives this.
    #[error("approval line {line_id} was already processed")]
    StaleApproval { line_id: i64 },

    /// Malformed input, e.g. an empty approver list.
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced entity, line, or template does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Engine configuration problem (bad catalog, bad env override).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Event-system problem reported on a caller-facing path.
    #[error("event error: {0}")]
    Event(String),
}

impl WorkflowError {
    pub fn illegal_transition(
        family: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::IllegalTransition {
            family: family.into(),
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
