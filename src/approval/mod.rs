// Approval-line workflow: ordered, role/level-gated sequential approval
// attached to a purchase request.

pub mod engine;
pub mod line;
pub mod template;

pub use engine::{ApprovalAction, ApprovalEngine};
pub use line::{ApprovalLine, ApprovalStepStatus};
pub use template::{ApprovalTemplate, ApprovalTemplateStep, StepAssignee};
