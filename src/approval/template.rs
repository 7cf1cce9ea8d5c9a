//! # Approval Templates
//!
//! Reusable blueprints for approval lines. Each step declares either a
//! department with an inclusive level range, or a special assignee role
//! (the requester). Step numbers are contiguous from 1.

use crate::error::{Result, WorkflowError};
use serde::{Deserialize, Serialize};

/// Who a template step is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum StepAssignee {
    /// The most senior active member of the department within the
    /// inclusive level range.
    Department {
        department: String,
        min_level: u8,
        max_level: u8,
    },
    /// The member who submitted the purchase request.
    Requester,
}

/// One step of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalTemplateStep {
    pub step: u32,
    pub assignee: StepAssignee,
    pub description: String,
}

/// Ordered blueprint used to materialize approval lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalTemplate {
    pub id: i64,
    pub name: String,
    pub steps: Vec<ApprovalTemplateStep>,
}

impl ApprovalTemplate {
    /// Validate the contiguous-steps-from-1 invariant and level ranges.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(WorkflowError::validation(format!(
                "template {} has no steps",
                self.id
            )));
        }
        for (index, step) in self.steps.iter().enumerate() {
            let expected = index as u32 + 1;
            if step.step != expected {
                return Err(WorkflowError::validation(format!(
                    "template {} steps must be contiguous from 1: found {} at position {}",
                    self.id, step.step, expected
                )));
            }
            if let StepAssignee::Department {
                min_level,
                max_level,
                department,
            } = &step.assignee
            {
                if min_level > max_level {
                    return Err(WorkflowError::validation(format!(
                        "template {} step {}: empty level range [{min_level}, {max_level}] for {department}",
                        self.id, step.step
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn department_step(step: u32, department: &str) -> ApprovalTemplateStep {
        ApprovalTemplateStep {
            step,
            assignee: StepAssignee::Department {
                department: department.to_string(),
                min_level: 3,
                max_level: 6,
            },
            description: format!("{department} review"),
        }
    }

    #[test]
    fn test_valid_template() {
        let template = ApprovalTemplate {
            id: 1,
            name: "standard".to_string(),
            steps: vec![
                ApprovalTemplateStep {
                    step: 1,
                    assignee: StepAssignee::Requester,
                    description: "requester sign-off".to_string(),
                },
                department_step(2, "purchasing"),
            ],
        };
        template.validate().unwrap();
    }

    #[test]
    fn test_non_contiguous_steps_rejected() {
        let template = ApprovalTemplate {
            id: 1,
            name: "bad".to_string(),
            steps: vec![department_step(1, "purchasing"), department_step(3, "finance")],
        };
        assert!(matches!(
            template.validate(),
            Err(WorkflowError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_level_range_rejected() {
        let template = ApprovalTemplate {
            id: 1,
            name: "bad".to_string(),
            steps: vec![ApprovalTemplateStep {
                step: 1,
                assignee: StepAssignee::Department {
                    department: "finance".to_string(),
                    min_level: 5,
                    max_level: 3,
                },
                description: "finance review".to_string(),
            }],
        };
        assert!(template.validate().is_err());
    }
}
