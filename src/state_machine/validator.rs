//! # Transition Validator and Status Manager
//!
//! `TransitionValidator` decides transition legality from the catalog and
//! rule table. `StatusManager` applies accepted transitions: it replaces the
//! entity's status wholesale, appends exactly one history record, and
//! publishes a status-change event that is mirrored to the external channel.
//! Illegal transitions are reported to the caller, never silently coerced.

use super::persistence::StatusStore;
use super::rules::{next_purchase_request_status, TransitionContext, TransitionRuleSet};
use crate::error::{Result, WorkflowError};
use crate::events::publisher::EventPublisher;
use crate::events::types::DomainEvent;
use crate::status::{EntityFamily, StatusCatalog, StatusHistoryStore, SystemStatus};
use std::sync::Arc;
use tracing::info;

/// Decides legality of `(family, from, to)` transitions.
#[derive(Debug, Clone)]
pub struct TransitionValidator {
    catalog: Arc<StatusCatalog>,
    rules: Arc<TransitionRuleSet>,
}

impl TransitionValidator {
    pub fn new(catalog: Arc<StatusCatalog>, rules: TransitionRuleSet) -> Result<Self> {
        rules.validate(&catalog)?;
        Ok(Self {
            catalog,
            rules: Arc::new(rules),
        })
    }

    /// Validator over the canonical catalog and rule table.
    pub fn standard() -> Self {
        Self::new(
            Arc::new(StatusCatalog::standard()),
            TransitionRuleSet::standard(),
        )
        .expect("standard rules are consistent with the standard catalog")
    }

    pub fn catalog(&self) -> &StatusCatalog {
        &self.catalog
    }

    /// Whether the transition is legal, with no conditional context. A
    /// conditional rule therefore fails closed here.
    pub fn can_transition(&self, family: EntityFamily, from: &str, to: &str) -> bool {
        self.assert_transition(family, from, to, &TransitionContext::default())
            .is_ok()
    }

    /// Whether the transition is legal under the supplied context.
    pub fn can_transition_with(
        &self,
        family: EntityFamily,
        from: &str,
        to: &str,
        ctx: &TransitionContext,
    ) -> bool {
        self.assert_transition(family, from, to, ctx).is_ok()
    }

    /// Assert legality, reporting the rejection reason.
    pub fn assert_transition(
        &self,
        family: EntityFamily,
        from: &str,
        to: &str,
        ctx: &TransitionContext,
    ) -> Result<()> {
        if from == to {
            return Err(WorkflowError::illegal_transition(
                family.code(),
                from,
                to,
                "self-transitions are never permitted",
            ));
        }

        let from_def = self.catalog.definition(family, from).ok_or_else(|| {
            WorkflowError::illegal_transition(family.code(), from, to, "unknown source status")
        })?;
        if self.catalog.definition(family, to).is_none() {
            return Err(WorkflowError::illegal_transition(
                family.code(),
                from,
                to,
                "unknown target status",
            ));
        }

        if from_def.is_terminal {
            return Err(WorkflowError::illegal_transition(
                family.code(),
                from,
                to,
                "source status is terminal",
            ));
        }

        let rule = self.rules.find(family, from, to).ok_or_else(|| {
            WorkflowError::illegal_transition(family.code(), from, to, "no matching rule")
        })?;

        if let Some(condition) = &rule.condition {
            // unevaluable conditions deny the transition
            match condition.evaluate(ctx) {
                Some(true) => {}
                Some(false) => {
                    return Err(WorkflowError::illegal_transition(
                        family.code(),
                        from,
                        to,
                        "condition evaluated to false",
                    ));
                }
                None => {
                    return Err(WorkflowError::illegal_transition(
                        family.code(),
                        from,
                        to,
                        "condition not evaluable from supplied context",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Next status in the strictly linear purchase-request pipeline.
    pub fn next_status(&self, family: EntityFamily, current: &str) -> Option<SystemStatus> {
        if family != EntityFamily::PurchaseRequest {
            return None;
        }
        next_purchase_request_status(current)
            .and_then(|code| self.catalog.definition(family, code))
            .map(|def| def.status())
    }
}

/// Applies validated status changes and their side effects.
pub struct StatusManager {
    validator: TransitionValidator,
    statuses: Arc<dyn StatusStore>,
    history: Arc<dyn StatusHistoryStore>,
    publisher: EventPublisher,
}

impl StatusManager {
    pub fn new(
        validator: TransitionValidator,
        statuses: Arc<dyn StatusStore>,
        history: Arc<dyn StatusHistoryStore>,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            validator,
            statuses,
            history,
            publisher,
        }
    }

    pub fn validator(&self) -> &TransitionValidator {
        &self.validator
    }

    /// Current status of an entity, `None` if unknown.
    pub async fn current_status(
        &self,
        family: EntityFamily,
        entity_id: i64,
    ) -> Option<SystemStatus> {
        self.statuses.status_of(family, entity_id).await
    }

    /// Assign the family's initial status to a newly created entity.
    pub async fn init_entity(&self, family: EntityFamily, entity_id: i64) -> Result<SystemStatus> {
        let initial = self.validator.catalog.initial_status(family)?;
        self.statuses.set_status(family, entity_id, initial.clone()).await;
        Ok(initial)
    }

    /// Change an entity's status, with no conditional context.
    pub async fn change_status(
        &self,
        family: EntityFamily,
        entity_id: i64,
        to_code: &str,
        actor: &str,
        reason: Option<&str>,
    ) -> Result<SystemStatus> {
        self.change_status_with(
            family,
            entity_id,
            to_code,
            actor,
            reason,
            &TransitionContext::default(),
        )
        .await
    }

    /// Change an entity's status under the supplied conditional context.
    ///
    /// On acceptance: the status is replaced wholesale, one history record
    /// is appended, and a status-change event is published (in-process and
    /// mirrored externally). A rejected transition has no side effects.
    pub async fn change_status_with(
        &self,
        family: EntityFamily,
        entity_id: i64,
        to_code: &str,
        actor: &str,
        reason: Option<&str>,
        ctx: &TransitionContext,
    ) -> Result<SystemStatus> {
        let current = self
            .statuses
            .status_of(family, entity_id)
            .await
            .ok_or_else(|| {
                WorkflowError::not_found(format!("{family} entity {entity_id} has no status"))
            })?;

        self.validator
            .assert_transition(family, &current.child_code, to_code, ctx)?;

        let to_status = self
            .validator
            .catalog
            .definition(family, to_code)
            .map(|def| def.status())
            .ok_or_else(|| {
                WorkflowError::illegal_transition(
                    family.code(),
                    &current.child_code,
                    to_code,
                    "unknown target status",
                )
            })?;

        self.statuses
            .set_status(family, entity_id, to_status.clone())
            .await;
        self.history
            .append(
                family,
                entity_id,
                current.clone(),
                to_status.clone(),
                actor,
                reason,
            )
            .await;

        info!(
            family = %family,
            entity_id,
            from = %current.full_code(),
            to = %to_status.full_code(),
            actor,
            "status changed"
        );

        self.publisher
            .publish(DomainEvent::StatusChanged {
                family,
                entity_id,
                from_status: current,
                to_status: to_status.clone(),
                changed_by: actor.to_string(),
            })
            .await;

        Ok(to_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::persistence::InMemoryStatusStore;
    use crate::status::InMemoryHistoryStore;

    fn manager() -> (StatusManager, Arc<InMemoryHistoryStore>) {
        let history = Arc::new(InMemoryHistoryStore::new());
        let manager = StatusManager::new(
            TransitionValidator::standard(),
            Arc::new(InMemoryStatusStore::new()),
            history.clone(),
            EventPublisher::new(16),
        );
        (manager, history)
    }

    #[test]
    fn test_self_transition_always_rejected() {
        let validator = TransitionValidator::standard();
        for family in EntityFamily::all() {
            for def in validator.catalog().definitions(family) {
                assert!(!validator.can_transition(family, &def.child_code, &def.child_code));
            }
        }
    }

    #[test]
    fn test_bidding_machine() {
        let v = TransitionValidator::standard();
        let f = EntityFamily::Bidding;
        assert!(v.can_transition(f, "PENDING", "ONGOING"));
        assert!(v.can_transition(f, "PENDING", "CANCELED"));
        assert!(v.can_transition(f, "ONGOING", "CLOSED"));
        assert!(!v.can_transition(f, "PENDING", "CLOSED"));
        assert!(!v.can_transition(f, "ONGOING", "PENDING"));
        assert!(!v.can_transition(f, "CLOSED", "PENDING"));
        assert!(!v.can_transition(f, "CANCELED", "ONGOING"));
    }

    #[test]
    fn test_supplier_machine() {
        let v = TransitionValidator::standard();
        let f = EntityFamily::Supplier;
        assert!(v.can_transition(f, "PENDING", "APPROVED"));
        assert!(v.can_transition(f, "APPROVED", "BLACKLIST"));
        assert!(!v.can_transition(f, "REJECTED", "PENDING"));
        assert!(!v.can_transition(f, "BLACKLIST", "APPROVED"));
    }

    #[test]
    fn test_conditional_transition_fails_closed() {
        let v = TransitionValidator::standard();
        let f = EntityFamily::PurchaseRequest;
        // no context: unevaluable, denied
        assert!(!v.can_transition(f, "REQUESTED", "RECEIVED"));

        let ctx = TransitionContext {
            approvals_complete: Some(true),
            ..Default::default()
        };
        assert!(v.can_transition_with(f, "REQUESTED", "RECEIVED", &ctx));

        let ctx = TransitionContext {
            approvals_complete: Some(false),
            ..Default::default()
        };
        assert!(!v.can_transition_with(f, "REQUESTED", "RECEIVED", &ctx));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let v = TransitionValidator::standard();
        let err = v
            .assert_transition(
                EntityFamily::Bidding,
                "PENDING",
                "NOPE",
                &TransitionContext::default(),
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
    }

    #[test]
    fn test_next_status_helper() {
        let v = TransitionValidator::standard();
        assert_eq!(
            v.next_status(EntityFamily::PurchaseRequest, "REQUESTED")
                .unwrap()
                .full_code(),
            "PURCHASE_REQUEST-RECEIVED"
        );
        assert!(v.next_status(EntityFamily::PurchaseRequest, "PAYMENT_COMPLETED").is_none());
        assert!(v.next_status(EntityFamily::Bidding, "PENDING").is_none());
    }

    #[tokio::test]
    async fn test_change_status_appends_history_once() {
        let (manager, history) = manager();
        manager.init_entity(EntityFamily::Bidding, 1).await.unwrap();

        manager
            .change_status(EntityFamily::Bidding, 1, "ONGOING", "alice", None)
            .await
            .unwrap();
        assert_eq!(history.len().await, 1);

        // rejected transition leaves no trace
        let err = manager
            .change_status(EntityFamily::Bidding, 1, "PENDING", "alice", None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
        assert_eq!(history.len().await, 1);
    }

    #[tokio::test]
    async fn test_change_status_publishes_event() {
        let (manager, _history) = manager();
        manager.init_entity(EntityFamily::Bidding, 1).await.unwrap();

        let mut rx = manager.publisher.subscribe();
        manager
            .change_status(EntityFamily::Bidding, 1, "ONGOING", "alice", Some("go"))
            .await
            .unwrap();

        let envelope = rx.recv().await.unwrap();
        match envelope.event {
            DomainEvent::StatusChanged {
                family,
                entity_id,
                to_status,
                changed_by,
                ..
            } => {
                assert_eq!(family, EntityFamily::Bidding);
                assert_eq!(entity_id, 1);
                assert_eq!(to_status.full_code(), "BIDDING-ONGOING");
                assert_eq!(changed_by, "alice");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_entity_is_not_found() {
        let (manager, _) = manager();
        let err = manager
            .change_status(EntityFamily::Bidding, 99, "ONGOING", "alice", None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));
    }
}
