//! # Stage Completion Observer
//!
//! Cross-cutting detection of stage-completion operations, implemented as
//! explicit decorators around the stage-creation call sites rather than a
//! runtime weaving mechanism. The observed business operation is never
//! affected: an absent entity id aborts silently, a failed resolution
//! degrades to "no event", and nothing on this path propagates back into
//! the caller.

use super::publisher::EventPublisher;
use super::records::{
    BiddingCreatedRecord, ContractCreatedRecord, DeliveryCreatedRecord, InvoiceCreatedRecord,
    OrderCreatedRecord, PaymentCompletedRecord,
};
use super::types::{DomainEvent, EventEnvelope};
use crate::relations::{RelationResolver, Stage};
use std::future::Future;
use tracing::debug;

/// Typed extraction contract for a stage-creation result.
pub trait StageCompletion: Send + Sync {
    /// The pipeline stage this record completes.
    fn stage() -> Stage;

    /// Id of the newly created entity; absent means no event.
    fn entity_id(&self) -> Option<i64>;

    /// Purchase-request id carried directly on the result, if any.
    fn direct_purchase_request_id(&self) -> Option<i64>;

    /// Build the stage-specific domain event. Intermediate correlating ids
    /// (bidding, order, delivery, invoice) come off the record itself.
    fn to_event(&self, entity_id: i64, purchase_request_id: i64) -> DomainEvent;
}

/// Observes stage completions and publishes the corresponding domain
/// events with purchase-request context attached.
#[derive(Clone)]
pub struct StageCompletionObserver {
    resolver: RelationResolver,
    publisher: EventPublisher,
}

impl StageCompletionObserver {
    pub fn new(resolver: RelationResolver, publisher: EventPublisher) -> Self {
        Self {
            resolver,
            publisher,
        }
    }

    /// Observe one stage-completion record. Returns the published envelope,
    /// or `None` when interception aborted (missing id, unresolvable
    /// purchase request).
    pub async fn notify<R: StageCompletion>(&self, record: &R) -> Option<EventEnvelope> {
        let stage = R::stage();
        let Some(entity_id) = record.entity_id() else {
            debug!(stage = %stage, "stage result carries no entity id; event suppressed");
            return None;
        };

        let purchase_request_id = match record.direct_purchase_request_id() {
            Some(id) => Some(id),
            None => {
                self.resolver
                    .resolve_purchase_request_id(stage, entity_id)
                    .await
            }
        };

        let Some(purchase_request_id) = purchase_request_id else {
            debug!(
                stage = %stage,
                entity_id,
                "no purchase-request context available; event suppressed"
            );
            return None;
        };

        Some(
            self.publisher
                .publish(record.to_event(entity_id, purchase_request_id))
                .await,
        )
    }

    /// Decorator form: run the stage operation, observe a successful result,
    /// and hand the result back untouched either way.
    pub async fn observe<R, E, F, Fut>(&self, op: F) -> Result<R, E>
    where
        R: StageCompletion,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        let result = op().await;
        if let Ok(record) = &result {
            self.notify(record).await;
        }
        result
    }

    pub async fn notify_bidding_created(&self, record: &BiddingCreatedRecord) -> Option<EventEnvelope> {
        self.notify(record).await
    }

    pub async fn notify_contract_created(&self, record: &ContractCreatedRecord) -> Option<EventEnvelope> {
        self.notify(record).await
    }

    pub async fn notify_order_created(&self, record: &OrderCreatedRecord) -> Option<EventEnvelope> {
        self.notify(record).await
    }

    pub async fn notify_delivery_created(&self, record: &DeliveryCreatedRecord) -> Option<EventEnvelope> {
        self.notify(record).await
    }

    pub async fn notify_invoice_created(&self, record: &InvoiceCreatedRecord) -> Option<EventEnvelope> {
        self.notify(record).await
    }

    pub async fn notify_payment_completed(&self, record: &PaymentCompletedRecord) -> Option<EventEnvelope> {
        self.notify(record).await
    }
}

impl StageCompletion for BiddingCreatedRecord {
    fn stage() -> Stage {
        Stage::Bidding
    }

    fn entity_id(&self) -> Option<i64> {
        self.id
    }

    fn direct_purchase_request_id(&self) -> Option<i64> {
        self.purchase_request_id
    }

    fn to_event(&self, entity_id: i64, purchase_request_id: i64) -> DomainEvent {
        DomainEvent::BiddingCreated {
            bidding_id: entity_id,
            purchase_request_id,
        }
    }
}

impl StageCompletion for ContractCreatedRecord {
    fn stage() -> Stage {
        Stage::Contract
    }

    fn entity_id(&self) -> Option<i64> {
        self.id
    }

    fn direct_purchase_request_id(&self) -> Option<i64> {
        self.purchase_request_id
    }

    fn to_event(&self, entity_id: i64, purchase_request_id: i64) -> DomainEvent {
        DomainEvent::ContractCreated {
            contract_id: entity_id,
            bidding_id: self.bidding_id,
            purchase_request_id,
        }
    }
}

impl StageCompletion for OrderCreatedRecord {
    fn stage() -> Stage {
        Stage::Order
    }

    fn entity_id(&self) -> Option<i64> {
        self.id
    }

    fn direct_purchase_request_id(&self) -> Option<i64> {
        self.purchase_request_id
    }

    fn to_event(&self, entity_id: i64, purchase_request_id: i64) -> DomainEvent {
        DomainEvent::OrderCreated {
            order_id: entity_id,
            bidding_id: self.bidding_id,
            purchase_request_id,
        }
    }
}

impl StageCompletion for DeliveryCreatedRecord {
    fn stage() -> Stage {
        Stage::Delivery
    }

    fn entity_id(&self) -> Option<i64> {
        self.id
    }

    fn direct_purchase_request_id(&self) -> Option<i64> {
        self.purchase_request_id
    }

    fn to_event(&self, entity_id: i64, purchase_request_id: i64) -> DomainEvent {
        DomainEvent::DeliveryCreated {
            delivery_id: entity_id,
            order_id: self.order_id,
            purchase_request_id,
        }
    }
}

impl StageCompletion for InvoiceCreatedRecord {
    fn stage() -> Stage {
        Stage::Invoice
    }

    fn entity_id(&self) -> Option<i64> {
        self.id
    }

    fn direct_purchase_request_id(&self) -> Option<i64> {
        self.purchase_request_id
    }

    fn to_event(&self, entity_id: i64, purchase_request_id: i64) -> DomainEvent {
        DomainEvent::InvoiceCreated {
            invoice_id: entity_id,
            delivery_id: self.delivery_id,
            purchase_request_id,
        }
    }
}

impl StageCompletion for PaymentCompletedRecord {
    fn stage() -> Stage {
        Stage::Payment
    }

    fn entity_id(&self) -> Option<i64> {
        self.id
    }

    fn direct_purchase_request_id(&self) -> Option<i64> {
        self.purchase_request_id
    }

    fn to_event(&self, entity_id: i64, purchase_request_id: i64) -> DomainEvent {
        DomainEvent::PaymentCompleted {
            payment_id: entity_id,
            invoice_id: self.invoice_id,
            purchase_request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::ProcurementStore;
    use std::sync::Arc;

    fn observer() -> (StageCompletionObserver, EventPublisher) {
        let store = ProcurementStore::new();
        store.add_bidding(2, Some(7));
        store.add_order(3, None, Some(2));
        let publisher = EventPublisher::new(16);
        let observer = StageCompletionObserver::new(
            RelationResolver::new(Arc::new(store)),
            publisher.clone(),
        );
        (observer, publisher)
    }

    #[tokio::test]
    async fn test_direct_correlating_id_skips_resolution() {
        let (observer, publisher) = observer();
        let mut rx = publisher.subscribe();

        let envelope = observer
            .notify_bidding_created(&BiddingCreatedRecord {
                id: Some(99),
                purchase_request_id: Some(42),
            })
            .await
            .unwrap();
        assert_eq!(envelope.event.purchase_request_id(), Some(42));
        assert_eq!(rx.recv().await.unwrap().id, envelope.id);
    }

    #[tokio::test]
    async fn test_resolver_fallback_supplies_context() {
        let (observer, _publisher) = observer();

        let envelope = observer
            .notify_order_created(&OrderCreatedRecord {
                id: Some(3),
                bidding_id: None,
                purchase_request_id: None,
            })
            .await
            .unwrap();
        assert_eq!(envelope.event.purchase_request_id(), Some(7));
    }

    #[tokio::test]
    async fn test_missing_entity_id_suppresses_event() {
        let (observer, publisher) = observer();
        let mut rx = publisher.subscribe();

        let result = observer
            .notify_bidding_created(&BiddingCreatedRecord::default())
            .await;
        assert!(result.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unresolvable_purchase_request_suppresses_event() {
        let (observer, publisher) = observer();
        let mut rx = publisher.subscribe();

        let result = observer
            .notify_payment_completed(&PaymentCompletedRecord {
                id: Some(6),
                invoice_id: None,
                purchase_request_id: None,
            })
            .await;
        assert!(result.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_decorator_passes_result_through() {
        let (observer, publisher) = observer();
        let mut rx = publisher.subscribe();

        let result: Result<BiddingCreatedRecord, &str> = observer
            .observe(|| async {
                Ok(BiddingCreatedRecord {
                    id: Some(2),
                    purchase_request_id: None,
                })
            })
            .await;
        assert!(result.is_ok());
        assert_eq!(rx.recv().await.unwrap().event.purchase_request_id(), Some(7));

        let failed: Result<BiddingCreatedRecord, &str> =
            observer.observe(|| async { Err("boom") }).await;
        assert_eq!(failed.unwrap_err(), "boom");
        assert!(rx.try_recv().is_err());
    }
}
