//! # Relation Resolver
//!
//! Backward graph walk recovering the originating purchase-request id from
//! any downstream stage entity. Resolution is best-effort, read-only, and
//! idempotent: missing links or failed reads yield `None`, never an error,
//! because resolution runs inside the event-publishing path and must not
//! abort the originating business operation.

use super::links::{LinkError, StageLinks};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// A step in the procurement pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Bidding,
    Contract,
    Order,
    Delivery,
    Invoice,
    Payment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bidding => "bidding",
            Self::Contract => "contract",
            Self::Order => "order",
            Self::Delivery => "delivery",
            Self::Invoice => "invoice",
            Self::Payment => "payment",
        };
        write!(f, "{s}")
    }
}

/// Resolves purchase-request identity for downstream stage entities.
#[derive(Clone)]
pub struct RelationResolver {
    links: Arc<dyn StageLinks>,
}

impl RelationResolver {
    pub fn new(links: Arc<dyn StageLinks>) -> Self {
        Self { links }
    }

    /// Resolve the purchase-request id behind a stage entity.
    ///
    /// Never fails: a broken or missing chain degrades to `None` with a
    /// structured log entry.
    pub async fn resolve_purchase_request_id(&self, stage: Stage, entity_id: i64) -> Option<i64> {
        match self.try_resolve(stage, entity_id).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(stage = %stage, entity_id, error = %e, "relation resolution failed");
                None
            }
        }
    }

    async fn try_resolve(&self, stage: Stage, entity_id: i64) -> Result<Option<i64>, LinkError> {
        match stage {
            Stage::Bidding => self.links.bidding_purchase_request(entity_id).await,
            Stage::Contract => {
                match self.links.contract_bidding(entity_id).await? {
                    Some(bidding_id) => self.links.bidding_purchase_request(bidding_id).await,
                    None => Ok(None),
                }
            }
            Stage::Order => {
                // direct item shortcut first, then the bidding chain
                if let Some(item_id) = self.links.order_purchase_request_item(entity_id).await? {
                    if let Some(pr) = self.links.item_purchase_request(item_id).await? {
                        return Ok(Some(pr));
                    }
                }
                match self.links.order_bidding(entity_id).await? {
                    Some(bidding_id) => self.links.bidding_purchase_request(bidding_id).await,
                    None => Ok(None),
                }
            }
            Stage::Delivery => {
                if let Some(item_id) = self.links.delivery_purchase_request_item(entity_id).await? {
                    if let Some(pr) = self.links.item_purchase_request(item_id).await? {
                        return Ok(Some(pr));
                    }
                }
                match self.links.delivery_order(entity_id).await? {
                    Some(order_id) => Box::pin(self.try_resolve(Stage::Order, order_id)).await,
                    None => Ok(None),
                }
            }
            Stage::Invoice => match self.links.invoice_delivery(entity_id).await? {
                Some(delivery_id) => Box::pin(self.try_resolve(Stage::Delivery, delivery_id)).await,
                None => Ok(None),
            },
            Stage::Payment => match self.links.payment_invoice(entity_id).await? {
                Some(invoice_id) => Box::pin(self.try_resolve(Stage::Invoice, invoice_id)).await,
                None => Ok(None),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::store::ProcurementStore;

    fn chained_store() -> ProcurementStore {
        let store = ProcurementStore::new();
        // PR 7 -> bidding 2 -> order 3 -> delivery 4 -> invoice 5 -> payment 6
        store.add_bidding(2, Some(7));
        store.add_order(3, None, Some(2));
        store.add_delivery(4, None, Some(3));
        store.add_invoice(5, Some(4));
        store.add_payment(6, Some(5));
        store
    }

    #[tokio::test]
    async fn test_direct_bidding_resolution() {
        let resolver = RelationResolver::new(Arc::new(chained_store()));
        assert_eq!(
            resolver.resolve_purchase_request_id(Stage::Bidding, 2).await,
            Some(7)
        );
    }

    #[tokio::test]
    async fn test_payment_resolves_through_full_chain() {
        let resolver = RelationResolver::new(Arc::new(chained_store()));
        assert_eq!(
            resolver.resolve_purchase_request_id(Stage::Payment, 6).await,
            Some(7)
        );
    }

    #[tokio::test]
    async fn test_delivery_falls_back_to_order_chain() {
        // delivery has no item link; the order path resolves
        let resolver = RelationResolver::new(Arc::new(chained_store()));
        assert_eq!(
            resolver.resolve_purchase_request_id(Stage::Delivery, 4).await,
            Some(7)
        );
    }

    #[tokio::test]
    async fn test_item_shortcut_takes_precedence() {
        let store = ProcurementStore::new();
        store.add_purchase_request_item(100, 9);
        store.add_order(3, Some(100), Some(2));
        // the bidding chain is broken on purpose; the shortcut still works
        let resolver = RelationResolver::new(Arc::new(store));
        assert_eq!(
            resolver.resolve_purchase_request_id(Stage::Order, 3).await,
            Some(9)
        );
    }

    #[tokio::test]
    async fn test_unknown_entity_resolves_to_none() {
        let resolver = RelationResolver::new(Arc::new(ProcurementStore::new()));
        for stage in [
            Stage::Bidding,
            Stage::Contract,
            Stage::Order,
            Stage::Delivery,
            Stage::Invoice,
            Stage::Payment,
        ] {
            assert_eq!(
                resolver.resolve_purchase_request_id(stage, 404).await,
                None
            );
        }
    }

    #[tokio::test]
    async fn test_orphaned_chain_resolves_to_none() {
        let store = ProcurementStore::new();
        store.add_payment(6, Some(5)); // invoice 5 does not exist
        let resolver = RelationResolver::new(Arc::new(store));
        assert_eq!(
            resolver.resolve_purchase_request_id(Stage::Payment, 6).await,
            None
        );
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let resolver = RelationResolver::new(Arc::new(chained_store()));
        let first = resolver.resolve_purchase_request_id(Stage::Invoice, 5).await;
        let second = resolver.resolve_purchase_request_id(Stage::Invoice, 5).await;
        assert_eq!(first, second);
        assert_eq!(first, Some(7));
    }
}
