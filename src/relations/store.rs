//! # In-Memory Procurement Store
//!
//! DashMap-backed implementation of the stage-link hops and the status
//! store. Stands in for the host application's persistence layer; every
//! lookup is a single read, matching the one-hop contract of
//! [`StageLinks`].

use super::links::{LinkResult, StageLinks};
use crate::state_machine::persistence::StatusStore;
use crate::status::{EntityFamily, SystemStatus};
use async_trait::async_trait;
use dashmap::DashMap;

#[derive(Debug, Clone, Copy)]
struct OrderLinks {
    purchase_request_item_id: Option<i64>,
    bidding_id: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
struct DeliveryLinks {
    purchase_request_item_id: Option<i64>,
    order_id: Option<i64>,
}

/// In-memory stage entities and their backward references.
#[derive(Debug, Default)]
pub struct ProcurementStore {
    biddings: DashMap<i64, Option<i64>>,
    contracts: DashMap<i64, Option<i64>>,
    orders: DashMap<i64, OrderLinks>,
    deliveries: DashMap<i64, DeliveryLinks>,
    invoices: DashMap<i64, Option<i64>>,
    payments: DashMap<i64, Option<i64>>,
    items: DashMap<i64, i64>,
    statuses: DashMap<(EntityFamily, i64), SystemStatus>,
}

impl ProcurementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bidding(&self, bidding_id: i64, purchase_request_id: Option<i64>) {
        self.biddings.insert(bidding_id, purchase_request_id);
    }

    pub fn add_contract(&self, contract_id: i64, bidding_id: Option<i64>) {
        self.contracts.insert(contract_id, bidding_id);
    }

    pub fn add_order(
        &self,
        order_id: i64,
        purchase_request_item_id: Option<i64>,
        bidding_id: Option<i64>,
    ) {
        self.orders.insert(
            order_id,
            OrderLinks {
                purchase_request_item_id,
                bidding_id,
            },
        );
    }

    pub fn add_delivery(
        &self,
        delivery_id: i64,
        purchase_request_item_id: Option<i64>,
        order_id: Option<i64>,
    ) {
        self.deliveries.insert(
            delivery_id,
            DeliveryLinks {
                purchase_request_item_id,
                order_id,
            },
        );
    }

    pub fn add_invoice(&self, invoice_id: i64, delivery_id: Option<i64>) {
        self.invoices.insert(invoice_id, delivery_id);
    }

    pub fn add_payment(&self, payment_id: i64, invoice_id: Option<i64>) {
        self.payments.insert(payment_id, invoice_id);
    }

    pub fn add_purchase_request_item(&self, item_id: i64, purchase_request_id: i64) {
        self.items.insert(item_id, purchase_request_id);
    }
}

#[async_trait]
impl StageLinks for ProcurementStore {
    async fn bidding_purchase_request(&self, bidding_id: i64) -> LinkResult {
        Ok(self.biddings.get(&bidding_id).and_then(|link| *link))
    }

    async fn contract_bidding(&self, contract_id: i64) -> LinkResult {
        Ok(self.contracts.get(&contract_id).and_then(|link| *link))
    }

    async fn order_purchase_request_item(&self, order_id: i64) -> LinkResult {
        Ok(self
            .orders
            .get(&order_id)
            .and_then(|links| links.purchase_request_item_id))
    }

    async fn order_bidding(&self, order_id: i64) -> LinkResult {
        Ok(self.orders.get(&order_id).and_then(|links| links.bidding_id))
    }

    async fn delivery_purchase_request_item(&self, delivery_id: i64) -> LinkResult {
        Ok(self
            .deliveries
            .get(&delivery_id)
            .and_then(|links| links.purchase_request_item_id))
    }

    async fn delivery_order(&self, delivery_id: i64) -> LinkResult {
        Ok(self
            .deliveries
            .get(&delivery_id)
            .and_then(|links| links.order_id))
    }

    async fn invoice_delivery(&self, invoice_id: i64) -> LinkResult {
        Ok(self.invoices.get(&invoice_id).and_then(|link| *link))
    }

    async fn payment_invoice(&self, payment_id: i64) -> LinkResult {
        Ok(self.payments.get(&payment_id).and_then(|link| *link))
    }

    async fn item_purchase_request(&self, item_id: i64) -> LinkResult {
        Ok(self.items.get(&item_id).map(|pr| *pr))
    }
}

#[async_trait]
impl StatusStore for ProcurementStore {
    async fn status_of(&self, family: EntityFamily, entity_id: i64) -> Option<SystemStatus> {
        self.statuses.get(&(family, entity_id)).map(|s| s.clone())
    }

    async fn set_status(&self, family: EntityFamily, entity_id: i64, status: SystemStatus) {
        self.statuses.insert((family, entity_id), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_links_read_as_none() {
        let store = ProcurementStore::new();
        store.add_bidding(1, None);
        assert_eq!(store.bidding_purchase_request(1).await.unwrap(), None);
        assert_eq!(store.bidding_purchase_request(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_status_store_round_trip() {
        let store = ProcurementStore::new();
        store
            .set_status(
                EntityFamily::Bidding,
                1,
                SystemStatus::new("BIDDING", "PENDING"),
            )
            .await;
        assert_eq!(
            store
                .status_of(EntityFamily::Bidding, 1)
                .await
                .unwrap()
                .child_code,
            "PENDING"
        );
    }
}
