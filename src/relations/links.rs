//! # Stage Link Reads
//!
//! Read-only, single-hop foreign-key lookups between stage entities. Each
//! method is one read; `Ok(None)` means the link is absent (null foreign key
//! or deleted parent), `Err` means the read itself failed. The resolver
//! degrades both to "no purchase request id"; errors never escape the
//! resolution path.

use async_trait::async_trait;
use thiserror::Error;

/// A failed link read (storage unavailable, corrupt reference).
#[derive(Debug, Clone, Error)]
#[error("link read failed: {0}")]
pub struct LinkError(pub String);

pub type LinkResult = Result<Option<i64>, LinkError>;

/// Single-read backward hops toward the purchase request.
#[async_trait]
pub trait StageLinks: Send + Sync {
    /// Bidding → purchase request (direct reference).
    async fn bidding_purchase_request(&self, bidding_id: i64) -> LinkResult;

    /// Contract → bidding.
    async fn contract_bidding(&self, contract_id: i64) -> LinkResult;

    /// Order → purchase-request item (direct shortcut, when present).
    async fn order_purchase_request_item(&self, order_id: i64) -> LinkResult;

    /// Order → bidding (fallback path).
    async fn order_bidding(&self, order_id: i64) -> LinkResult;

    /// Delivery → purchase-request item (direct shortcut, when present).
    async fn delivery_purchase_request_item(&self, delivery_id: i64) -> LinkResult;

    /// Delivery → order (fallback path).
    async fn delivery_order(&self, delivery_id: i64) -> LinkResult;

    /// Invoice → delivery.
    async fn invoice_delivery(&self, invoice_id: i64) -> LinkResult;

    /// Payment → invoice.
    async fn payment_invoice(&self, payment_id: i64) -> LinkResult;

    /// Purchase-request item → purchase request.
    async fn item_purchase_request(&self, item_id: i64) -> LinkResult;
}
