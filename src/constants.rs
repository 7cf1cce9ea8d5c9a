//! # System Constants
//!
//! Event names, realtime topic contracts, and approval policy constants
//! shared across the engine. Status codes themselves live in the
//! [`crate::status`] catalog, never as ambient string globals.

/// Domain event names published on stage completion and status change.
pub mod events {
    pub const BIDDING_CREATED: &str = "bidding.created";
    pub const CONTRACT_CREATED: &str = "contract.created";
    pub const ORDER_CREATED: &str = "order.created";
    pub const DELIVERY_CREATED: &str = "delivery.created";
    pub const INVOICE_CREATED: &str = "invoice.created";
    pub const PAYMENT_COMPLETED: &str = "payment.completed";
    pub const STATUS_CHANGED: &str = "status.changed";
}

/// Realtime topic naming contract.
///
/// One topic per entity family + id for status updates, one shared topic for
/// dashboard-refresh signals. Payloads are the corresponding event record
/// serialized as JSON.
pub mod topics {
    use crate::status::EntityFamily;

    /// Shared topic for dashboard refresh signals.
    pub const DASHBOARD_REFRESH: &str = "dashboard/refresh";

    /// Per-entity topic for status updates, e.g. `status/BIDDING/17`.
    pub fn status_topic(family: EntityFamily, entity_id: i64) -> String {
        format!("status/{}/{entity_id}", family.code())
    }
}

/// Approval policy constants.
pub mod approval {
    /// Minimum organizational level required to appear in the
    /// template-free eligible-approver query. Template steps carry their
    /// own level ranges and are not bounded by this constant.
    pub const MIN_APPROVAL_LEVEL: u8 = 3;
}
