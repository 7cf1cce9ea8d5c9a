//! # Domain Events
//!
//! Tagged-union event records published on stage completion and status
//! change. Events are transient: they carry the triggering entity id(s) and
//! the resolved purchase-request id, and are serialized as JSON for
//! transport to external subscribers.

use crate::constants::events as names;
use crate::status::{EntityFamily, SystemStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain events emitted by the workflow engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum DomainEvent {
    BiddingCreated {
        bidding_id: i64,
        purchase_request_id: i64,
    },
    ContractCreated {
        contract_id: i64,
        bidding_id: Option<i64>,
        purchase_request_id: i64,
    },
    OrderCreated {
        order_id: i64,
        bidding_id: Option<i64>,
        purchase_request_id: i64,
    },
    DeliveryCreated {
        delivery_id: i64,
        order_id: Option<i64>,
        purchase_request_id: i64,
    },
    InvoiceCreated {
        invoice_id: i64,
        delivery_id: Option<i64>,
        purchase_request_id: i64,
    },
    PaymentCompleted {
        payment_id: i64,
        invoice_id: Option<i64>,
        purchase_request_id: i64,
    },
    StatusChanged {
        family: EntityFamily,
        entity_id: i64,
        from_status: SystemStatus,
        to_status: SystemStatus,
        changed_by: String,
    },
}

impl DomainEvent {
    /// Fixed event-type tag used for logging and subscriber filtering.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::BiddingCreated { .. } => names::BIDDING_CREATED,
            Self::ContractCreated { .. } => names::CONTRACT_CREATED,
            Self::OrderCreated { .. } => names::ORDER_CREATED,
            Self::DeliveryCreated { .. } => names::DELIVERY_CREATED,
            Self::InvoiceCreated { .. } => names::INVOICE_CREATED,
            Self::PaymentCompleted { .. } => names::PAYMENT_COMPLETED,
            Self::StatusChanged { .. } => names::STATUS_CHANGED,
        }
    }

    /// External pub/sub channel key for this event.
    pub fn channel(&self) -> String {
        match self {
            Self::BiddingCreated { .. } => EntityFamily::Bidding.code().to_string(),
            Self::ContractCreated { .. } => EntityFamily::BiddingContract.code().to_string(),
            Self::OrderCreated { .. } => "ORDER".to_string(),
            Self::DeliveryCreated { .. } => "DELIVERY".to_string(),
            Self::InvoiceCreated { .. } => EntityFamily::Invoice.code().to_string(),
            Self::PaymentCompleted { .. } => EntityFamily::Payment.code().to_string(),
            Self::StatusChanged { family, .. } => family.code().to_string(),
        }
    }

    /// The id of the entity that triggered the event.
    pub fn entity_id(&self) -> i64 {
        match self {
            Self::BiddingCreated { bidding_id, .. } => *bidding_id,
            Self::ContractCreated { contract_id, .. } => *contract_id,
            Self::OrderCreated { order_id, .. } => *order_id,
            Self::DeliveryCreated { delivery_id, .. } => *delivery_id,
            Self::InvoiceCreated { invoice_id, .. } => *invoice_id,
            Self::PaymentCompleted { payment_id, .. } => *payment_id,
            Self::StatusChanged { entity_id, .. } => *entity_id,
        }
    }

    /// Resolved purchase-request context, if the event carries one.
    pub fn purchase_request_id(&self) -> Option<i64> {
        match self {
            Self::BiddingCreated {
                purchase_request_id,
                ..
            }
            | Self::ContractCreated {
                purchase_request_id,
                ..
            }
            | Self::OrderCreated {
                purchase_request_id,
                ..
            }
            | Self::DeliveryCreated {
                purchase_request_id,
                ..
            }
            | Self::InvoiceCreated {
                purchase_request_id,
                ..
            }
            | Self::PaymentCompleted {
                purchase_request_id,
                ..
            } => Some(*purchase_request_id),
            Self::StatusChanged { .. } => None,
        }
    }
}

/// Envelope attached to every published event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub name: String,
    pub event: DomainEvent,
    pub published_at: DateTime<Utc>,
}

impl EventEnvelope {
    pub fn new(event: DomainEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: event.event_type().to_string(),
            event,
            published_at: Utc::now(),
        }
    }
}
