//! # Stage Creation Records
//!
//! Typed views over the results of the five stage-creation operations plus
//! payment completion. Each field the observer needs is an explicit
//! `Option`: an absent entity id aborts interception silently, an absent
//! correlating id falls back to relation resolution.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiddingCreatedRecord {
    pub id: Option<i64>,
    pub purchase_request_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractCreatedRecord {
    pub id: Option<i64>,
    pub bidding_id: Option<i64>,
    pub purchase_request_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCreatedRecord {
    pub id: Option<i64>,
    pub bidding_id: Option<i64>,
    pub purchase_request_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryCreatedRecord {
    pub id: Option<i64>,
    pub order_id: Option<i64>,
    pub purchase_request_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCreatedRecord {
    pub id: Option<i64>,
    pub delivery_id: Option<i64>,
    pub purchase_request_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentCompletedRecord {
    pub id: Option<i64>,
    pub invoice_id: Option<i64>,
    pub purchase_request_id: Option<i64>,
}
