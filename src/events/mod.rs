// Event system: typed domain events, in-process broadcast + external
// pub/sub mirroring, stage-completion interception, and listener fan-out.

pub mod fanout;
pub mod observer;
pub mod publisher;
pub mod records;
pub mod types;

pub use fanout::{DashboardProjector, EventSubscriber, RealtimeGateway, RealtimePush, SubscriberSet};
pub use observer::{StageCompletion, StageCompletionObserver};
pub use publisher::{EventPublisher, PubSubChannel, PublishError};
pub use records::{
    BiddingCreatedRecord, ContractCreatedRecord, DeliveryCreatedRecord, InvoiceCreatedRecord,
    OrderCreatedRecord, PaymentCompletedRecord,
};
pub use types::{DomainEvent, EventEnvelope};
