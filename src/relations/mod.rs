// Relation resolution: backward graph walk from any downstream stage
// entity to the originating purchase-request id.

pub mod links;
pub mod resolver;
pub mod store;

pub use links::{LinkError, StageLinks};
pub use resolver::{RelationResolver, Stage};
pub use store::ProcurementStore;
