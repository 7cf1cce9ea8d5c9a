// Status model for procurement workflow entities
//
// Provides the immutable status catalog shared by every entity family, the
// per-entity SystemStatus value, and the append-only status history trail.

pub mod catalog;
pub mod family;
pub mod history;
pub mod system_status;

pub use catalog::{StatusCatalog, StatusCatalogBuilder, StatusDefinition};
pub use family::EntityFamily;
pub use history::{InMemoryHistoryStore, StatusHistory, StatusHistoryStore};
pub use system_status::SystemStatus;
