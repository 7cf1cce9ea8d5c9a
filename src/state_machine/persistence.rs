//! # Status Persistence Seam
//!
//! Storage trait for the per-entity `SystemStatus` value. The engine only
//! reads and wholesale-replaces statuses; what backs the store is the host
//! application's concern.

use crate::status::{EntityFamily, SystemStatus};
use async_trait::async_trait;
use dashmap::DashMap;

/// Read/replace access to the status attached to an entity instance.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Current status, `None` if the entity is unknown.
    async fn status_of(&self, family: EntityFamily, entity_id: i64) -> Option<SystemStatus>;

    /// Replace the entity's status wholesale.
    async fn set_status(&self, family: EntityFamily, entity_id: i64, status: SystemStatus);
}

/// DashMap-backed status store.
#[derive(Debug, Default)]
pub struct InMemoryStatusStore {
    statuses: DashMap<(EntityFamily, i64), SystemStatus>,
}

impl InMemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    async fn status_of(&self, family: EntityFamily, entity_id: i64) -> Option<SystemStatus> {
        self.statuses.get(&(family, entity_id)).map(|s| s.clone())
    }

    async fn set_status(&self, family: EntityFamily, entity_id: i64, status: SystemStatus) {
        self.statuses.insert((family, entity_id), status);
    }
}
