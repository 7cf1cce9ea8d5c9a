//! # Status History
//!
//! Append-only audit trail of accepted transitions. One record per accepted
//! transition, never updated or deleted; rejected transitions leave no trace.

use super::family::EntityFamily;
use super::system_status::SystemStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// A single accepted status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistory {
    pub id: i64,
    pub family: EntityFamily,
    pub entity_id: i64,
    pub from_status: SystemStatus,
    pub to_status: SystemStatus,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    pub reason: Option<String>,
}

/// Storage seam for the audit trail.
#[async_trait]
pub trait StatusHistoryStore: Send + Sync {
    /// Append one record; assigns and returns the record id.
    async fn append(
        &self,
        family: EntityFamily,
        entity_id: i64,
        from_status: SystemStatus,
        to_status: SystemStatus,
        changed_by: &str,
        reason: Option<&str>,
    ) -> i64;

    /// All records for one entity, in append order.
    async fn history_for(&self, family: EntityFamily, entity_id: i64) -> Vec<StatusHistory>;
}

/// In-memory append-only history store.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<StatusHistory>>,
    next_id: AtomicI64,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StatusHistoryStore for InMemoryHistoryStore {
    async fn append(
        &self,
        family: EntityFamily,
        entity_id: i64,
        from_status: SystemStatus,
        to_status: SystemStatus,
        changed_by: &str,
        reason: Option<&str>,
    ) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = StatusHistory {
            id,
            family,
            entity_id,
            from_status,
            to_status,
            changed_by: changed_by.to_string(),
            changed_at: Utc::now(),
            reason: reason.map(str::to_string),
        };
        self.records.write().await.push(record);
        id
    }

    async fn history_for(&self, family: EntityFamily, entity_id: i64) -> Vec<StatusHistory> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.family == family && r.entity_id == entity_id)
            .cloned()
            .collect()
    }
}
