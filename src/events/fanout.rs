//! # Status-Change Listener / Fan-out
//!
//! Subscribers react to domain events by refreshing read-side aggregates
//! and pushing live updates to realtime topics. One subscriber's failure is
//! logged and never blocks the others or the publisher; subscribers must
//! not assume ordering relative to each other.

use super::publisher::EventPublisher;
use super::types::{DomainEvent, EventEnvelope};
use crate::constants::topics;
use crate::status::EntityFamily;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

/// A consumer of published domain events.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    async fn handle_event(&self, envelope: &EventEnvelope) -> Result<(), SubscriberError>;

    /// Subscriber name for log attribution.
    fn subscriber_name(&self) -> &str {
        "unnamed_subscriber"
    }
}

/// Fan-out over a set of subscribers with per-subscriber failure isolation.
#[derive(Default)]
pub struct SubscriberSet {
    subscribers: RwLock<Vec<Arc<dyn EventSubscriber>>>,
}

impl SubscriberSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, subscriber: Arc<dyn EventSubscriber>) {
        self.subscribers.write().await.push(subscriber);
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Deliver one envelope to every subscriber. Failures are logged per
    /// subscriber and do not stop delivery to the rest.
    pub async fn notify_all(&self, envelope: &EventEnvelope) {
        let subscribers = self.subscribers.read().await.clone();
        for subscriber in subscribers {
            if let Err(e) = subscriber.handle_event(envelope).await {
                warn!(
                    subscriber = subscriber.subscriber_name(),
                    event = %envelope.name,
                    error = %e,
                    "event subscriber failed"
                );
            }
        }
    }

    /// Drain the publisher's broadcast stream on a background task. Lagged
    /// receivers drop events (at-most-once); the task ends when the
    /// publisher is gone.
    pub fn spawn_listener(self: Arc<Self>, publisher: &EventPublisher) -> JoinHandle<()> {
        let mut rx = publisher.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(envelope) => self.notify_all(&envelope).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event listener lagged; events dropped");
                    }
                    Err(RecvError::Closed) => {
                        debug!("event channel closed; listener stopping");
                        break;
                    }
                }
            }
        })
    }
}

/// Read-side aggregate counts refreshed from events.
#[derive(Debug, Default)]
pub struct DashboardProjector {
    status_counts: DashMap<(EntityFamily, String), i64>,
    stage_completions: DashMap<String, u64>,
}

impl DashboardProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities currently in `(family, child_code)`, as seen via events.
    pub fn status_count(&self, family: EntityFamily, child_code: &str) -> i64 {
        self.status_counts
            .get(&(family, child_code.to_string()))
            .map(|c| *c)
            .unwrap_or(0)
    }

    /// Completed-stage counter per event type.
    pub fn stage_completions(&self, event_type: &str) -> u64 {
        self.stage_completions
            .get(event_type)
            .map(|c| *c)
            .unwrap_or(0)
    }
}

#[async_trait]
impl EventSubscriber for DashboardProjector {
    async fn handle_event(&self, envelope: &EventEnvelope) -> Result<(), SubscriberError> {
        match &envelope.event {
            DomainEvent::StatusChanged {
                family,
                from_status,
                to_status,
                ..
            } => {
                let mut from = self
                    .status_counts
                    .entry((*family, from_status.child_code.clone()))
                    .or_insert(0);
                *from = from.saturating_sub(1);
                drop(from);
                *self
                    .status_counts
                    .entry((*family, to_status.child_code.clone()))
                    .or_insert(0) += 1;
            }
            other => {
                *self
                    .stage_completions
                    .entry(other.event_type().to_string())
                    .or_insert(0) += 1;
            }
        }
        Ok(())
    }

    fn subscriber_name(&self) -> &str {
        "dashboard_projector"
    }
}

/// Transport for realtime client pushes.
#[async_trait]
pub trait RealtimeGateway: Send + Sync {
    async fn push(&self, topic: &str, payload: serde_json::Value) -> Result<(), SubscriberError>;
}

/// Pushes live updates to per-entity status topics and the shared
/// dashboard-refresh topic.
pub struct RealtimePush {
    gateway: Arc<dyn RealtimeGateway>,
}

impl RealtimePush {
    pub fn new(gateway: Arc<dyn RealtimeGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl EventSubscriber for RealtimePush {
    async fn handle_event(&self, envelope: &EventEnvelope) -> Result<(), SubscriberError> {
        let payload = serde_json::to_value(envelope)?;

        if let DomainEvent::StatusChanged {
            family, entity_id, ..
        } = &envelope.event
        {
            self.gateway
                .push(&topics::status_topic(*family, *entity_id), payload.clone())
                .await?;
        }

        self.gateway.push(topics::DASHBOARD_REFRESH, payload).await
    }

    fn subscriber_name(&self) -> &str {
        "realtime_push"
    }
}
