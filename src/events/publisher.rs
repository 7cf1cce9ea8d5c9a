//! # Event Publisher
//!
//! In-process broadcast of domain events plus best-effort mirroring to an
//! external pub/sub channel keyed by entity family. External delivery is
//! at-most-once and non-blocking: a publish failure is logged and never
//! fails the originating request.

use super::types::{DomainEvent, EventEnvelope};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Error types for external event publication.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("publish timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// External pub/sub transport for cross-process subscribers.
#[async_trait]
pub trait PubSubChannel: Send + Sync {
    /// Deliver one JSON payload to the named channel.
    async fn publish(&self, channel: &str, payload: Value) -> Result<(), PublishError>;
}

/// Publisher for domain events.
#[derive(Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<EventEnvelope>,
    external: Option<Arc<dyn PubSubChannel>>,
    publish_timeout: Duration,
}

impl std::fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPublisher")
            .field("subscriber_count", &self.sender.receiver_count())
            .field("external", &self.external.is_some())
            .field("publish_timeout", &self.publish_timeout)
            .finish()
    }
}

impl EventPublisher {
    /// Create a new publisher with the specified broadcast capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            external: None,
            publish_timeout: Duration::from_millis(500),
        }
    }

    /// Attach an external pub/sub transport.
    pub fn with_external(mut self, channel: Arc<dyn PubSubChannel>, timeout: Duration) -> Self {
        self.external = Some(channel);
        self.publish_timeout = timeout;
        self
    }

    /// Publish one domain event.
    ///
    /// Infallible by design: sends with no subscribers are fine, and an
    /// external transport failure is logged, never surfaced. Returns the
    /// envelope that was published.
    pub async fn publish(&self, event: DomainEvent) -> EventEnvelope {
        let envelope = EventEnvelope::new(event);

        // A send error only means there are no in-process subscribers.
        if self.sender.send(envelope.clone()).is_err() {
            debug!(event = %envelope.name, "no in-process subscribers for event");
        }

        if let Some(external) = &self.external {
            self.mirror_external(external, &envelope).await;
        }

        envelope
    }

    async fn mirror_external(&self, external: &Arc<dyn PubSubChannel>, envelope: &EventEnvelope) {
        let channel = envelope.event.channel();
        let payload = match serde_json::to_value(envelope) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(event = %envelope.name, error = %e, "failed to serialize event for external publish");
                return;
            }
        };

        let publish = external.publish(&channel, payload);
        match tokio::time::timeout(self.publish_timeout, publish).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(event = %envelope.name, channel = %channel, error = %e, "external publish failed");
            }
            Err(_) => {
                warn!(
                    event = %envelope.name,
                    channel = %channel,
                    timeout_ms = self.publish_timeout.as_millis() as u64,
                    "external publish timed out"
                );
            }
        }
    }

    /// Subscribe to published events.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Number of active in-process subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct RecordingChannel {
        published: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl PubSubChannel for RecordingChannel {
        async fn publish(&self, channel: &str, payload: Value) -> Result<(), PublishError> {
            self.published.lock().push((channel.to_string(), payload));
            Ok(())
        }
    }

    struct FailingChannel;

    #[async_trait]
    impl PubSubChannel for FailingChannel {
        async fn publish(&self, _channel: &str, _payload: Value) -> Result<(), PublishError> {
            Err(PublishError::Transport("broker unavailable".to_string()))
        }
    }

    fn bidding_created() -> DomainEvent {
        DomainEvent::BiddingCreated {
            bidding_id: 1,
            purchase_request_id: 7,
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_succeeds() {
        let publisher = EventPublisher::new(16);
        let envelope = publisher.publish(bidding_created()).await;
        assert_eq!(envelope.name, "bidding.created");
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let publisher = EventPublisher::new(16);
        let mut rx = publisher.subscribe();

        publisher.publish(bidding_created()).await;
        let received = rx.recv().await.unwrap();
        assert_eq!(received.event, bidding_created());
    }

    #[tokio::test]
    async fn test_external_mirror_is_family_keyed() {
        let channel = Arc::new(RecordingChannel {
            published: Mutex::new(Vec::new()),
        });
        let publisher = EventPublisher::new(16)
            .with_external(channel.clone(), Duration::from_millis(100));

        publisher.publish(bidding_created()).await;

        let published = channel.published.lock();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "BIDDING");
        assert_eq!(published[0].1["name"], "bidding.created");
    }

    #[tokio::test]
    async fn test_external_failure_does_not_fail_publish() {
        let publisher = EventPublisher::new(16)
            .with_external(Arc::new(FailingChannel), Duration::from_millis(100));
        let mut rx = publisher.subscribe();

        publisher.publish(bidding_created()).await;
        // in-process delivery unaffected by the broken transport
        assert!(rx.recv().await.is_ok());
    }
}
