use crate::constants::approval::MIN_APPROVAL_LEVEL;
use crate::error::{Result, WorkflowError};

/// Engine-wide configuration.
///
/// Loaded once at startup and passed by reference to the components that
/// need it; nothing reads configuration ambiently.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Capacity of the in-process broadcast channel for domain events.
    pub event_channel_capacity: usize,
    /// Upper bound on a single external pub/sub publish call. No retry;
    /// retry belongs to the transport.
    pub publish_timeout_ms: u64,
    /// Minimum organizational level for the template-free eligibility query.
    pub min_approval_level: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 1000,
            publish_timeout_ms: 500,
            min_approval_level: MIN_APPROVAL_LEVEL,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(capacity) = std::env::var("PROCURE_EVENT_CHANNEL_CAPACITY") {
            config.event_channel_capacity = capacity.parse().map_err(|e| {
                WorkflowError::Configuration(format!("Invalid event_channel_capacity: {e}"))
            })?;
        }

        if let Ok(timeout) = std::env::var("PROCURE_PUBLISH_TIMEOUT_MS") {
            config.publish_timeout_ms = timeout.parse().map_err(|e| {
                WorkflowError::Configuration(format!("Invalid publish_timeout_ms: {e}"))
            })?;
        }

        if let Ok(level) = std::env::var("PROCURE_MIN_APPROVAL_LEVEL") {
            config.min_approval_level = level.parse().map_err(|e| {
                WorkflowError::Configuration(format!("Invalid min_approval_level: {e}"))
            })?;
        }

        Ok(config)
    }
}
