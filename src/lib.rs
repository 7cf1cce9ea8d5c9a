#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Procure Core
//!
//! Cross-entity workflow and event-propagation engine for procurement
//! pipelines: purchase requests flow through bidding, contracting, delivery,
//! invoicing and payment, each stage carrying its own status.
//!
//! ## Overview
//!
//! The engine provides the only parts of a procurement back office with real
//! invariants: a data-driven status/transition model shared by every stage,
//! an ordered level-gated approval workflow, a backward relation resolver
//! that recovers purchase-request identity from any downstream entity, and a
//! best-effort event interception layer that republishes stage completions
//! as typed domain events. CRUD plumbing, HTTP routing, and authentication
//! are external collaborators.
//!
//! ## Module Organization
//!
//! - [`status`] - Immutable status catalog, `SystemStatus` values, history
//! - [`state_machine`] - Transition rules, validator, status manager
//! - [`approval`] - Approval lines, templates, sequential approval engine
//! - [`relations`] - Backward graph walk to the purchase request
//! - [`events`] - Domain events, publisher, interception, fan-out
//! - [`members`] - Member directory consumed by approval eligibility
//! - [`config`] - Engine configuration
//! - [`error`] - Structured error handling
//!
//! ## Data Flow
//!
//! A stage service performs its business operation unaware of the engine.
//! The [`events::StageCompletionObserver`] decorator observes the result,
//! the [`relations::RelationResolver`] recovers the purchase-request
//! context, and the [`events::EventPublisher`] emits a typed domain event,
//! mirrored to an external pub/sub channel keyed by entity family.
//! Listeners refresh dashboards and push realtime updates; their failures
//! never reach the originating operation.
//!
//! ## Quick Start
//!
//! ```rust
//! use procure_core::state_machine::{StatusManager, TransitionValidator, InMemoryStatusStore};
//! use procure_core::status::{EntityFamily, InMemoryHistoryStore};
//! use procure_core::events::EventPublisher;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = StatusManager::new(
//!     TransitionValidator::standard(),
//!     Arc::new(InMemoryStatusStore::new()),
//!     Arc::new(InMemoryHistoryStore::new()),
//!     EventPublisher::default(),
//! );
//!
//! manager.init_entity(EntityFamily::Bidding, 1).await?;
//! let status = manager
//!     .change_status(EntityFamily::Bidding, 1, "ONGOING", "alice", None)
//!     .await?;
//! assert_eq!(status.full_code(), "BIDDING-ONGOING");
//! # Ok(())
//! # }
//! ```

pub mod approval;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod members;
pub mod relations;
pub mod state_machine;
pub mod status;

pub use approval::{ApprovalAction, ApprovalEngine, ApprovalLine, ApprovalStepStatus};
pub use config::EngineConfig;
pub use error::{Result, WorkflowError};
pub use events::{
    DomainEvent, EventEnvelope, EventPublisher, StageCompletionObserver, SubscriberSet,
};
pub use relations::{RelationResolver, Stage};
pub use state_machine::{StatusManager, TransitionValidator};
pub use status::{EntityFamily, StatusCatalog, SystemStatus};
