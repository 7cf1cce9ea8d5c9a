// Generic status/transition model shared by every procurement stage
//
// The rule table is data-driven; the canonical per-family machines are
// installed by `TransitionRuleSet::standard` and validated against the
// status catalog at startup.

pub mod persistence;
pub mod rules;
pub mod validator;

pub use persistence::{InMemoryStatusStore, StatusStore};
pub use rules::{
    ApprovalType, TransitionCondition, TransitionContext, TransitionRule, TransitionRuleSet,
};
pub use validator::{StatusManager, TransitionValidator};
