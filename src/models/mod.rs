//! Core data models for the Termination Settlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod derived_state;
mod scenario;
mod settlement;

pub use derived_state::{DerivedState, Tenure};
pub use scenario::{NoticeDisposition, NoticeOverride, TerminationCategory, TerminationScenario};
pub use settlement::{
    AuditStep, AuditTrace, AuditWarning, LineItemCategory, LineItemKind, SettlementLineItem,
    SettlementResult,
};
