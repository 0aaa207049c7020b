//! Configuration loading and management for the Termination Settlement Engine.
//!
//! This module provides the statutory parameters the engine applies (notice
//! lengths, accrual thresholds, FGTS and fine rates), either from the
//! built-in CLT table or from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use settlement_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/clt").unwrap();
//! println!("Loaded statute: {}", config.statute().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccrualRules, FgtsRules, FineRules, NoticeRules, ParametersConfig, StatuteMetadata,
    StatutoryConfig, SupplementRules,
};
