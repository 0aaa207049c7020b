//! Termination Settlement Engine for Brazilian CLT rescissions
//!
//! This crate computes the itemized settlement due when an employment
//! contract ends: salary balance, notice, proportional 13th salary and
//! vacation, FGTS deposit and fine, and statutory fines, each with its legal
//! basis and an audit trace of the rules applied.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
