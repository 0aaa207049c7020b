//! HTTP API module for the Termination Settlement Engine.
//!
//! This module provides the REST API endpoint for computing a CLT
//! termination settlement.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{CORRELATION_ID_HEADER, create_router};
pub use request::{
    ContractRequest, EmployeeRequest, FinesRequest, NoticeOverrideRequest, SettlementRequest,
    TerminationRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
