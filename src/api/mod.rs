//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for pricing shifts, resolving
//! payroll periods and building per-employee statements.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculateShiftRequest, PeriodSelector, ResolvePeriodRequest, ShiftRequest, StatementRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
