//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST API endpoints for period payroll, annual
//! reports, advance amortization and overtime capture.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AmortizeRequest, AnnualReportRequest, PayrollRequest, RecordOvertimeRequest};
pub use response::{AmortizeResponse, ApiError, ApiErrorResponse};
pub use state::AppState;
