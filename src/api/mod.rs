//! HTTP API for the salary engine.
//!
//! Exposes salary resolution, payroll runs, tax estimates, leave balances and
//! the earned wage access workflow as JSON endpoints on an axum router.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ActionRequest, EarningsRequest, EwaBalanceRequest, LeaveBalanceRequest, PayrollRequest,
    ResolveRequest, TaxEstimateRequest, WithdrawalAction, WithdrawalRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
