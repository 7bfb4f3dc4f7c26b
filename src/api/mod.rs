//! HTTP API for the payslip engine.
//!
//! Admin routes live under `/admin`, employee self-service routes under
//! `/employee`. The caller is identified by the `X-User-Id` and
//! `X-User-Role` headers; see [`AuthenticatedUser`].

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::{AuthenticatedUser, principal_from_headers};
pub use handlers::create_router;
pub use request::{AttendanceRequest, PeriodRequest, RunPayrollRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
