//! Business rule checks applied before any write.
//!
//! Every check here is a pure function over already-loaded records, so the
//! service layer can run it inside a store transaction and act on the result
//! without a gap between the read and the write.

mod attendance_rules;
mod overtime_conflict;
mod period_overlap;
mod reimbursement_rules;

pub use attendance_rules::{AttendanceAction, resolve_attendance};
pub use overtime_conflict::{
    ensure_no_overtime_conflict, validate_overtime, validate_overtime_window,
};
pub use period_overlap::{ensure_no_overlap, validate_period_dates};
pub use reimbursement_rules::validate_reimbursement;
