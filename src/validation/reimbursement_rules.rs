//! Reimbursement submission rules.

use chrono::NaiveDate;

use crate::config::ReimbursementAmountPolicy;
use crate::error::{EngineError, EngineResult};

/// Rejects claims dated after `today` and, under
/// [`ReimbursementAmountPolicy::PositiveOnly`], amounts that are not positive.
pub fn validate_reimbursement(
    amount: i64,
    date: NaiveDate,
    today: NaiveDate,
    amounts: ReimbursementAmountPolicy,
) -> EngineResult<()> {
    if amounts == ReimbursementAmountPolicy::PositiveOnly && amount <= 0 {
        return Err(EngineError::validation(
            "reimbursement amount must be greater than 0",
        ));
    }
    if date > today {
        return Err(EngineError::validation(
            "reimbursement date cannot be in the future",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_today_is_accepted() {
        let today = make_date("2025-01-15");
        assert!(validate_reimbursement(50_000, today, today, Default::default()).is_ok());
    }

    #[test]
    fn test_future_date_is_rejected() {
        let err = validate_reimbursement(
            50_000,
            make_date("2025-01-16"),
            make_date("2025-01-15"),
            ReimbursementAmountPolicy::AllowAny,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "reimbursement date cannot be in the future");
    }

    #[test]
    fn test_allow_any_accepts_zero_and_negative() {
        let today = make_date("2025-01-15");
        for amount in [0, -10_000] {
            assert!(
                validate_reimbursement(amount, today, today, ReimbursementAmountPolicy::AllowAny)
                    .is_ok()
            );
        }
    }

    #[test]
    fn test_positive_only_rejects_zero_and_negative() {
        let today = make_date("2025-01-15");
        for amount in [0, -10_000] {
            let err = validate_reimbursement(
                amount,
                today,
                today,
                ReimbursementAmountPolicy::PositiveOnly,
            )
            .unwrap_err();
            assert_eq!(err.to_string(), "reimbursement amount must be greater than 0");
        }
        assert!(
            validate_reimbursement(1, today, today, ReimbursementAmountPolicy::PositiveOnly).is_ok()
        );
    }
}
