//! Business rule validation for ledger lines.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::line::{LedgerLine, LineStatus};

/// Validates a ledger line before it is appended.
///
/// Rules:
/// - Both amounts must be non-negative.
/// - Exactly one of debit/credit is nonzero, except for an explicit void
///   line (both zero) which must carry `Cancelled` status.
///
/// # Errors
///
/// Returns an error if the line violates any amount rule.
pub fn validate_line(line: &LedgerLine) -> Result<(), LedgerError> {
    if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }

    if line.is_void() {
        if line.status != LineStatus::Cancelled {
            return Err(LedgerError::ZeroAmount);
        }
        return Ok(());
    }

    if !line.debit.is_zero() && !line.credit.is_zero() {
        return Err(LedgerError::BothSidesNonzero);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::line::TransactionKind;
    use chrono::{NaiveDate, Utc};
    use ledgerkit_shared::types::LedgerLineId;
    use rust_decimal_macros::dec;

    fn make_line(debit: Decimal, credit: Decimal, status: LineStatus) -> LedgerLine {
        LedgerLine {
            id: LedgerLineId::new(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            kind: TransactionKind::Journal,
            account_code: "1000".to_string(),
            debit,
            credit,
            status,
            counterparty: None,
            reference_number: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_debit_line() {
        let line = make_line(dec!(100), dec!(0), LineStatus::Confirmed);
        assert!(validate_line(&line).is_ok());
    }

    #[test]
    fn test_valid_credit_line() {
        let line = make_line(dec!(0), dec!(100), LineStatus::Confirmed);
        assert!(validate_line(&line).is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let line = make_line(dec!(-100), dec!(0), LineStatus::Confirmed);
        assert!(matches!(
            validate_line(&line),
            Err(LedgerError::NegativeAmount)
        ));
    }

    #[test]
    fn test_both_sides_nonzero_rejected() {
        let line = make_line(dec!(100), dec!(100), LineStatus::Confirmed);
        assert!(matches!(
            validate_line(&line),
            Err(LedgerError::BothSidesNonzero)
        ));
    }

    #[test]
    fn test_zero_line_requires_cancelled_status() {
        let line = make_line(dec!(0), dec!(0), LineStatus::Confirmed);
        assert!(matches!(validate_line(&line), Err(LedgerError::ZeroAmount)));
    }

    #[test]
    fn test_explicit_void_line_accepted() {
        let line = make_line(dec!(0), dec!(0), LineStatus::Cancelled);
        assert!(validate_line(&line).is_ok());
    }
}
