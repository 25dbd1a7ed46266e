//! Amounts travel as decimals with two fraction digits and are stored as cents.

use crate::error::{AppError, AppResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub fn to_cents(amount: Decimal) -> AppResult<i64> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.trunc().to_i64())
        .ok_or_else(|| AppError::ValidationError(format!("Amount {amount} is out of range")))
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts a required amount that must be strictly greater than zero.
pub fn positive_cents(amount: Decimal, field: &str) -> AppResult<i64> {
    let cents = to_cents(amount)?;
    if cents <= 0 {
        return Err(AppError::ValidationError(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_to_cents_rounds_half_away_from_zero() {
        assert_eq!(to_cents(Decimal::from_str("150.00").unwrap()).unwrap(), 15000);
        assert_eq!(to_cents(Decimal::from_str("0.005").unwrap()).unwrap(), 1);
        assert_eq!(to_cents(Decimal::from_str("19.994").unwrap()).unwrap(), 1999);
        assert_eq!(to_cents(Decimal::from(40)).unwrap(), 4000);
    }

    #[test]
    fn test_from_cents_keeps_two_fraction_digits() {
        let amount = from_cents(15050);
        assert_eq!(amount, Decimal::from_str("150.50").unwrap());
        assert_eq!(amount.scale(), 2);
        assert_eq!(from_cents(0), Decimal::ZERO);
    }

    #[test]
    fn test_positive_cents_rejects_zero_and_negative() {
        assert!(positive_cents(Decimal::ZERO, "amount").is_err());
        assert!(positive_cents(Decimal::from_str("-1.00").unwrap(), "amount").is_err());
        assert!(positive_cents(Decimal::from_str("0.001").unwrap(), "amount").is_err());
        assert_eq!(positive_cents(Decimal::from(100), "amount").unwrap(), 10000);

        let huge = Decimal::from_str("79228162514264337593543950335").unwrap();
        assert!(matches!(
            positive_cents(huge, "amount"),
            Err(AppError::ValidationError(_))
        ));
        assert!(to_cents(Decimal::from(i64::MAX)).is_err());
    }
}
