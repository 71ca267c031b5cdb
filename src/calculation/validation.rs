//! Input validation shared by the calculation functions.
//!
//! Money and hours inside the engine are [`Decimal`]s, which cannot be NaN or
//! infinite. Non-finite values can only arrive through `f64` at the API
//! boundary, where [`decimal_from_f64`] rejects them. A finite input can still
//! be large enough to overflow the 96-bit mantissa, so pricing arithmetic goes
//! through [`checked_product`] and [`checked_sum`].

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::{EngineError, EngineResult};

/// Rejects a negative value.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::require_non_negative;
/// use rust_decimal::Decimal;
///
/// assert!(require_non_negative("hours", Decimal::ZERO).is_ok());
/// assert!(require_non_negative("hours", Decimal::new(-1, 0)).is_err());
/// ```
pub fn require_non_negative(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(EngineError::validation(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(value)
}

/// Converts a JSON number into a non-negative [`Decimal`].
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the value is NaN, infinite,
/// outside the decimal range, or negative.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::decimal_from_f64;
/// use rust_decimal::Decimal;
///
/// assert_eq!(decimal_from_f64("hours", 7.5).unwrap(), Decimal::new(75, 1));
/// assert!(decimal_from_f64("hours", f64::NAN).is_err());
/// assert!(decimal_from_f64("hours", f64::INFINITY).is_err());
/// ```
pub fn decimal_from_f64(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::validation(field, "must be a finite number"));
    }
    let decimal = Decimal::from_f64(value)
        .ok_or_else(|| EngineError::validation(field, "is outside the supported range"))?;
    require_non_negative(field, decimal)
}

fn out_of_range(field: &str) -> EngineError {
    EngineError::validation(field, "amount out of range")
}

/// Multiplies two amounts.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming `field` when the product
/// overflows.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::checked_product;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     checked_product("base_pay", Decimal::new(10, 0), Decimal::new(50, 0)).unwrap(),
///     Decimal::new(500, 0)
/// );
/// assert!(checked_product("base_pay", Decimal::MAX, Decimal::new(2, 0)).is_err());
/// ```
pub fn checked_product(field: &str, lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| out_of_range(field))
}

/// Adds up amounts.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming `field` when the running total
/// overflows.
pub fn checked_sum(
    field: &str,
    amounts: impl IntoIterator<Item = Decimal>,
) -> EngineResult<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or_else(|| out_of_range(field))
    })
}
