//! Local input validation
//!
//! Everything here runs before a request is built, so a failure never costs a
//! network round-trip.

use tracing::debug;
use venmo_domain::constants::{
    CODE_AMOUNT_BELOW_FLOOR, CODE_AMOUNT_NOT_NEGATIVE, REQUEST_PAYMENT_FLOOR,
};
use venmo_domain::ApiError;

/// Ensure every named field is non-blank.
///
/// # Errors
/// Returns a `Validation` error listing every missing field, e.g.
/// `"otp_secret and device_id are required"`.
pub fn require(fields: &[(&'static str, &str)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    debug!(missing = ?missing, "rejecting call with missing fields");
    Err(ApiError::validation(required_message(&missing)))
}

fn required_message(missing: &[&str]) -> String {
    match missing {
        [single] => format!("{single} is required"),
        [init @ .., last] => format!("{} and {last} are required", init.join(", ")),
        [] => String::new(),
    }
}

/// Check the bounds of a payment *request*: `-100 < amount < 0`.
///
/// A non-negative amount would move money the wrong way, so it is rejected
/// rather than sent.
///
/// # Errors
/// - `Validation` when the amount is NaN or infinite
/// - `DomainValidation { code: 506 }` when `amount >= 0`
/// - `DomainValidation { code: 507 }` when `amount <= -100`
pub fn validate_request_amount(amount: f64) -> Result<(), ApiError> {
    if !amount.is_finite() {
        return Err(ApiError::validation("amount must be a finite number"));
    }
    if amount >= 0.0 {
        return Err(ApiError::domain_validation(
            CODE_AMOUNT_NOT_NEGATIVE,
            "amount must be less than 0",
        ));
    }
    if amount <= REQUEST_PAYMENT_FLOOR {
        return Err(ApiError::domain_validation(
            CODE_AMOUNT_BELOW_FLOOR,
            format!("amount must be greater than {REQUEST_PAYMENT_FLOOR}"),
        ));
    }
    Ok(())
}
