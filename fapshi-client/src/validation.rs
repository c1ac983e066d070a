//! Input validation for gateway operations.
//!
//! Every check here is pure and runs before a payload is built. A failed
//! check short-circuits the owning operation into a status-400 response whose
//! message is the [`ValidationError`]'s `Display` text; the transport is never
//! touched.

use std::collections::HashMap;

use thiserror::Error;

/// Smallest amount, in XAF, the gateway accepts.
pub const MIN_AMOUNT: i64 = 100;

const PHONE_LEN: usize = 9;
const TRANSACTION_ID_LEN: std::ops::RangeInclusive<usize> = 8..=10;
const MAX_USER_ID_LEN: usize = 100;

/// Reasons caller input is rejected.
///
/// The messages are fixed; callers may match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Amount is below [`MIN_AMOUNT`].
    #[error("amount cannot be less than 100 XAF")]
    AmountTooLow,
    /// Phone number is not a 9-digit number starting with 6.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Transaction id is blank or not 8-10 alphanumerics.
    #[error("invalid transaction id")]
    InvalidTransactionId,
    /// User id is blank or not 1-100 characters of `[a-zA-Z0-9_-]`.
    #[error("invalid user id")]
    InvalidUserId,
    /// Search was requested without any filter.
    #[error("search filters required")]
    FiltersRequired,
}

/// Checks that `amount` is at least [`MIN_AMOUNT`] XAF.
///
/// # Errors
///
/// Returns [`ValidationError::AmountTooLow`] when `amount < 100`.
///
/// # Examples
///
/// ```
/// use fapshi_client::validation::{ValidationError, validate_amount};
///
/// assert!(validate_amount(100).is_ok());
/// assert_eq!(validate_amount(99), Err(ValidationError::AmountTooLow));
/// ```
pub const fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount < MIN_AMOUNT {
        return Err(ValidationError::AmountTooLow);
    }
    Ok(())
}

/// Checks that `phone` is a local Cameroonian mobile number: `6` followed by
/// exactly eight ASCII digits.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPhone`] otherwise. No trimming or
/// country-code stripping is performed.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let bytes = phone.as_bytes();
    if bytes.len() != PHONE_LEN || !phone.starts_with('6') {
        return Err(ValidationError::InvalidPhone);
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Checks that `trans_id` is 8 to 10 ASCII alphanumeric characters.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTransactionId`] when blank, too short,
/// too long, or containing anything else.
pub fn validate_transaction_id(trans_id: &str) -> Result<(), ValidationError> {
    if trans_id.trim().is_empty() || !TRANSACTION_ID_LEN.contains(&trans_id.len()) {
        return Err(ValidationError::InvalidTransactionId);
    }
    if !trans_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidTransactionId);
    }
    Ok(())
}

/// Checks that `user_id` is 1 to 100 characters of ASCII alphanumerics,
/// hyphens, and underscores.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUserId`] otherwise.
pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() || user_id.len() > MAX_USER_ID_LEN {
        return Err(ValidationError::InvalidUserId);
    }
    if !user_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::InvalidUserId);
    }
    Ok(())
}

/// Checks that at least one search filter is present.
///
/// # Errors
///
/// Returns [`ValidationError::FiltersRequired`] for an empty map.
pub fn validate_filters<S>(filters: &HashMap<String, String, S>) -> Result<(), ValidationError> {
    if filters.is_empty() {
        return Err(ValidationError::FiltersRequired);
    }
    Ok(())
}
