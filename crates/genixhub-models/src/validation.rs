//! Field validators for `#[validate(custom(...))]` and schema checks.

use std::borrow::Cow;

use genixhub_core::errors::messages::PASSWORDS_DONT_MATCH;
use uuid::Uuid;
use validator::ValidationError;

use crate::states::is_indian_state;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Six digit postal code not starting with zero.
pub fn validate_pincode(value: &str) -> Result<(), ValidationError> {
    let bytes = value.as_bytes();
    let valid = bytes.len() == 6
        && (b'1'..=b'9').contains(&bytes[0])
        && bytes.iter().all(u8::is_ascii_digit);

    if valid {
        Ok(())
    } else {
        Err(error("pincode", "Please enter a valid Indian pincode"))
    }
}

/// Ten digit mobile number starting with 6-9.
pub fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    let bytes = value.as_bytes();
    let valid = bytes.len() == 10
        && (b'6'..=b'9').contains(&bytes[0])
        && bytes.iter().all(u8::is_ascii_digit);

    if valid {
        Ok(())
    } else {
        Err(error("mobile", "Please enter a valid Indian mobile number"))
    }
}

pub fn validate_state(value: &str) -> Result<(), ValidationError> {
    if is_indian_state(value) {
        Ok(())
    } else {
        Err(error("state", "Please select a valid Indian state"))
    }
}

/// Blank ids are left to the `length` rule.
pub fn validate_school_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(error("school_id", "Invalid school ID format"))
    }
}

pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    match value {
        "male" | "female" => Ok(()),
        _ => Err(error("gender", "Gender must be male or female")),
    }
}

/// Schema-level mismatch error, reported against `confirmPassword`.
pub fn passwords_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        return Ok(());
    }
    let mut err = error("passwords_match", PASSWORDS_DONT_MATCH);
    err.add_param(Cow::Borrowed("field"), &"confirmPassword");
    Err(err)
}
