//! Field-level checks shared by every back-office form.
//!
//! Each helper records at most one message per field in a
//! [`FieldErrors`] set and returns the parsed value when it is usable, so a
//! form can run all checks and report every failing field at once.

use std::str::FromStr;

use chrono::NaiveDate;
use opsdesk_core::FieldErrors;
use rust_decimal::Decimal;

/// Minimum password length for manager accounts.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Message shown for a malformed email address.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Returns whether `value` has the `local@domain.tld` shape with no
/// whitespace and exactly one `@`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Requires a non-blank, well-formed email address.
pub fn check_email(errors: &mut FieldErrors, field: &str, value: &str, required_message: &str) {
    if errors.require(field, value, required_message) && !is_valid_email(value) {
        errors.push(field, INVALID_EMAIL_MESSAGE);
    }
}

/// Checks a password and its confirmation.
///
/// When `required` is false, two blank inputs are accepted (edit mode keeps
/// the existing credentials).
pub fn check_password_pair(
    errors: &mut FieldErrors,
    password: &str,
    confirm_password: &str,
    required: bool,
) {
    if !required && password.is_empty() && confirm_password.is_empty() {
        return;
    }

    if password.is_empty() {
        errors.push("password", "Password is required");
    } else if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.push(
            "password",
            format!("Password must be at least {PASSWORD_MIN_LENGTH} characters"),
        );
    }

    if confirm_password.is_empty() {
        errors.push("confirm_password", "Please confirm the password");
    } else if password != confirm_password {
        errors.push("confirm_password", "Passwords do not match");
    }
}

/// Parses a required enumerated value.
pub fn parse_choice<T: FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    required_message: &str,
    invalid_message: &str,
) -> Option<T> {
    if !errors.require(field, value, required_message) {
        return None;
    }

    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(field, invalid_message);
            None
        }
    }
}

/// Parses a required decimal and checks it is at least `minimum`.
pub fn parse_decimal(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    required_message: &str,
    minimum: Decimal,
    range_message: &str,
) -> Option<Decimal> {
    if !errors.require(field, value, required_message) {
        return None;
    }

    match value.trim().parse::<Decimal>() {
        Ok(parsed) if parsed >= minimum => Some(parsed),
        Ok(_) => {
            errors.push(field, range_message);
            None
        }
        Err(_) => {
            errors.push(field, format!("{} must be a number", field_label(field)));
            None
        }
    }
}

/// Parses a required positive decimal.
pub fn parse_positive_decimal(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    required_message: &str,
    range_message: &str,
) -> Option<Decimal> {
    let parsed = parse_decimal(
        errors,
        field,
        value,
        required_message,
        Decimal::ZERO,
        range_message,
    )?;
    if parsed.is_zero() {
        errors.push(field, range_message);
        return None;
    }

    Some(parsed)
}

/// Parses a required whole number inside `range`.
pub fn parse_integer_in_range(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    required_message: &str,
    range: std::ops::RangeInclusive<i64>,
    range_message: &str,
) -> Option<i64> {
    if !errors.require(field, value, required_message) {
        return None;
    }

    match value.trim().parse::<i64>() {
        Ok(parsed) if range.contains(&parsed) => Some(parsed),
        Ok(_) => {
            errors.push(field, range_message);
            None
        }
        Err(_) => {
            errors.push(field, format!("{} must be a whole number", field_label(field)));
            None
        }
    }
}

/// Parses a required `YYYY-MM-DD` date.
pub fn parse_date(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    required_message: &str,
) -> Option<NaiveDate> {
    if !errors.require(field, value, required_message) {
        return None;
    }

    parse_optional_date(errors, field, value).flatten()
}

/// Parses an optional `YYYY-MM-DD` date. Blank input is `Some(None)`.
pub fn parse_optional_date(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
) -> Option<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(None);
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Some(Some(date)),
        Err(_) => {
            errors.push(
                field,
                format!("{} must be a date (YYYY-MM-DD)", field_label(field)),
            );
            None
        }
    }
}

/// Returns `None` for blank input and the trimmed value otherwise.
#[must_use]
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn field_label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut characters = spaced.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}
