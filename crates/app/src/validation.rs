//! Field-level validation built on `validator`.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub rule: String,
    pub message: String,
}

/// Validate `payload` and flatten every violation into a list sorted by
/// field name. An empty list means the payload is valid.
#[must_use]
pub fn field_errors<T: Validate>(payload: &T) -> Vec<FieldError> {
    match payload.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten(&errors),
    }
}

fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut flattened: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, violations)| {
            violations.iter().map(move |violation| FieldError {
                field: field.to_string(),
                rule: violation.code.to_string(),
                message: violation
                    .message
                    .as_ref()
                    .map_or_else(|| default_message(&field, violation), ToString::to_string),
            })
        })
        .collect();

    flattened.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));

    flattened
}

fn default_message(field: &str, violation: &ValidationError) -> String {
    let param = |name: &str| {
        violation
            .params
            .get(name)
            .map(ToString::to_string)
            .unwrap_or_default()
    };

    match violation.code.as_ref() {
        "required" => format!("{field} is required"),
        "length" => format!("{field} must be at most {} characters", param("max")),
        "range" => format!(
            "{field} must be between {} and {}",
            param("min"),
            param("max")
        ),
        code => format!("{field} failed the {code} rule"),
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Digits only.
///
/// # Errors
///
/// Returns a `numeric` violation when `value` contains anything but ASCII digits.
pub fn numeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(())
    } else {
        Err(violation("numeric", "must contain only digits"))
    }
}

/// `on` or `off`.
///
/// # Errors
///
/// Returns a `oneof` violation for any other value.
pub fn primary_flag(value: &str) -> Result<(), ValidationError> {
    match value {
        "on" | "off" => Ok(()),
        _ => Err(violation("oneof", "must be one of: on off")),
    }
}

/// `new` or `used`.
///
/// # Errors
///
/// Returns a `oneof` violation for any other value.
pub fn product_condition(value: &str) -> Result<(), ValidationError> {
    match value {
        "new" | "used" => Ok(()),
        _ => Err(violation("oneof", "must be one of: new used")),
    }
}

/// Present and not blank. Sanitization can leave a supplied field empty, which
/// counts as missing.
///
/// # Errors
///
/// Returns a `required` violation for an empty string.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(violation("required", "must not be empty"))
    } else {
        Ok(())
    }
}

/// Every entry of a string list is at most 255 characters.
///
/// # Errors
///
/// Returns a `length` violation when any entry is longer.
pub fn entries_max_255(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|value| value.chars().count() <= 255) {
        Ok(())
    } else {
        Err(violation("length", "entries must be at most 255 characters"))
    }
}
