//! Field-level validation primitives shared by every draft type.
//!
//! Drafts accumulate violations into a [`Violations`] collector instead of
//! returning at the first bad field, so one validation pass reports every
//! problem with the input.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One or more violated field constraints.
///
/// Every violation found during draft construction is present, not just the
/// first one encountered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed ({}): {}", .errors.len(), render(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn render(errors: &[FieldError]) -> String {
    let parts: Vec<String> = errors.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

impl ValidationError {
    /// All violations, in the order the fields were checked.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// True if `field` is among the violated fields.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Accumulator for violations found while checking one raw input.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Ok if nothing was recorded, otherwise the full error.
    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

/// Extract a string field, recording a violation if it is absent or mistyped.
pub(crate) fn require_str(raw: &Value, field: &'static str, v: &mut Violations) -> Option<String> {
    match raw.get(field) {
        None => {
            v.push(field, "field is missing");
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            v.push(field, format!("expected a string, got {}", type_name(other)));
            None
        }
    }
}

/// Extract an integer field.
pub(crate) fn require_i64(raw: &Value, field: &'static str, v: &mut Violations) -> Option<i64> {
    match raw.get(field) {
        None => {
            v.push(field, "field is missing");
            None
        }
        Some(value) => match value.as_i64() {
            Some(n) => Some(n),
            None => {
                v.push(field, format!("expected an integer, got {}", type_name(value)));
                None
            }
        },
    }
}

/// Extract a numeric field as f64 (integers are accepted).
pub(crate) fn require_f64(raw: &Value, field: &'static str, v: &mut Violations) -> Option<f64> {
    match raw.get(field) {
        None => {
            v.push(field, "field is missing");
            None
        }
        Some(value) => match value.as_f64() {
            Some(n) => Some(n),
            None => {
                v.push(field, format!("expected a number, got {}", type_name(value)));
                None
            }
        },
    }
}

/// Extract an array-of-integers field.
pub(crate) fn require_i64_array(
    raw: &Value,
    field: &'static str,
    v: &mut Violations,
) -> Option<Vec<i64>> {
    match raw.get(field) {
        None => {
            v.push(field, "field is missing");
            None
        }
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item.as_i64() {
                    Some(n) => out.push(n),
                    None => {
                        v.push(
                            field,
                            format!("element {index} is not an integer ({})", type_name(item)),
                        );
                        return None;
                    }
                }
            }
            Some(out)
        }
        Some(other) => {
            v.push(field, format!("expected an array, got {}", type_name(other)));
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Syntactic email check: one `@`, a non-empty local part, and a dotted
/// domain with non-empty labels. No whitespace anywhere.
pub(crate) fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
