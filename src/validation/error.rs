//! Multi-field validation error with HTTP 422 semantics
//!
//! A missing aggregate (`None`) behaves exactly like an empty one through
//! [`ValidationErrorExt`], so handlers can pass `Option<ValidationError>`
//! around without checking it first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when there is nothing more specific to say
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Unprocessable Entity
pub const STATUS_CODE: u16 = 422;

pub const CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// One rejected field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
            code: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Ordered collection of field errors
///
/// # Example
///
/// ```
/// use service_kit::validation::ValidationError;
///
/// let mut errors = ValidationError::new();
/// errors.add("email", "must be a valid email");
/// errors.add_with_code("age", "is required", "required");
///
/// assert_eq!(errors.count(), 2);
/// assert_eq!(errors.to_string(), "email: must be a valid email; age: is required");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{}", render_errors(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

/// Wire shape of a validation failure
#[derive(Debug, Serialize)]
struct Body<'a> {
    error: &'static str,
    code: u16,
    #[serde(rename = "validationErrors")]
    validation_errors: &'a [FieldError],
}

fn render_errors(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return VALIDATION_FAILED.to_string();
    }
    errors
        .iter()
        .map(|e| {
            if e.field.is_empty() {
                e.message.clone()
            } else {
                format!("{}: {}", e.field, e.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(FieldError::new(field, message));
    }

    pub fn add_with_code(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.push(FieldError::new(field, message).with_code(code));
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Append `other`'s errors after this one's
    pub fn merge(&mut self, other: &ValidationError) {
        self.errors.extend(other.errors.iter().cloned());
    }

    /// Errors for `field`, in the order they were added
    pub fn get_field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// `None` when nothing was added
    pub fn into_option(self) -> Option<ValidationError> {
        self.has_errors().then_some(self)
    }

    pub fn status_code(&self) -> u16 {
        STATUS_CODE
    }

    pub fn headers(&self) -> [(&'static str, &'static str); 1] {
        [CONTENT_TYPE]
    }

    /// `{"error": "Validation failed", "code": 422, "validationErrors": [...]}`
    pub fn to_json_value(&self) -> serde_json::Value {
        body_json(&self.errors)
    }
}

fn body_json(errors: &[FieldError]) -> serde_json::Value {
    let body = Body {
        error: VALIDATION_FAILED,
        code: STATUS_CODE,
        validation_errors: errors,
    };
    serde_json::to_value(body).unwrap_or_else(|_| {
        serde_json::json!({"error": VALIDATION_FAILED, "code": STATUS_CODE, "validationErrors": []})
    })
}

impl Serialize for ValidationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Body {
            error: VALIDATION_FAILED,
            code: STATUS_CODE,
            validation_errors: &self.errors,
        }
        .serialize(serializer)
    }
}

/// Serialize an optional aggregate, `None` as the empty failure body
///
/// Plain serde writes `None` as `null`; use this (or
/// [`ValidationErrorExt::to_json_value`]) wherever the payload must keep its shape.
///
/// ```
/// use serde::Serialize;
/// use service_kit::validation::ValidationError;
///
/// #[derive(Serialize)]
/// struct Response {
///     #[serde(serialize_with = "service_kit::validation::serialize_option")]
///     errors: Option<ValidationError>,
/// }
///
/// let json = serde_json::to_value(Response { errors: None }).unwrap();
/// assert_eq!(json["errors"]["code"], 422);
/// assert_eq!(json["errors"]["validationErrors"], serde_json::json!([]));
/// ```
pub fn serialize_option<S: serde::Serializer>(
    errors: &Option<ValidationError>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    Body {
        error: VALIDATION_FAILED,
        code: STATUS_CODE,
        validation_errors: errors.as_ref().map_or(&[][..], |e| e.errors.as_slice()),
    }
    .serialize(serializer)
}

impl FromIterator<FieldError> for ValidationError {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// Queries that treat a missing aggregate as an empty one
///
/// ```
/// use service_kit::validation::{ValidationError, ValidationErrorExt};
///
/// let mut none: Option<ValidationError> = None;
/// none.add("name", "ignored");
///
/// assert!(!none.has_errors());
/// assert_eq!(none.count(), 0);
/// assert_eq!(none.error_message(), "Validation failed");
/// assert_eq!(none.to_json_value()["validationErrors"], serde_json::json!([]));
/// ```
pub trait ValidationErrorExt {
    /// Appends only when an aggregate is present
    fn add(&mut self, field: &str, message: &str);
    fn add_with_code(&mut self, field: &str, message: &str, code: &str);
    /// Appends only when both sides are present
    fn merge(&mut self, other: Option<&ValidationError>);
    fn get_field_errors(&self, field: &str) -> Vec<&FieldError>;
    fn has_errors(&self) -> bool;
    fn count(&self) -> usize;
    fn error_message(&self) -> String;
    fn status_code(&self) -> u16;
    fn to_json_value(&self) -> serde_json::Value;
}

impl ValidationErrorExt for Option<ValidationError> {
    fn add(&mut self, field: &str, message: &str) {
        if let Some(errors) = self {
            errors.add(field, message);
        }
    }

    fn add_with_code(&mut self, field: &str, message: &str, code: &str) {
        if let Some(errors) = self {
            errors.add_with_code(field, message, code);
        }
    }

    fn merge(&mut self, other: Option<&ValidationError>) {
        if let (Some(errors), Some(other)) = (self, other) {
            errors.merge(other);
        }
    }

    fn get_field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.as_ref()
            .map(|e| e.get_field_errors(field))
            .unwrap_or_default()
    }

    fn has_errors(&self) -> bool {
        self.as_ref().is_some_and(ValidationError::has_errors)
    }

    fn count(&self) -> usize {
        self.as_ref().map_or(0, ValidationError::count)
    }

    fn error_message(&self) -> String {
        self.as_ref()
            .map_or_else(|| VALIDATION_FAILED.to_string(), ToString::to_string)
    }

    fn status_code(&self) -> u16 {
        STATUS_CODE
    }

    fn to_json_value(&self) -> serde_json::Value {
        self.as_ref()
            .map_or_else(|| body_json(&[]), ValidationError::to_json_value)
    }
}
