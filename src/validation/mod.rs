//! Request validation support
//!
//! - [`tags`]: field metadata, requiredness and naming rules
//! - [`formats`]: email, UUID, URL and ISO 8601 checks
//! - [`error`]: the multi-field [`ValidationError`] returned to clients

pub mod error;
pub mod formats;
pub mod tags;

pub use error::{
    serialize_option, FieldError, ValidationError, ValidationErrorExt, CONTENT_TYPE, STATUS_CODE,
    VALIDATION_FAILED,
};
pub use formats::{is_valid_email, is_valid_iso8601, is_valid_url, is_valid_uuid, validator_for};
pub use tags::{
    classify_params, field_name, is_field_required, param_location, FieldMeta, ParamClassification,
    ParamLocation, StructTag, TaggedStruct,
};

use serde_json::Value;

pub const CODE_REQUIRED: &str = "required";
pub const CODE_INVALID_FORMAT: &str = "invalid_format";

/// Check a JSON object against field metadata
///
/// Required fields must be present and non-null. Present string values are
/// checked against their `format` tag; unknown formats are not checked.
/// Returns `None` when everything passes.
///
/// # Example
///
/// ```
/// use service_kit::validation::{validate_object, FieldMeta, ValidationErrorExt};
/// use serde_json::json;
///
/// let fields = vec![
///     FieldMeta::new("Email", r#"json:"email" format:"email""#),
///     FieldMeta::new("Name", r#"json:"name""#),
/// ];
///
/// let errors = validate_object(&fields, &json!({"email": "nope"}));
/// assert_eq!(errors.count(), 2);
/// assert_eq!(errors.get_field_errors("name")[0].code.as_deref(), Some("required"));
/// ```
pub fn validate_object(fields: &[FieldMeta], object: &Value) -> Option<ValidationError> {
    let mut errors = ValidationError::new();

    let Some(map) = object.as_object() else {
        errors.add_with_code("", "request body must be a JSON object", CODE_INVALID_FORMAT);
        return Some(errors);
    };

    for meta in fields {
        let name = field_name(meta);
        match map.get(&name) {
            None | Some(Value::Null) => {
                if is_field_required(meta) {
                    errors.add_with_code(name, "is required", CODE_REQUIRED);
                }
            }
            Some(value) => {
                if let Some(error) = check_format(&name, meta, value) {
                    errors.push(error);
                }
            }
        }
    }

    errors.into_option()
}

/// [`validate_object`] with the metadata of `T`
pub fn validate<T: TaggedStruct>(object: &Value) -> Option<ValidationError> {
    validate_object(&T::field_meta(), object)
}

fn check_format(name: &str, meta: &FieldMeta, value: &Value) -> Option<FieldError> {
    let format = meta.tag.lookup("format")?;
    let validator = validator_for(format)?;

    let valid = value.as_str().is_some_and(validator);
    (!valid).then(|| {
        FieldError::new(name, format!("must be a valid {}", format))
            .with_code(CODE_INVALID_FORMAT)
            .with_value(value.clone())
    })
}
