//! Request validation example for service_kit
//!
//! Demonstrates:
//! - Describing a request struct with field tags
//! - Classifying parameters by location
//! - Validating a JSON body and rendering the 422 payload

use service_kit::prelude::*;
use service_kit::validation::{
    classify_params, field_name, is_field_required, validate, FieldMeta, TaggedStruct,
};
use std::sync::Arc;

/// PUT /users/{id}
struct UpdateUserRequest;

impl TaggedStruct for UpdateUserRequest {
    fn field_meta() -> Vec<FieldMeta> {
        vec![
            FieldMeta::new("ID", r#"path:"id" format:"uuid""#),
            FieldMeta::new("RequestID", r#"header:"X-Request-Id,omitempty""#),
            FieldMeta::new("DryRun", r#"query:"dry_run""#).pointer(),
            FieldMeta::new("Email", r#"json:"email" format:"email""#),
            FieldMeta::new("Website", r#"json:"website,omitempty" format:"url""#),
            FieldMeta::new("Birthday", r#"json:"birthday" format:"iso8601" optional:"true""#),
        ]
    }
}

fn main() {
    println!("=== service_kit Request Validation Example ===\n");

    let logger: SharedLogger = Arc::new(
        BeautifulLogger::builder()
            .level(LogLevel::Debug)
            .name("validation")
            .format_config(FormatConfig::compact())
            .build(),
    );

    println!("1. Parameter classification:");
    let params = classify_params::<UpdateUserRequest>();
    for (location, fields) in [
        ("path", &params.path),
        ("query", &params.query),
        ("header", &params.header),
        ("body", &params.body),
    ] {
        for meta in fields {
            logger.info(
                "parameter",
                &[
                    Field::string("location", location),
                    Field::string("name", field_name(meta)),
                    Field::bool("required", is_field_required(meta)),
                ],
            );
        }
    }

    println!("\n2. A valid body:");
    let valid = serde_json::json!({
        "id": "550e8400-e29b-41d4-a716-446655440000",
        "email": "ada@example.com",
        "website": "https://ada.dev"
    });
    match validate::<UpdateUserRequest>(&valid) {
        None => logger.info("body accepted", &[]),
        Some(errors) => logger.error("unexpected failure", &[Field::error(&errors)]),
    }

    println!("\n3. An invalid body:");
    let invalid = serde_json::json!({
        "id": "42",
        "website": "ftp://ada.dev",
        "birthday": "1815-12-10"
    });
    let errors = validate::<UpdateUserRequest>(&invalid);
    logger.warn(
        "body rejected",
        &[
            Field::uint64("error_count", errors.count() as u64),
            Field::string("summary", errors.error_message()),
        ],
    );

    let payload = errors.to_json_value();
    println!(
        "HTTP {}\n{}: {}\n\n{}",
        errors.status_code(),
        service_kit::validation::CONTENT_TYPE.0,
        service_kit::validation::CONTENT_TYPE.1,
        serde_json::to_string_pretty(&payload).unwrap_or_default()
    );

    println!("\n=== Example completed ===");
}
