//! Prebuilt field bundles for common service concerns

use super::context::{REQUEST_ID_KEY, TRACE_ID_KEY, USER_ID_KEY};
use super::field::{merge_fields, Field};
use std::time::Duration;

/// Ordered set of fields built fluently
///
/// # Example
///
/// ```
/// use service_kit::core::{http_request_fields, service_fields, FieldGroup};
/// use std::time::Duration;
///
/// let fields = FieldGroup::from(service_fields("billing", "1.4.2", "production"))
///     .extend(http_request_fields("GET", "/invoices", 200, Duration::from_millis(12)))
///     .into_fields();
/// assert_eq!(fields.len(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldGroup {
    fields: Vec<Field>,
}

impl FieldGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any earlier field with the same key
    #[must_use]
    pub fn add(self, field: Field) -> Self {
        self.extend(vec![field])
    }

    #[must_use]
    pub fn extend(mut self, fields: Vec<Field>) -> Self {
        self.fields = merge_fields(&self.fields, &fields);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<Field>> for FieldGroup {
    fn from(fields: Vec<Field>) -> Self {
        FieldGroup::new().extend(fields)
    }
}

/// `method`, `path`, `status`, `latency_ms`
pub fn http_request_fields(method: &str, path: &str, status: u16, latency: Duration) -> Vec<Field> {
    vec![
        Field::string("method", method),
        Field::string("path", path),
        Field::uint16("status", status),
        latency_ms(latency),
    ]
}

/// `user_agent` and `remote_addr`, each only when known
pub fn http_client_fields(user_agent: Option<&str>, remote_addr: Option<&str>) -> Vec<Field> {
    vec![
        Field::nullable("user_agent", user_agent),
        Field::nullable("remote_addr", remote_addr),
    ]
}

/// `db_operation`, `db_table`, `rows_affected`, `duration`
pub fn database_fields(operation: &str, table: &str, rows_affected: u64, duration: Duration) -> Vec<Field> {
    vec![
        Field::string("db_operation", operation),
        Field::string("db_table", table),
        Field::uint64("rows_affected", rows_affected),
        Field::duration("duration", duration),
    ]
}

/// `service`, `version`, `environment`
pub fn service_fields(name: &str, version: &str, environment: &str) -> Vec<Field> {
    vec![
        Field::string("service", name),
        Field::string("version", version),
        Field::string("environment", environment),
    ]
}

pub fn request_id(id: impl Into<String>) -> Field {
    Field::string(REQUEST_ID_KEY, id)
}

pub fn trace_id(id: impl Into<String>) -> Field {
    Field::string(TRACE_ID_KEY, id)
}

pub fn user_id(id: impl Into<String>) -> Field {
    Field::string(USER_ID_KEY, id)
}

pub fn component(name: impl Into<String>) -> Field {
    Field::string("component", name)
}

/// Whole milliseconds under `latency_ms`
pub fn latency_ms(elapsed: Duration) -> Field {
    Field::int64("latency_ms", i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    fn keys(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(Field::key).collect()
    }

    #[test]
    fn test_http_fields() {
        let fields = http_request_fields("POST", "/users", 201, Duration::from_millis(35));
        assert_eq!(keys(&fields), vec!["method", "path", "status", "latency_ms"]);
        assert_eq!(fields[2].value(), FieldValue::Uint16(201));
        assert_eq!(fields[3].value(), FieldValue::Int64(35));
    }

    #[test]
    fn test_client_fields_skip_unknown() {
        let group = FieldGroup::from(http_client_fields(None, Some("10.0.0.1")));
        assert_eq!(keys(group.fields()), vec!["remote_addr"]);
    }

    #[test]
    fn test_group_last_write_wins() {
        let group = FieldGroup::new()
            .add(component("api"))
            .extend(database_fields("select", "users", 3, Duration::from_millis(4)))
            .add(component("worker"));

        assert_eq!(group.len(), 5);
        assert_eq!(group.fields()[0].value(), FieldValue::String("worker".to_string()));
    }

    #[test]
    fn test_id_helpers_use_context_keys() {
        assert_eq!(request_id("r").key(), "request_id");
        assert_eq!(trace_id("t").key(), "trace_id");
        assert_eq!(user_id("u").key(), "user_id");
    }
}
