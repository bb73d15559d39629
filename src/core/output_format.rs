//! Line encoders for the production and development sinks
//!
//! - Json: one JSON object per line, for machines
//! - Console: tab-separated columns, for humans; tabs are collapsed and the
//!   line colored by [`ColorWriter`](crate::backends::ColorWriter)

use super::field::FieldValue;
use super::log_entry::LogEntry;
use super::format_config::CallerFormat;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

/// Output encoding of the sink backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SinkEncoder {
    /// Example: `{"level":"info","ts":"2025-01-08T10:30:45.123Z","msg":"Request processed"}`
    #[default]
    Json,

    /// Example: `2025-01-08T10:30:45.123Z	INFO	api	main.rs:10	Request processed	{"status":200}`
    Console,
}

/// Optional columns of an encoded line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkColumns {
    pub timestamp: bool,
    pub caller: bool,
}

impl Default for SinkColumns {
    fn default() -> Self {
        Self {
            timestamp: true,
            caller: true,
        }
    }
}

impl SinkColumns {
    #[must_use]
    pub fn with_timestamp(mut self, show: bool) -> Self {
        self.timestamp = show;
        self
    }

    #[must_use]
    pub fn with_caller(mut self, show: bool) -> Self {
        self.caller = show;
        self
    }
}

impl SinkEncoder {
    /// Encode one entry, without trailing newline
    pub fn encode(&self, entry: &LogEntry, columns: SinkColumns) -> String {
        match self {
            SinkEncoder::Json => self.encode_json(entry, columns),
            SinkEncoder::Console => self.encode_console(entry, columns),
        }
    }

    fn encode_json(&self, entry: &LogEntry, columns: SinkColumns) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level.to_lowercase_str().to_string()),
        );
        if columns.timestamp {
            json_obj.insert(
                "ts".to_string(),
                serde_json::Value::String(entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        if !entry.logger_name.is_empty() {
            json_obj.insert(
                "logger".to_string(),
                serde_json::Value::String(entry.logger_name.clone()),
            );
        }
        if columns.caller {
            json_obj.insert(
                "caller".to_string(),
                serde_json::Value::String(entry.caller.format(CallerFormat::Short)),
            );
        }
        json_obj.insert(
            "msg".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        insert_fields(&mut json_obj, &entry.fields);

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }

    fn encode_console(&self, entry: &LogEntry, columns: SinkColumns) -> String {
        let mut parts = Vec::with_capacity(6);
        if columns.timestamp {
            parts.push(entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        parts.push(entry.level.to_str().to_string());
        if !entry.logger_name.is_empty() {
            parts.push(entry.logger_name.clone());
        }
        if columns.caller {
            parts.push(entry.caller.format(CallerFormat::Short));
        }
        parts.push(entry.message.clone());

        if !entry.fields.is_empty() {
            let mut fields = serde_json::Map::new();
            insert_fields(&mut fields, &entry.fields);
            parts.push(serde_json::Value::Object(fields).to_string());
        }

        parts.join("\t")
    }
}

/// Insert fields in order; a namespace field nests everything after it
fn insert_fields(target: &mut serde_json::Map<String, serde_json::Value>, fields: &[(String, FieldValue)]) {
    let Some(split) = fields.iter().position(|(_, v)| matches!(v, FieldValue::Namespace)) else {
        for (key, value) in fields {
            target.insert(key.clone(), value.to_json_value());
        }
        return;
    };

    let (before, rest) = fields.split_at(split);
    for (key, value) in before {
        target.insert(key.clone(), value.to_json_value());
    }
    let mut nested = serde_json::Map::new();
    insert_fields(&mut nested, &rest[1..]);
    target.insert(rest[0].0.clone(), serde_json::Value::Object(nested));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Field, LogLevel};

    fn sample_entry() -> LogEntry {
        LogEntry::new(LogLevel::Info, "Request completed")
            .with_logger_name("api.http")
            .with_fields(&[Field::string("request_id", "abc-123"), Field::int64("latency_ms", 42)])
    }

    fn no_caller() -> SinkColumns {
        SinkColumns::default().with_caller(false)
    }

    #[test]
    fn test_json_format() {
        let result = SinkEncoder::Json.encode(&sample_entry(), no_caller());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["msg"], "Request completed");
        assert_eq!(parsed["logger"], "api.http");
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["latency_ms"], 42);
        assert!(parsed["ts"].is_string());
        assert!(parsed.get("caller").is_none());
    }

    #[test]
    fn test_json_caller_unknown() {
        let result = SinkEncoder::Json.encode(&sample_entry(), SinkColumns::default());
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["caller"], "unknown:0");
    }

    #[test]
    fn test_json_namespace_nests_fields() {
        let entry = LogEntry::new(LogLevel::Info, "nested").with_fields(&[
            Field::string("service", "billing"),
            Field::namespace("db"),
            Field::string("table", "invoices"),
        ]);
        let parsed: serde_json::Value =
            serde_json::from_str(&SinkEncoder::Json.encode(&entry, no_caller())).unwrap();

        assert_eq!(parsed["service"], "billing");
        assert_eq!(parsed["db"]["table"], "invoices");
    }

    #[test]
    fn test_console_format_columns() {
        let result = SinkEncoder::Console.encode(&sample_entry(), no_caller());
        let columns: Vec<&str> = result.split('\t').collect();

        assert_eq!(columns.len(), 5);
        assert_eq!(columns[1], "INFO");
        assert_eq!(columns[2], "api.http");
        assert_eq!(columns[3], "Request completed");
        assert!(columns[4].contains("\"request_id\":\"abc-123\""));
    }

    #[test]
    fn test_console_format_without_fields() {
        let entry = LogEntry::new(LogLevel::Warn, "disk low");
        let result = SinkEncoder::Console.encode(&entry, SinkColumns::default());
        assert!(result.ends_with("WARN\tunknown:0\tdisk low"));
    }

    #[test]
    fn test_timestamp_column_omitted() {
        let columns = no_caller().with_timestamp(false);

        let parsed: serde_json::Value =
            serde_json::from_str(&SinkEncoder::Json.encode(&sample_entry(), columns)).unwrap();
        assert!(parsed.get("ts").is_none());
        assert_eq!(parsed["msg"], "Request completed");

        let line = SinkEncoder::Console.encode(&LogEntry::new(LogLevel::Warn, "disk low"), columns);
        assert_eq!(line, "WARN\tdisk low");
    }

    #[test]
    fn test_encoder_default() {
        assert_eq!(SinkEncoder::default(), SinkEncoder::Json);
    }
}
