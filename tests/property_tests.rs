//! Property-based tests for service_kit using proptest

use proptest::prelude::*;
use service_kit::core::{merge_fields, FieldKind};
use service_kit::prelude::*;
use service_kit::validation::{ValidationError, ValidationErrorExt};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        let lowered: LogLevel = level.to_lowercase_str().parse().unwrap();
        prop_assert_eq!(level, lowered);
    }

    /// Test that LogLevel ordering matches the numeric values
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;
        prop_assert_eq!(level1 <= level2, val1 <= val2);
    }
}

// ============================================================================
// Field Round Trip Tests
// ============================================================================

proptest! {
    #[test]
    fn test_int8_roundtrip(v in any::<i8>()) {
        let field = Field::wrap(Field::int8("n", v).to_encoded());
        prop_assert_eq!(field.value(), FieldValue::Int8(v));
    }

    #[test]
    fn test_int16_roundtrip(v in any::<i16>()) {
        let field = Field::wrap(Field::int16("n", v).to_encoded());
        prop_assert_eq!(field.value(), FieldValue::Int16(v));
    }

    #[test]
    fn test_int32_roundtrip(v in any::<i32>()) {
        let field = Field::wrap(Field::int32("n", v).to_encoded());
        prop_assert_eq!(field.value(), FieldValue::Int32(v));
    }

    #[test]
    fn test_int64_roundtrip(v in any::<i64>()) {
        let field = Field::wrap(Field::int64("n", v).to_encoded());
        prop_assert_eq!(field.value(), FieldValue::Int64(v));
    }

    #[test]
    fn test_uint64_roundtrip(v in any::<u64>()) {
        let field = Field::wrap(Field::uint64("n", v).to_encoded());
        prop_assert_eq!(field.value(), FieldValue::Uint64(v));
    }

    #[test]
    fn test_uint16_roundtrip(v in any::<u16>()) {
        let field = Field::wrap(Field::uint16("n", v).to_encoded());
        prop_assert_eq!(field.value(), FieldValue::Uint16(v));
    }

    #[test]
    fn test_uint32_roundtrip(v in any::<u32>()) {
        let field = Field::wrap(Field::uint32("n", v).to_encoded());
        prop_assert_eq!(field.value(), FieldValue::Uint32(v));
    }

    #[test]
    fn test_uintptr_roundtrip(v in any::<usize>()) {
        let encoded = Field::uintptr("p", v).to_encoded();
        prop_assert_eq!(encoded.kind, FieldKind::Uintptr);
        prop_assert_eq!(Field::wrap(encoded).value(), FieldValue::Uintptr(v));
    }

    #[test]
    fn test_uint8_roundtrip(v in any::<u8>()) {
        let encoded = Field::uint8("n", v).to_encoded();
        prop_assert_eq!(encoded.kind, FieldKind::Uint8);
        prop_assert_eq!(Field::wrap(encoded).value(), FieldValue::Uint8(v));
    }

    #[test]
    fn test_float32_bits_roundtrip(bits in any::<u32>()) {
        let value = f32::from_bits(bits);
        match Field::wrap(Field::float32("f", value).to_encoded()).value() {
            FieldValue::Float32(back) => prop_assert_eq!(back.to_bits(), bits),
            other => prop_assert!(false, "unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_float64_bits_roundtrip(bits in any::<u64>()) {
        let value = f64::from_bits(bits);
        match Field::wrap(Field::float64("f", value).to_encoded()).value() {
            FieldValue::Float64(back) => prop_assert_eq!(back.to_bits(), bits),
            other => prop_assert!(false, "unexpected value {:?}", other),
        }
    }
}

// ============================================================================
// Merge Tests
// ============================================================================

proptest! {
    /// Merged set holds each distinct key once, with the override's value
    #[test]
    fn test_merge_overrides_win(
        base in proptest::collection::vec(("[a-e]", any::<i64>()), 0..8),
        overrides in proptest::collection::vec(("[a-e]", any::<i64>()), 0..8),
    ) {
        let base_fields: Vec<Field> = base.iter().map(|(k, v)| Field::int64(k.clone(), *v)).collect();
        let override_fields: Vec<Field> = overrides.iter().map(|(k, v)| Field::int64(k.clone(), *v)).collect();

        let merged = merge_fields(&base_fields, &override_fields);

        let mut keys: Vec<&str> = merged.iter().map(Field::key).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), total);

        for (key, _) in &overrides {
            let last = overrides.iter().rev().find(|(k, _)| k == key).map(|(_, v)| *v);
            let found = merged.iter().find(|f| f.key() == key.as_str()).map(Field::value);
            prop_assert_eq!(found, last.map(FieldValue::Int64));
        }
    }

    /// Skip fields never survive a merge
    #[test]
    fn test_merge_drops_skips(flags in proptest::collection::vec(any::<bool>(), 0..10)) {
        let fields: Vec<Field> = flags
            .iter()
            .enumerate()
            .map(|(i, keep)| Field::conditional(*keep, format!("k{}", i), i as i64))
            .collect();
        let merged = merge_fields(&[], &fields);
        prop_assert_eq!(merged.len(), flags.iter().filter(|k| **k).count());
    }
}

// ============================================================================
// Validation Error Tests
// ============================================================================

proptest! {
    #[test]
    fn test_merge_adds_counts(a in 0usize..10, b in 0usize..10) {
        let mut left = ValidationError::new();
        for i in 0..a {
            left.add(format!("l{}", i), "bad");
        }
        let mut right = ValidationError::new();
        for i in 0..b {
            right.add(format!("r{}", i), "bad");
        }

        left.merge(&right);
        prop_assert_eq!(left.count(), a + b);
        prop_assert_eq!(left.has_errors(), a + b > 0);
    }

    #[test]
    fn test_field_errors_keep_insertion_order(messages in proptest::collection::vec("[a-z]{1,8}", 0..6)) {
        let mut errors = ValidationError::new();
        for message in &messages {
            errors.add("target", message.clone());
            errors.add("other", "noise");
        }

        let found: Vec<String> = errors
            .get_field_errors("target")
            .iter()
            .map(|e| e.message.clone())
            .collect();
        prop_assert_eq!(found, messages);
    }

    #[test]
    fn test_missing_aggregate_is_always_empty(field in "[a-z]{0,8}") {
        let none: Option<ValidationError> = None;
        prop_assert!(!none.has_errors());
        prop_assert_eq!(none.count(), 0);
        prop_assert!(none.get_field_errors(&field).is_empty());
        prop_assert_eq!(none.error_message(), "Validation failed");
    }
}
