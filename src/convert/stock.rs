//! Built-in converters for the common scalar types

use super::{downcast_input, FormatPolicy, TypeConverter};
use crate::error::{ConfigError, Result};
use chrono::NaiveDateTime;
use std::any::{Any, TypeId};

/// All built-in converters, in registration order.
pub(crate) fn builtins() -> Vec<Box<dyn TypeConverter>> {
    vec![
        Box::new(BoolConverter),
        Box::new(I8Converter),
        Box::new(I16Converter),
        Box::new(I32Converter),
        Box::new(I64Converter),
        Box::new(U8Converter),
        Box::new(U16Converter),
        Box::new(U32Converter),
        Box::new(U64Converter),
        Box::new(F32Converter),
        Box::new(F64Converter),
        Box::new(CharConverter),
        Box::new(StringConverter),
        Box::new(DateTimeConverter),
    ]
}

fn invalid(raw: &str, target: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        value: raw.to_string(),
        target,
    }
}

macro_rules! integer_converter {
    ($converter:ident, $ty:ty, $name:literal) => {
        pub struct $converter;

        impl TypeConverter for $converter {
            fn convertible_type(&self) -> TypeId {
                TypeId::of::<$ty>()
            }

            fn type_name(&self) -> &'static str {
                $name
            }

            fn convert_to_string(&self, value: &dyn Any, _policy: &FormatPolicy) -> Result<String> {
                Ok(downcast_input::<$ty>(value, $name)?.to_string())
            }

            fn convert_from_string(
                &self,
                raw: &str,
                _policy: &FormatPolicy,
            ) -> Result<Box<dyn Any>> {
                let parsed = raw
                    .trim()
                    .parse::<$ty>()
                    .map_err(|_| invalid(raw, $name))?;
                Ok(Box::new(parsed))
            }
        }
    };
}

integer_converter!(I8Converter, i8, "i8");
integer_converter!(I16Converter, i16, "i16");
integer_converter!(I32Converter, i32, "i32");
integer_converter!(I64Converter, i64, "i64");
integer_converter!(U8Converter, u8, "u8");
integer_converter!(U16Converter, u16, "u16");
integer_converter!(U32Converter, u32, "u32");
integer_converter!(U64Converter, u64, "u64");

macro_rules! float_converter {
    ($converter:ident, $ty:ty, $name:literal) => {
        pub struct $converter;

        impl TypeConverter for $converter {
            fn convertible_type(&self) -> TypeId {
                TypeId::of::<$ty>()
            }

            fn type_name(&self) -> &'static str {
                $name
            }

            fn convert_to_string(&self, value: &dyn Any, policy: &FormatPolicy) -> Result<String> {
                let text = downcast_input::<$ty>(value, $name)?.to_string();
                if policy.decimal_separator == '.' {
                    Ok(text)
                } else {
                    Ok(text.replace('.', &policy.decimal_separator.to_string()))
                }
            }

            fn convert_from_string(
                &self,
                raw: &str,
                policy: &FormatPolicy,
            ) -> Result<Box<dyn Any>> {
                let text = raw.trim();
                let normalized = if policy.decimal_separator == '.' {
                    text.to_string()
                } else {
                    text.replace(policy.decimal_separator, ".")
                };
                let parsed = normalized
                    .parse::<$ty>()
                    .map_err(|_| invalid(raw, $name))?;
                Ok(Box::new(parsed))
            }
        }
    };
}

float_converter!(F32Converter, f32, "f32");
float_converter!(F64Converter, f64, "f64");

/// Boolean converter with the classic config-file literal sets.
pub struct BoolConverter;

impl TypeConverter for BoolConverter {
    fn convertible_type(&self) -> TypeId {
        TypeId::of::<bool>()
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn convert_to_string(&self, value: &dyn Any, _policy: &FormatPolicy) -> Result<String> {
        Ok(downcast_input::<bool>(value, "bool")?.to_string())
    }

    fn convert_from_string(&self, raw: &str, _policy: &FormatPolicy) -> Result<Box<dyn Any>> {
        let parsed = match raw.trim().to_ascii_lowercase().as_str() {
            "false" | "off" | "no" | "0" => false,
            "true" | "on" | "yes" | "1" => true,
            _ => return Err(invalid(raw, "bool")),
        };
        Ok(Box::new(parsed))
    }
}

/// Single-character converter; the raw value must be exactly one character.
pub struct CharConverter;

impl TypeConverter for CharConverter {
    fn convertible_type(&self) -> TypeId {
        TypeId::of::<char>()
    }

    fn type_name(&self) -> &'static str {
        "char"
    }

    fn convert_to_string(&self, value: &dyn Any, _policy: &FormatPolicy) -> Result<String> {
        Ok(downcast_input::<char>(value, "char")?.to_string())
    }

    fn convert_from_string(&self, raw: &str, _policy: &FormatPolicy) -> Result<Box<dyn Any>> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Box::new(c)),
            _ => Err(invalid(raw, "char")),
        }
    }
}

/// Identity converter for strings.
pub struct StringConverter;

impl TypeConverter for StringConverter {
    fn convertible_type(&self) -> TypeId {
        TypeId::of::<String>()
    }

    fn type_name(&self) -> &'static str {
        "String"
    }

    fn convert_to_string(&self, value: &dyn Any, _policy: &FormatPolicy) -> Result<String> {
        Ok(downcast_input::<String>(value, "String")?.clone())
    }

    fn convert_from_string(&self, raw: &str, _policy: &FormatPolicy) -> Result<Box<dyn Any>> {
        Ok(Box::new(raw.to_string()))
    }
}

/// Date-time converter driven by the format policy's chrono format string.
pub struct DateTimeConverter;

impl TypeConverter for DateTimeConverter {
    fn convertible_type(&self) -> TypeId {
        TypeId::of::<NaiveDateTime>()
    }

    fn type_name(&self) -> &'static str {
        "NaiveDateTime"
    }

    fn convert_to_string(&self, value: &dyn Any, policy: &FormatPolicy) -> Result<String> {
        let value = downcast_input::<NaiveDateTime>(value, "NaiveDateTime")?;
        Ok(value.format(&policy.date_time_format).to_string())
    }

    fn convert_from_string(&self, raw: &str, policy: &FormatPolicy) -> Result<Box<dyn Any>> {
        let parsed = NaiveDateTime::parse_from_str(raw.trim(), &policy.date_time_format)
            .map_err(|_| invalid(raw, "NaiveDateTime"))?;
        Ok(Box::new(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> FormatPolicy {
        FormatPolicy::default()
    }

    fn decode<T: 'static>(converter: &dyn TypeConverter, raw: &str, policy: &FormatPolicy) -> T {
        *converter
            .convert_from_string(raw, policy)
            .unwrap()
            .downcast::<T>()
            .unwrap()
    }

    #[test]
    fn test_bool_literal_sets() {
        let policy = policy();
        for raw in ["true", "True", "on", "On", "yes", "1"] {
            assert!(decode::<bool>(&BoolConverter, raw, &policy), "{}", raw);
        }
        for raw in ["false", "Off", "no", "NO", "0"] {
            assert!(!decode::<bool>(&BoolConverter, raw, &policy), "{}", raw);
        }
    }

    #[test]
    fn test_bool_rejects_other_literals() {
        let result = BoolConverter.convert_from_string("maybe", &policy());
        match result {
            Err(ConfigError::InvalidValue { value, target }) => {
                assert_eq!(value, "maybe");
                assert_eq!(target, "bool");
            }
            _ => panic!("expected InvalidValue"),
        }
    }

    #[test]
    fn test_integer_parsing() {
        let policy = policy();
        assert_eq!(decode::<i32>(&I32Converter, "-42", &policy), -42);
        assert_eq!(decode::<u8>(&U8Converter, "255", &policy), 255);
        assert_eq!(decode::<i64>(&I64Converter, " 7 ", &policy), 7);
        assert!(U8Converter.convert_from_string("256", &policy).is_err());
        assert!(I32Converter.convert_from_string("1.5", &policy).is_err());
    }

    #[test]
    fn test_float_round_trip() {
        let policy = policy();
        assert_eq!(decode::<f64>(&F64Converter, "3.25", &policy), 3.25);
        let encoded = F64Converter.convert_to_string(&1.5f64, &policy).unwrap();
        assert_eq!(encoded, "1.5");
    }

    #[test]
    fn test_float_honors_decimal_separator_policy() {
        let policy = FormatPolicy {
            decimal_separator: ',',
            ..FormatPolicy::default()
        };
        assert_eq!(decode::<f64>(&F64Converter, "3,25", &policy), 3.25);
        let encoded = F64Converter.convert_to_string(&0.5f64, &policy).unwrap();
        assert_eq!(encoded, "0,5");
    }

    #[test]
    fn test_char_requires_single_character() {
        let policy = policy();
        assert_eq!(decode::<char>(&CharConverter, "x", &policy), 'x');
        assert!(CharConverter.convert_from_string("xy", &policy).is_err());
        assert!(CharConverter.convert_from_string("", &policy).is_err());
    }

    #[test]
    fn test_string_is_identity() {
        let policy = policy();
        assert_eq!(
            decode::<String>(&StringConverter, "hello world", &policy),
            "hello world"
        );
        let encoded = StringConverter
            .convert_to_string(&"abc".to_string(), &policy)
            .unwrap();
        assert_eq!(encoded, "abc");
    }

    #[test]
    fn test_date_time_uses_format_policy() {
        let policy = policy();
        let decoded = decode::<NaiveDateTime>(&DateTimeConverter, "2024-05-01 13:30:00", &policy);
        let encoded = DateTimeConverter.convert_to_string(&decoded, &policy).unwrap();
        assert_eq!(encoded, "2024-05-01 13:30:00");

        let date_only = FormatPolicy {
            date_time_format: "%d.%m.%Y %H:%M".to_string(),
            ..FormatPolicy::default()
        };
        let decoded = decode::<NaiveDateTime>(&DateTimeConverter, "01.05.2024 13:30", &date_only);
        let encoded = DateTimeConverter
            .convert_to_string(&decoded, &date_only)
            .unwrap();
        assert_eq!(encoded, "01.05.2024 13:30");
    }

    #[test]
    fn test_wrong_input_type_is_a_converter_error() {
        let result = BoolConverter.convert_to_string(&42i32, &policy());
        match result {
            Err(ConfigError::Converter(message)) => {
                assert!(message.contains("bool"));
            }
            _ => panic!("expected Converter error"),
        }
    }
}
