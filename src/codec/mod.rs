//! Scalar/array encoding and decoding of raw setting values

use crate::convert::ConfigValue;
use crate::error::{ConfigError, Result};
use crate::model::Options;

/// Computes the array size of a raw value, or `None` if the value is not
/// array-shaped.
///
/// A value is array-shaped when its only non-space characters before the
/// first `{` and after the last `}` are none. The size is derived by
/// counting separator occurrences: `N` separators mean `N + 1` elements,
/// zero separators mean one element if the braces contain any non-space
/// character and zero otherwise. Separator characters embedded in element
/// text (e.g. inside quotes) are counted too; this miscount is a documented
/// limitation of the format, not a defect to fix.
pub fn array_size_of(raw: &str, separator: char) -> Option<usize> {
    if raw.is_empty() {
        return None;
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;

    // Only spaces may appear outside the braces.
    if raw[..start].chars().any(|c| c != ' ') {
        return None;
    }
    if raw[end + 1..].chars().any(|c| c != ' ') {
        return None;
    }

    let separators = raw.matches(separator).count();
    if separators > 0 {
        return Some(separators + 1);
    }

    // No separators; a single bare element still counts.
    if start < end && raw[start + 1..end].chars().any(|c| c != ' ') {
        Some(1)
    } else {
        Some(0)
    }
}

/// Splits an array-shaped raw value into trimmed element tokens.
///
/// Callers must have established array-shape and a non-zero size via
/// [`array_size_of`] first.
pub(crate) fn array_elements(raw: &str, separator: char) -> Vec<&str> {
    let start = match raw.find('{') {
        Some(index) => index,
        None => return Vec::new(),
    };
    let end = match raw.rfind('}') {
        Some(index) => index,
        None => return Vec::new(),
    };
    if end <= start {
        return Vec::new();
    }
    raw[start + 1..end].split(separator).map(str::trim).collect()
}

/// Decodes one element (or a whole scalar value) through the registry.
pub(crate) fn decode_scalar<T: ConfigValue>(raw: &str, options: &Options) -> Result<T> {
    let converter = match options.registry().resolve_for::<T>() {
        Some(converter) => converter,
        None => {
            return Err(ConfigError::MissingConverter {
                value: raw.to_string(),
                target: T::type_name(),
            })
        }
    };

    let boxed = converter
        .convert_from_string(raw, options.format())
        .map_err(|cause| ConfigError::ValueCast {
            value: raw.to_string(),
            target: T::type_name(),
            cause: Box::new(cause),
        })?;

    boxed.downcast::<T>().map(|value| *value).map_err(|_| {
        ConfigError::converter(format!(
            "converter for type {} produced a value of a different type",
            T::type_name()
        ))
    })
}

/// Encodes one value through the registry; unregistered types fall back to
/// their `Debug` form (fallback converters stringify, they never parse).
pub(crate) fn encode_scalar<T: ConfigValue>(value: &T, options: &Options) -> Result<String> {
    match options.registry().resolve_for::<T>() {
        Some(converter) => converter.convert_to_string(value, options.format()),
        None => Ok(format!("{:?}", value)),
    }
}

/// Decodes an array-shaped raw value into a typed vector.
///
/// `Ok(None)` means the value is not array-shaped at all.
pub(crate) fn decode_array<T: ConfigValue>(raw: &str, options: &Options) -> Result<Option<Vec<T>>> {
    if T::IS_ARRAY {
        return Err(ConfigError::JaggedArray);
    }

    let size = match array_size_of(raw, options.array_separator()) {
        Some(size) => size,
        None => return Ok(None),
    };
    if size == 0 {
        return Ok(Some(Vec::new()));
    }

    let mut values = Vec::with_capacity(size);
    for element in array_elements(raw, options.array_separator()) {
        values.push(decode_scalar::<T>(element, options)?);
    }
    Ok(Some(values))
}

/// Encodes a slice of values as `{a,b,c}` with the configured separator.
pub(crate) fn encode_array<T: ConfigValue>(values: &[T], options: &Options) -> Result<String> {
    if T::IS_ARRAY {
        return Err(ConfigError::JaggedArray);
    }

    let mut parts = Vec::with_capacity(values.len());
    for value in values {
        parts.push(encode_scalar(value, options)?);
    }
    Ok(format!(
        "{{{}}}",
        parts.join(&options.array_separator().to_string())
    ))
}
