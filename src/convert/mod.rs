//! Type converter registry and the string<->value codec traits

pub mod stock;

use crate::error::{ConfigError, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;

/// A value type that settings can be decoded to and encoded from.
///
/// The engine identifies value types by their `TypeId`; this trait adds the
/// two pieces the registry cannot get from `Any` alone: whether the type is
/// an array type (so scalar and array accessors cannot be mixed up), and a
/// readable name for error messages. `Debug` backs the fallback
/// stringification path for types without a registered converter.
///
/// Custom types opt in with a one-line impl:
///
/// ```
/// use inikit::ConfigValue;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Quality { Low, High }
/// impl ConfigValue for Quality {}
/// ```
pub trait ConfigValue: Any + Debug + Sized {
    /// True if this type represents an array of elements.
    const IS_ARRAY: bool = false;

    /// Readable type name used in error messages.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! scalar_config_value {
    ($ty:ty, $name:literal) => {
        impl ConfigValue for $ty {
            fn type_name() -> &'static str {
                $name
            }
        }
    };
}

scalar_config_value!(bool, "bool");
scalar_config_value!(i8, "i8");
scalar_config_value!(i16, "i16");
scalar_config_value!(i32, "i32");
scalar_config_value!(i64, "i64");
scalar_config_value!(u8, "u8");
scalar_config_value!(u16, "u16");
scalar_config_value!(u32, "u32");
scalar_config_value!(u64, "u64");
scalar_config_value!(f32, "f32");
scalar_config_value!(f64, "f64");
scalar_config_value!(char, "char");
scalar_config_value!(String, "String");
scalar_config_value!(chrono::NaiveDateTime, "NaiveDateTime");

impl<T: ConfigValue> ConfigValue for Vec<T> {
    const IS_ARRAY: bool = true;
}

/// Formatting policy shared by all converters.
///
/// The culture-invariant equivalent of per-process number/date formats:
/// owned by [`Options`](crate::Options), passed by reference into every
/// conversion, so independent configurations can carry independent
/// policies.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatPolicy {
    /// Decimal separator emitted and accepted by the float converters.
    pub decimal_separator: char,
    /// chrono format string for date-time values.
    pub date_time_format: String,
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            decimal_separator: crate::defaults::DEFAULT_DECIMAL_SEPARATOR,
            date_time_format: crate::defaults::DEFAULT_DATE_TIME_FORMAT.to_string(),
        }
    }
}

/// A bidirectional string codec for one value type.
pub trait TypeConverter: Send + Sync {
    /// The type this converter encodes and decodes.
    fn convertible_type(&self) -> TypeId;

    /// Readable name of the convertible type, for error messages.
    fn type_name(&self) -> &'static str;

    /// Converts a value of the convertible type to its string form.
    fn convert_to_string(&self, value: &dyn Any, policy: &FormatPolicy) -> Result<String>;

    /// Converts a string to a boxed value of the convertible type.
    fn convert_from_string(&self, raw: &str, policy: &FormatPolicy) -> Result<Box<dyn Any>>;
}

pub(crate) fn downcast_input<'a, T: ConfigValue>(
    value: &'a dyn Any,
    type_name: &'static str,
) -> Result<&'a T> {
    value.downcast_ref::<T>().ok_or_else(|| {
        ConfigError::converter(format!(
            "converter for type {} received a value of a different type",
            type_name
        ))
    })
}

/// Mapping from value types to their converters.
///
/// Mutable only through explicit register/deregister calls. Resolution never
/// fails: a type without a registered converter falls back to a
/// stringify-only path (its `Debug` form) and reports `MissingConverter`
/// when a decode is attempted. Registration is not synchronized; callers
/// that mutate a shared registry concurrently must serialize externally.
pub struct ConverterRegistry {
    converters: HashMap<TypeId, Box<dyn TypeConverter>>,
}

impl ConverterRegistry {
    /// Create a registry with all built-in converters pre-registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for converter in stock::builtins() {
            // Builtins cover distinct types; registration cannot collide.
            let _ = registry.register(converter);
        }
        registry
    }

    /// Create a registry with no converters at all.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Register a converter for its convertible type.
    pub fn register(&mut self, converter: Box<dyn TypeConverter>) -> Result<()> {
        let type_id = converter.convertible_type();
        if self.converters.contains_key(&type_id) {
            return Err(ConfigError::DuplicateConverter {
                type_name: converter.type_name(),
            });
        }
        self.converters.insert(type_id, converter);
        Ok(())
    }

    /// Deregister the converter for a type.
    pub fn deregister<T: ConfigValue>(&mut self) -> Result<()> {
        if self.converters.remove(&TypeId::of::<T>()).is_none() {
            return Err(ConfigError::ConverterNotRegistered {
                type_name: T::type_name(),
            });
        }
        Ok(())
    }

    /// Look up the converter for a type id, if one is registered.
    pub fn resolve(&self, type_id: TypeId) -> Option<&dyn TypeConverter> {
        self.converters.get(&type_id).map(|c| c.as_ref())
    }

    /// Look up the converter for a value type, if one is registered.
    pub fn resolve_for<T: ConfigValue>(&self) -> Option<&dyn TypeConverter> {
        self.resolve(TypeId::of::<T>())
    }

    /// True if a converter for the type is registered.
    pub fn is_registered<T: ConfigValue>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// True if no converters are registered.
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.converters.values().map(|c| c.type_name()).collect();
        names.sort_unstable();
        f.debug_struct("ConverterRegistry")
            .field("types", &names)
            .finish()
    }
}

/// Name<->value table converter for enumeration types.
///
/// Decoding strips a `Type.` qualifier up to the last dot before matching,
/// so both `Quality.High` and `High` decode to the same variant.
pub struct EnumConverter<T> {
    entries: Vec<(&'static str, T)>,
}

impl<T> EnumConverter<T>
where
    T: ConfigValue + Clone + PartialEq + Send + Sync,
{
    /// Create a converter from (name, value) pairs.
    pub fn new(entries: &[(&'static str, T)]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }
}

impl<T> TypeConverter for EnumConverter<T>
where
    T: ConfigValue + Clone + PartialEq + Send + Sync,
{
    fn convertible_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        T::type_name()
    }

    fn convert_to_string(&self, value: &dyn Any, _policy: &FormatPolicy) -> Result<String> {
        let value = downcast_input::<T>(value, T::type_name())?;
        self.entries
            .iter()
            .find(|(_, v)| v == value)
            .map(|(name, _)| (*name).to_string())
            .ok_or_else(|| {
                ConfigError::converter(format!(
                    "no name is mapped for the given {} value",
                    T::type_name()
                ))
            })
    }

    fn convert_from_string(&self, raw: &str, _policy: &FormatPolicy) -> Result<Box<dyn Any>> {
        // Values may arrive qualified, e.g. "Quality.High"; match on the
        // symbolic name after the last dot.
        let token = match raw.rfind('.') {
            Some(index) => raw[index + 1..].trim(),
            None => raw.trim(),
        };
        self.entries
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, v)| Box::new(v.clone()) as Box<dyn Any>)
            .ok_or_else(|| ConfigError::InvalidValue {
                value: raw.to_string(),
                target: T::type_name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Quality {
        Low,
        High,
    }

    impl ConfigValue for Quality {
        fn type_name() -> &'static str {
            "Quality"
        }
    }

    fn quality_converter() -> EnumConverter<Quality> {
        EnumConverter::new(&[("Low", Quality::Low), ("High", Quality::High)])
    }

    #[test]
    fn test_builtins_are_preregistered() {
        let registry = ConverterRegistry::default();
        assert!(registry.is_registered::<bool>());
        assert!(registry.is_registered::<i32>());
        assert!(registry.is_registered::<u64>());
        assert!(registry.is_registered::<f64>());
        assert!(registry.is_registered::<char>());
        assert!(registry.is_registered::<String>());
        assert!(registry.is_registered::<chrono::NaiveDateTime>());
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = ConverterRegistry::default();
        registry.register(Box::new(quality_converter())).unwrap();

        match registry.register(Box::new(quality_converter())) {
            Err(ConfigError::DuplicateConverter { type_name }) => {
                assert_eq!(type_name, "Quality");
            }
            _ => panic!("expected DuplicateConverter"),
        }
    }

    #[test]
    fn test_deregister_absent_fails() {
        let mut registry = ConverterRegistry::empty();
        match registry.deregister::<bool>() {
            Err(ConfigError::ConverterNotRegistered { type_name }) => {
                assert_eq!(type_name, "bool");
            }
            _ => panic!("expected ConverterNotRegistered"),
        }
    }

    #[test]
    fn test_deregister_then_resolve_falls_back() {
        let mut registry = ConverterRegistry::default();
        registry.deregister::<bool>().unwrap();
        assert!(registry.resolve_for::<bool>().is_none());
    }

    #[test]
    fn test_enum_converter_round_trip() {
        let converter = quality_converter();
        let policy = FormatPolicy::default();

        let decoded = converter.convert_from_string("High", &policy).unwrap();
        assert_eq!(*decoded.downcast::<Quality>().unwrap(), Quality::High);

        let encoded = converter
            .convert_to_string(&Quality::Low, &policy)
            .unwrap();
        assert_eq!(encoded, "Low");
    }

    #[test]
    fn test_enum_converter_strips_type_qualifier() {
        let converter = quality_converter();
        let policy = FormatPolicy::default();

        let decoded = converter
            .convert_from_string("Quality.High", &policy)
            .unwrap();
        assert_eq!(*decoded.downcast::<Quality>().unwrap(), Quality::High);

        // Only the last dot counts.
        let decoded = converter
            .convert_from_string("Media.Quality.Low", &policy)
            .unwrap();
        assert_eq!(*decoded.downcast::<Quality>().unwrap(), Quality::Low);
    }

    #[test]
    fn test_enum_converter_rejects_unknown_name() {
        let converter = quality_converter();
        let policy = FormatPolicy::default();
        match converter.convert_from_string("Medium", &policy) {
            Err(ConfigError::InvalidValue { value, target }) => {
                assert_eq!(value, "Medium");
                assert_eq!(target, "Quality");
            }
            _ => panic!("expected InvalidValue"),
        }
    }

    #[test]
    fn test_vec_is_array_type() {
        assert!(!<bool as ConfigValue>::IS_ARRAY);
        assert!(<Vec<bool> as ConfigValue>::IS_ARRAY);
        assert!(<Vec<Vec<bool>> as ConfigValue>::IS_ARRAY);
    }
}
