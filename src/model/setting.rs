//! Setting: a named raw string value with typed views computed on demand

use crate::codec;
use crate::convert::ConfigValue;
use crate::error::{ConfigError, Result};
use crate::model::{Comment, Options};
use std::any::Any;
use std::cell::Cell;
use std::fmt;

/// A single `name = value` entry inside a [`Section`](crate::Section).
///
/// The raw string value is the only persisted representation; typed scalar
/// and array views are computed on demand against an [`Options`] context
/// and never stored. Array-ness is derived lazily from the raw value and
/// cached together with the separator generation it was computed under.
#[derive(Debug, Clone)]
pub struct Setting {
    name: String,
    raw_value: String,
    comment: Option<Comment>,
    pre_comments: Vec<Comment>,
    // (array size, separator generation) of the last computation.
    cached_size: Cell<Option<(Option<usize>, u64)>>,
}

impl Setting {
    /// Create a setting with an empty value.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_raw_value(name, String::new())
    }

    /// Create a setting from a name and a raw string value.
    pub fn with_raw_value(name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_value: raw_value.into(),
            comment: None,
            pre_comments: Vec::new(),
            cached_size: Cell::new(None),
        }
    }

    /// The setting's name. Name identity is ASCII case-insensitive.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw string value, exactly as parsed or last assigned.
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// Replace the raw string value.
    pub fn set_raw_value(&mut self, raw_value: impl Into<String>) {
        self.raw_value = raw_value.into();
        self.cached_size.set(None);
    }

    /// Reset the value to the empty string.
    pub fn set_empty(&mut self) {
        self.set_raw_value(String::new());
    }

    /// The inline comment, if any.
    pub fn comment(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }

    /// Set or clear the inline comment.
    pub fn set_comment(&mut self, comment: Option<Comment>) {
        self.comment = comment;
    }

    /// Comment lines attached above this setting.
    pub fn pre_comments(&self) -> &[Comment] {
        &self.pre_comments
    }

    /// Append a pre-comment.
    pub fn add_pre_comment(&mut self, comment: Comment) {
        self.pre_comments.push(comment);
    }

    /// Replace all pre-comments.
    pub fn set_pre_comments(&mut self, comments: Vec<Comment>) {
        self.pre_comments = comments;
    }

    /// The array size of the value, or `None` if it is not array-shaped.
    ///
    /// The result is cached; the cache is invalidated when the raw value
    /// changes or the options' array separator generation advances.
    pub fn array_size(&self, options: &Options) -> Option<usize> {
        let generation = options.separator_generation();
        if let Some((size, stamped)) = self.cached_size.get() {
            if stamped == generation {
                return size;
            }
        }
        let size = codec::array_size_of(&self.raw_value, options.array_separator());
        self.cached_size.set(Some((size, generation)));
        size
    }

    /// True if the value is array-shaped.
    pub fn is_array(&self, options: &Options) -> bool {
        self.array_size(options).is_some()
    }

    /// Decode the value as a scalar of type `T`.
    pub fn value<T: ConfigValue>(&self, options: &Options) -> Result<T> {
        if T::IS_ARRAY {
            return Err(ConfigError::NotAScalar {
                name: self.name.clone(),
                detail: "the requested type is an array type; use array_value() instead"
                    .to_string(),
            });
        }
        if self.is_array(options) {
            return Err(ConfigError::NotAScalar {
                name: self.name.clone(),
                detail: "the setting holds an array value; use array_value() instead".to_string(),
            });
        }
        codec::decode_scalar(&self.raw_value, options)
    }

    /// Decode the value as an array with elements of type `T`.
    ///
    /// Returns `Ok(None)` when the value is not array-shaped, and
    /// `Ok(Some(vec![]))` for the empty array `{}`.
    pub fn array_value<T: ConfigValue>(&self, options: &Options) -> Result<Option<Vec<T>>> {
        codec::decode_array(&self.raw_value, options)
    }

    /// Encode a scalar value into the setting.
    pub fn set_value<T: ConfigValue>(&mut self, value: &T, options: &Options) -> Result<()> {
        let raw = codec::encode_scalar(value, options)?;
        self.set_raw_value(raw);
        Ok(())
    }

    /// Encode a slice of values as an array.
    pub fn set_array<T: ConfigValue>(&mut self, values: &[T], options: &Options) -> Result<()> {
        let raw = codec::encode_array(values, options)?;
        self.raw_value = raw;
        // The element count is known exactly; no need to recompute.
        self.cached_size
            .set(Some((Some(values.len()), options.separator_generation())));
        Ok(())
    }

    /// Encode a heterogeneous array; the converter is resolved per element
    /// from each boxed value's runtime type.
    pub fn set_array_dyn(&mut self, values: &[Box<dyn Any>], options: &Options) -> Result<()> {
        let mut parts = Vec::with_capacity(values.len());
        for value in values {
            let type_id = (**value).type_id();
            let converter = options.registry().resolve(type_id).ok_or(
                ConfigError::ConverterNotRegistered {
                    type_name: "<unregistered element type>",
                },
            )?;
            parts.push(converter.convert_to_string(&**value, options.format())?);
        }
        self.raw_value = format!(
            "{{{}}}",
            parts.join(&options.array_separator().to_string())
        );
        self.cached_size
            .set(Some((Some(values.len()), options.separator_generation())));
        Ok(())
    }
}

impl PartialEq for Setting {
    fn eq(&self, other: &Self) -> bool {
        // The size cache is derived state and excluded from identity.
        self.name == other.name
            && self.raw_value == other.raw_value
            && self.comment == other.comment
            && self.pre_comments == other.pre_comments
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.raw_value)
    }
}
