//! Engine options: parse tunables, format policy, and the converter registry

use crate::convert::{ConverterRegistry, FormatPolicy};
use crate::defaults;
use crate::error::{ConfigError, Result};

/// The context a configuration document is parsed, rendered, and converted
/// against.
///
/// Each [`Configuration`](crate::Configuration) owns one `Options` value;
/// there is no hidden global state, so tests and embedders can run with
/// fully independent registries and format policies.
#[derive(Debug)]
pub struct Options {
    comment_delimiters: Vec<char>,
    array_separator: char,
    parse_inline_comments: bool,
    parse_pre_comments: bool,
    format: FormatPolicy,
    registry: ConverterRegistry,
    separator_generation: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            comment_delimiters: defaults::DEFAULT_COMMENT_DELIMITERS.to_vec(),
            array_separator: defaults::DEFAULT_ARRAY_ELEMENT_SEPARATOR,
            parse_inline_comments: true,
            parse_pre_comments: true,
            format: FormatPolicy::default(),
            registry: ConverterRegistry::with_builtins(),
            separator_generation: 0,
        }
    }
}

impl Options {
    /// Create options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters that may introduce a comment.
    pub fn comment_delimiters(&self) -> &[char] {
        &self.comment_delimiters
    }

    /// Replace the comment delimiter set. The set must not be empty.
    pub fn set_comment_delimiters(&mut self, delimiters: Vec<char>) -> Result<()> {
        if delimiters.is_empty() {
            return Err(ConfigError::invalid_option(
                "the comment delimiter set must not be empty",
            ));
        }
        self.comment_delimiters = delimiters;
        Ok(())
    }

    /// Separator between elements of an array-shaped value.
    pub fn array_separator(&self) -> char {
        self.array_separator
    }

    /// Replace the array element separator. The zero character is rejected.
    ///
    /// Changing the separator bumps a monotonic generation counter; cached
    /// array sizes stamped with an older generation are recomputed on next
    /// access, even if the separator is later reset to a previous value.
    pub fn set_array_separator(&mut self, separator: char) -> Result<()> {
        if separator == '\0' {
            return Err(ConfigError::invalid_option(
                "the zero character is not allowed as array element separator",
            ));
        }
        if separator != self.array_separator {
            self.array_separator = separator;
            self.separator_generation += 1;
        }
        Ok(())
    }

    /// Whether inline comments are captured during parsing.
    pub fn parse_inline_comments(&self) -> bool {
        self.parse_inline_comments
    }

    /// Enable or disable inline comment capture.
    pub fn set_parse_inline_comments(&mut self, enabled: bool) {
        self.parse_inline_comments = enabled;
    }

    /// Whether leading comment lines are captured during parsing.
    pub fn parse_pre_comments(&self) -> bool {
        self.parse_pre_comments
    }

    /// Enable or disable pre-comment capture.
    pub fn set_parse_pre_comments(&mut self, enabled: bool) {
        self.parse_pre_comments = enabled;
    }

    /// The number/date format policy used by the converters.
    pub fn format(&self) -> &FormatPolicy {
        &self.format
    }

    /// Mutable access to the format policy.
    pub fn format_mut(&mut self) -> &mut FormatPolicy {
        &mut self.format
    }

    /// The converter registry used for typed value views.
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Mutable access to the converter registry.
    pub fn registry_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.registry
    }

    pub(crate) fn separator_generation(&self) -> u64 {
        self.separator_generation
    }
}
