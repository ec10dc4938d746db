//! inikit
//!
//! A comment-preserving configuration-document engine. It parses a
//! line-oriented text format (`[Section]` headers, `name = value` settings,
//! `#`/`;`/`'` comments) into a typed document tree, offers on-demand typed
//! scalar and array views over raw string values through a pluggable
//! converter registry, serializes back with comments intact, and maps
//! sections onto arbitrary host structs through an explicit field binder.

pub mod app;
pub mod binary;
pub mod binder;
pub mod cli;
pub mod codec;
pub mod convert;
pub mod encoding;
pub mod error;
pub mod model;
pub mod parser;

// Re-export commonly used types
pub use binder::{Bindable, Binder, Field};
pub use convert::{ConfigValue, ConverterRegistry, EnumConverter, FormatPolicy, TypeConverter};
pub use encoding::TextEncoding;
pub use error::{ConfigError, Result};
pub use model::{Comment, Configuration, Options, Section, Setting};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    /// Characters that may introduce a comment.
    pub const DEFAULT_COMMENT_DELIMITERS: &[char] = &['#', ';', '\''];

    /// Separator between elements of an array-shaped value.
    pub const DEFAULT_ARRAY_ELEMENT_SEPARATOR: char = ',';

    /// Decimal separator used by the float converters.
    pub const DEFAULT_DECIMAL_SEPARATOR: char = '.';

    /// chrono format string used by the date-time converter.
    pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}
