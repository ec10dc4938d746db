//! Error handling for the configuration-document engine

use thiserror::Error;

/// Custom error types for the configuration-document engine
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A section header is missing its closing bracket
    #[error("closing bracket missing (line {line})")]
    ClosingBracketMissing { line: usize },

    /// Unexpected text after a section header's closing bracket
    #[error("unexpected token '{token}' (line {line})")]
    UnexpectedToken { token: String, line: usize },

    /// A non-section line without an assignment operator
    #[error("setting assignment expected (line {line})")]
    AssignmentExpected { line: usize },

    /// An assignment with an empty left-hand side
    #[error("setting name expected (line {line})")]
    NameExpected { line: usize },

    /// A setting that appears before any section header
    #[error("the setting '{name}' has to be in a section (line {line})")]
    SettingOutsideSection { name: String, line: usize },

    /// A raw value could not be converted to the requested type
    #[error("failed to convert value '{value}' to type {target}")]
    ValueCast {
        value: String,
        target: &'static str,
        #[source]
        cause: Box<ConfigError>,
    },

    /// A typed view was requested for a type with no registered converter
    #[error("failed to convert value '{value}' to type {target}; no converter for this type is registered")]
    MissingConverter { value: String, target: &'static str },

    /// A converter rejected the raw value
    #[error("the value '{value}' cannot be converted to type {target}")]
    InvalidValue { value: String, target: &'static str },

    /// Scalar and array accessors were mixed up
    #[error("setting '{name}': {detail}")]
    NotAScalar { name: String, detail: String },

    /// Arrays of arrays are not expressible in the value syntax
    #[error("jagged arrays are not supported")]
    JaggedArray,

    /// A named entry was not found where one was required
    #[error("a {kind} named '{name}' does not exist")]
    NotFound { kind: &'static str, name: String },

    /// Positional access past the end of a collection
    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A converter for the same type is already registered
    #[error("a converter for type {type_name} is already registered")]
    DuplicateConverter { type_name: &'static str },

    /// No converter is registered for the type being deregistered
    #[error("no converter is registered for type {type_name}")]
    ConverterNotRegistered { type_name: &'static str },

    /// A converter violated its contract (e.g. produced a foreign type)
    #[error("converter error: {0}")]
    Converter(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Text decoding errors (invalid UTF-8/UTF-16, truncated BOM data)
    #[error("text encoding error: {0}")]
    Encoding(String),

    /// Corrupt or unsupported binary configuration data
    #[error("binary configuration error: {0}")]
    Binary(String),

    /// Rejected engine option value
    #[error("invalid option value: {0}")]
    InvalidOption(String),
}

impl ConfigError {
    /// Create a new converter contract error
    pub fn converter<S: Into<String>>(message: S) -> Self {
        Self::Converter(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new text encoding error
    pub fn encoding<S: Into<String>>(message: S) -> Self {
        Self::Encoding(message.into())
    }

    /// Create a new binary format error
    pub fn binary<S: Into<String>>(message: S) -> Self {
        Self::Binary(message.into())
    }

    /// Create a new invalid option error
    pub fn invalid_option<S: Into<String>>(message: S) -> Self {
        Self::InvalidOption(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::ClosingBracketMissing { .. }
            | Self::UnexpectedToken { .. }
            | Self::AssignmentExpected { .. }
            | Self::NameExpected { .. }
            | Self::SettingOutsideSection { .. } => "PARSE",
            Self::ValueCast { .. } | Self::MissingConverter { .. } | Self::InvalidValue { .. } => {
                "CAST"
            }
            Self::NotAScalar { .. } | Self::JaggedArray => "SHAPE",
            Self::NotFound { .. } | Self::IndexOutOfRange { .. } => "IDENTITY",
            Self::DuplicateConverter { .. }
            | Self::ConverterNotRegistered { .. }
            | Self::Converter(_) => "REGISTRY",
            Self::Io(_) => "IO",
            Self::Encoding(_) => "ENCODING",
            Self::Binary(_) => "BINARY",
            Self::InvalidOption(_) => "OPTION",
        }
    }

    /// The 1-based source line for structural parse errors
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ClosingBracketMissing { line }
            | Self::UnexpectedToken { line, .. }
            | Self::AssignmentExpected { line }
            | Self::NameExpected { line }
            | Self::SettingOutsideSection { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            "PARSE" => 1,
            "CAST" | "SHAPE" => 2,
            "IDENTITY" | "REGISTRY" | "OPTION" => 3,
            "IO" | "ENCODING" | "BINARY" => 4,
            _ => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match category {
                "PARSE" => format!("[{}] {}", category.red().bold(), message.red()),
                "CAST" | "SHAPE" => format!("[{}] {}", category.yellow().bold(), message.yellow()),
                "IO" | "ENCODING" | "BINARY" => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                _ => format!("[{}] {}", category.magenta().bold(), message.magenta()),
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

/// Custom Result type for the engine
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ConfigError::SettingOutsideSection {
            name: "key".to_string(),
            line: 1,
        };
        let display = error.to_string();
        assert!(display.contains("'key'"));
        assert!(display.contains("line 1"));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            ConfigError::ClosingBracketMissing { line: 3 }.category(),
            "PARSE"
        );
        assert_eq!(
            ConfigError::MissingConverter {
                value: "x".to_string(),
                target: "f64",
            }
            .category(),
            "CAST"
        );
        assert_eq!(ConfigError::JaggedArray.category(), "SHAPE");
        assert_eq!(
            ConfigError::IndexOutOfRange { index: 9, len: 2 }.category(),
            "IDENTITY"
        );
        assert_eq!(
            ConfigError::DuplicateConverter { type_name: "bool" }.category(),
            "REGISTRY"
        );
        assert_eq!(ConfigError::io("nope").category(), "IO");
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        assert_eq!(ConfigError::AssignmentExpected { line: 12 }.line(), Some(12));
        assert_eq!(ConfigError::NameExpected { line: 4 }.line(), Some(4));
        assert_eq!(ConfigError::JaggedArray.line(), None);
    }

    #[test]
    fn test_value_cast_keeps_cause() {
        use std::error::Error;

        let cause = ConfigError::InvalidValue {
            value: "maybe".to_string(),
            target: "bool",
        };
        let error = ConfigError::ValueCast {
            value: "maybe".to_string(),
            target: "bool",
            cause: Box::new(cause),
        };
        assert!(error.to_string().contains("'maybe'"));
        let source = error.source().expect("cause should be chained");
        assert!(source.to_string().contains("cannot be converted"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ConfigError::AssignmentExpected { line: 1 }.exit_code(), 1);
        assert_eq!(ConfigError::JaggedArray.exit_code(), 2);
        assert_eq!(
            ConfigError::NotFound {
                kind: "section",
                name: "A".to_string(),
            }
            .exit_code(),
            3
        );
        assert_eq!(ConfigError::io("x").exit_code(), 4);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ConfigError = io_error.into();
        assert_eq!(error.category(), "IO");
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_console_formatting() {
        let error = ConfigError::AssignmentExpected { line: 7 };
        let plain = error.format_for_console(false);
        let colored = error.format_for_console(true);

        assert!(plain.contains("[PARSE]"));
        assert!(plain.contains("line 7"));
        assert!(colored.contains("line 7"));
    }
}
