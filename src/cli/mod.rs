//! Command-line interface definition

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and convert configuration documents
#[derive(Parser, Debug, Clone)]
#[command(name = "inikit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print a summary of the document tree
    Inspect {
        /// Configuration file to read
        file: PathBuf,
    },

    /// Read one setting and print its value
    Get {
        /// Configuration file to read
        file: PathBuf,

        /// Section name (case-insensitive)
        section: String,

        /// Setting name (case-insensitive)
        setting: String,

        /// Decode the value as this type instead of printing it raw
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,

        /// Decode the value as an array of the chosen type
        #[arg(long)]
        array: bool,
    },

    /// Re-save the document with all comments dropped
    Strip {
        /// Configuration file to read
        file: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a text document to the binary format
    Pack {
        /// Text configuration file to read
        file: PathBuf,

        /// Binary file to write
        output: PathBuf,
    },

    /// Convert a binary document back to text
    Unpack {
        /// Binary configuration file to read
        file: PathBuf,

        /// Text file to write
        output: PathBuf,
    },
}

/// Target type for the `get` subcommand.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_defaults_to_string_kind() {
        let cli = Cli::parse_from(["inikit", "get", "app.cfg", "API", "Retries"]);
        match cli.command {
            Command::Get { kind, array, .. } => {
                assert_eq!(kind, ValueKind::String);
                assert!(!array);
            }
            _ => panic!("expected get subcommand"),
        }
    }

    #[test]
    fn test_global_flags_apply_after_subcommand() {
        let cli = Cli::parse_from(["inikit", "inspect", "app.cfg", "--no-color", "--verbose"]);
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn test_get_parses_kind_and_array() {
        let cli = Cli::parse_from([
            "inikit", "get", "app.cfg", "API", "Retries", "--as", "int", "--array",
        ]);
        match cli.command {
            Command::Get { kind, array, .. } => {
                assert_eq!(kind, ValueKind::Int);
                assert!(array);
            }
            _ => panic!("expected get subcommand"),
        }
    }
}
