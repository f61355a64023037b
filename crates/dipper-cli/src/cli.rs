//! Command-line definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::document::Format;

/// Read and write nested values in JSON and YAML documents.
#[derive(Debug, Parser)]
#[command(name = "dip", version, about)]
pub struct Cli {
    /// Separator between path segments.
    #[arg(
        short,
        long,
        global = true,
        env = "DIPPER_SEPARATOR",
        default_value = dipper::DEFAULT_SEPARATOR
    )]
    pub separator: String,

    /// Output format. Defaults to the format of the input document.
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<Format>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the value at each path.
    Get {
        /// Document to read, or `-` for JSON on stdin.
        file: PathBuf,
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Replace the value at a path.
    Set {
        file: PathBuf,
        path: String,
        /// New value, parsed as JSON when possible and as a string otherwise.
        value: String,
        /// Write the document back instead of printing it.
        #[arg(short, long)]
        in_place: bool,
    },

    /// Reset the value at a path to its zero value.
    Zero {
        file: PathBuf,
        path: String,
        #[arg(short, long)]
        in_place: bool,
    },

    /// Remove a map key, or zero any other value.
    Delete {
        file: PathBuf,
        path: String,
        #[arg(short, long)]
        in_place: bool,
    },
}
