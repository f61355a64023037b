//! Loading and saving documents.
//!
//! Documents are held as [`serde_json::Value`] whatever their on-disk format,
//! so the same paths work for JSON and YAML files.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde_json::Value;

/// Errors that can occur while reading or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading piped input failed.
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    /// The file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `--in-place` was combined with a document read from stdin.
    #[error("a document read from stdin cannot be written back")]
    NotWritable,
}

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Picks the format from a file extension: `.yaml` and `.yml` are YAML,
    /// everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }

    pub fn parse(self, text: &str) -> Result<Value, DocumentError> {
        Ok(match self {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
        })
    }

    /// Renders a value. JSON output is pretty-printed; neither format ends
    /// with a newline.
    pub fn render(self, value: &Value) -> Result<String, DocumentError> {
        Ok(match self {
            Format::Json => serde_json::to_string_pretty(value)?,
            Format::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
        })
    }
}

/// Where a document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

/// A parsed document plus what is needed to write it back.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: Source,
    pub format: Format,
    pub root: Value,
}

impl Document {
    /// Loads a document. The path `-` reads JSON from stdin.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        if path.as_os_str() == "-" {
            return Self::read_from(io::stdin().lock(), Format::Json);
        }

        let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let format = Format::from_path(path);
        tracing::debug!(path = %path.display(), ?format, "loaded document");

        Ok(Document {
            source: Source::File(path.to_path_buf()),
            format,
            root: format.parse(&text)?,
        })
    }

    /// Reads a document from any reader.
    pub fn read_from(mut reader: impl Read, format: Format) -> Result<Self, DocumentError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(DocumentError::Stdin)?;
        Ok(Document {
            source: Source::Stdin,
            format,
            root: format.parse(&text)?,
        })
    }

    /// Writes the document back to its file in its original format.
    pub fn save(&self) -> Result<(), DocumentError> {
        let Source::File(path) = &self.source else {
            return Err(DocumentError::NotWritable);
        };
        let mut text = self.format.render(&self.root)?;
        text.push('\n');
        fs::write(path, text).map_err(|source| DocumentError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "saved document");
        Ok(())
    }
}
