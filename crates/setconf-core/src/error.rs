//! Error types for setconf
//!
//! Two layers: [`ParseError`] is the bare reason produced by a value
//! transform or the unit parser, and [`Error`] is what callers of the typed
//! accessors see, carrying the requested key and the raw value so the message
//! can be acted on without a debugger.

use std::fmt;

/// Result type alias for setconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// A value could not be converted to the requested type
///
/// Only the human-readable reason is kept. The accessor layer wraps it into
/// [`ErrorKind::SettingParse`] together with the key and raw value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ParseError {
    pub reason: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Main error type for setconf operations
#[derive(Debug, Clone)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Requested key the error relates to
    pub key: Option<String>,
    /// Raw textual value that failed to parse
    pub value: Option<String>,
    /// File or document the error relates to
    pub path: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
    /// Actionable help message, not part of the rendered message
    pub help: Option<String>,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No value and no default for a required key
    RequiredKeyMissing,
    /// A value was found but could not be converted
    SettingParse,
    /// A config file could not be read or parsed
    FileRead,
    /// An in-memory config document could not be parsed
    Parse,
}

impl Error {
    /// Create a required key missing error
    pub fn required_key_missing(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            kind: ErrorKind::RequiredKeyMissing,
            help: Some(format!(
                "Provide \"{}\" in a config file, environment variable or command line parameter, or give it a default",
                key
            )),
            key: Some(key),
            value: None,
            path: None,
            cause: None,
        }
    }

    /// Wrap a transform failure with the key and the raw value it failed on
    pub fn setting_parse(key: impl Into<String>, value: impl Into<String>, err: ParseError) -> Self {
        Self {
            kind: ErrorKind::SettingParse,
            key: Some(key.into()),
            value: Some(value.into()),
            path: None,
            cause: Some(err.reason),
            help: None,
        }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::FileRead,
            key: None,
            value: None,
            path: Some(path.into()),
            cause: Some(cause.into()),
            help: Some("Check that the file exists, is readable and is valid YAML, JSON or properties".into()),
        }
    }

    /// Create a document parse error
    pub fn parse(source: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            key: None,
            value: None,
            path: Some(source.into()),
            cause: Some(cause.into()),
            help: None,
        }
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key.as_deref().unwrap_or_default();
        let cause = self.cause.as_deref().unwrap_or_default();
        let path = self.path.as_deref().unwrap_or_default();

        match self.kind {
            ErrorKind::RequiredKeyMissing => write!(f, "Required key \"{}\" is missing", key),
            ErrorKind::SettingParse => write!(
                f,
                "Failed to parse setting \"{}\", the value is \"{}\", but {}",
                key,
                self.value.as_deref().unwrap_or_default(),
                cause
            ),
            ErrorKind::FileRead => write!(f, "Failed to read file: {}\n{}", path, cause),
            ErrorKind::Parse => write!(f, "Failed to parse {}: {}", path, cause),
        }
    }
}

impl std::error::Error for Error {}
