//! Error types for vacheck.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error here is raised while loading or validating, before the
//! consistency engine touches a vector.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout vacheck.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for vacheck operations.
#[derive(Debug, Error)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match &self.context {
            Some(ctx) if !ctx.is_empty() => write!(f, " ({ctx})"),
            _ => Ok(()),
        }
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an input shape error (wrong element count).
    #[must_use]
    pub fn input_shape(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::InputShape { expected, actual })
    }

    /// Creates an input domain error (value outside present/absent/missing).
    #[must_use]
    pub fn input_domain(position: usize, value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InputDomain {
            position,
            value: value.into(),
        })
    }

    /// Creates an input identifier error (missing or empty record ID).
    #[must_use]
    pub fn input_identifier(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InputIdentifier(reason.into()))
    }

    /// Creates a resource error (rule table or record file malformed).
    #[must_use]
    pub fn resource(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Resource(message.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Returns true if this error was raised by record validation.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InputShape { .. }
                | ErrorKind::InputDomain { .. }
                | ErrorKind::InputIdentifier(_)
        )
    }

    /// Returns true if this error was raised while reading a resource.
    #[must_use]
    pub fn is_resource_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Resource(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Input vector has the wrong number of elements.
    #[error("input must have {expected} elements, got {actual}")]
    InputShape {
        /// The required element count (identifier slot included).
        expected: usize,
        /// The element count supplied.
        actual: usize,
    },

    /// Input holds a value other than present, absent, or missing.
    #[error("input value {value:?} at position {position} is not present, absent, or missing")]
    InputDomain {
        /// Position of the offending slot.
        position: usize,
        /// The offending value as supplied.
        value: String,
    },

    /// Record identifier is missing or empty.
    #[error("invalid record identifier: {0}")]
    InputIdentifier(String),

    /// Rule table or record resource is missing or malformed.
    #[error("resource error: {0}")]
    Resource(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding or decoding a report failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Resource name (file path or `<memory>`).
    pub source: Option<String>,
    /// Line number in the resource (1-indexed).
    pub line: Option<usize>,
    /// Column name in the resource.
    pub column: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Sets the column name.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Returns true if no location is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.line.is_none() && self.column.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
            sep = ", ";
        } else if let Some(line) = self.line {
            write!(f, "line {line}")?;
            sep = ", ";
        }
        if let Some(column) = &self.column {
            write!(f, "{sep}column {column}")?;
        }
        Ok(())
    }
}
