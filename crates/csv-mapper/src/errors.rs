//! Error types for converter resolution, token conversion and row mapping

use thiserror::Error;

/// Errors raised while looking up or constructing a converter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No converter is known for the requested type
    #[error("No converter registered for type '{type_name}'")]
    NotRegistered { type_name: String },

    /// A converter specialization could not be built
    #[error("Cannot construct converter for type '{type_name}': {message}")]
    Configuration { type_name: String, message: String },

    /// The requested type shape has no defined conversion
    #[error("Unsupported target type '{type_name}': {reason}")]
    Unsupported { type_name: String, reason: String },
}

impl ProviderError {
    /// Create a not-registered error naming `T`
    pub fn not_registered<T: ?Sized>() -> Self {
        Self::NotRegistered {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported-shape error
    pub fn unsupported(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is the not-registered condition
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }

    /// Name of the type the error refers to
    pub fn type_name(&self) -> &str {
        match self {
            Self::NotRegistered { type_name }
            | Self::Configuration { type_name, .. }
            | Self::Unsupported { type_name, .. } => type_name,
        }
    }
}

/// Result type alias for converter lookups
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// A single token could not be converted to the target type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot convert '{value}' to {target}: {message}")]
pub struct ConversionError {
    /// The offending input token
    pub value: String,
    /// Name of the target type
    pub target: String,
    /// Reason reported by the converter
    pub message: String,
}

impl ConversionError {
    /// Create a conversion error
    pub fn new(
        value: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            target: target.into(),
            message: message.into(),
        }
    }

    /// Attach the position of an element inside a token group
    pub fn at_position(mut self, position: usize) -> Self {
        self.message = format!("{} (element {})", self.message, position);
        self
    }
}

/// Errors that can occur while reading and mapping CSV
#[derive(Error, Debug, Clone)]
pub enum CsvError {
    /// A line could not be split into fields
    #[error("Tokenize error at row {row}: {message}")]
    Tokenize { row: usize, message: String },

    /// A field could not be converted
    #[error("Conversion error at row {row}, column {column}: {source}")]
    Conversion {
        row: usize,
        column: usize,
        #[source]
        source: ConversionError,
    },

    /// A mapped column is absent from the row
    #[error("Missing column {column} at row {row}: row has {actual} fields")]
    MissingColumn {
        row: usize,
        column: usize,
        actual: usize,
    },

    /// Converter lookup failed while building a mapping
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CsvError {
    /// Create a tokenize error at a specific row
    pub fn tokenize(row: usize, message: impl Into<String>) -> Self {
        Self::Tokenize {
            row,
            message: message.into(),
        }
    }

    /// Create a conversion error for a column
    pub fn conversion(row: usize, column: usize, source: ConversionError) -> Self {
        Self::Conversion {
            row,
            column,
            source,
        }
    }

    /// Create a missing-column error
    pub fn missing_column(row: usize, column: usize, actual: usize) -> Self {
        Self::MissingColumn {
            row,
            column,
            actual,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the row index if available
    pub fn row_index(&self) -> Option<usize> {
        match self {
            Self::Tokenize { row, .. } => Some(*row),
            Self::Conversion { row, .. } => Some(*row),
            Self::MissingColumn { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Get the column index if available
    pub fn column_index(&self) -> Option<usize> {
        match self {
            Self::Conversion { column, .. } | Self::MissingColumn { column, .. } => Some(*column),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CsvError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Result type alias for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;
