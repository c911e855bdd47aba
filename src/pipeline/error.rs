//! Error types and handling
//!
//! This module contains the error taxonomy of a generation run and the policy
//! deciding which failures skip a single item and which abort the run.

use crate::geometry::WktError;
use crate::sample::NTriplesError;
use crate::trace::TraceError;
use crate::types::{ConfigError, ConfigValidationError};
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that can occur during a generation run
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A WKT string could not be classified or parsed
    #[error("WKT error: {0}")]
    WktError(#[from] WktError),

    /// A GPS trace could not be read
    #[error("Trace error in {source_name}: {error}")]
    TraceError {
        /// File or stream the trace came from
        source_name: String,
        /// Underlying parse error
        error: TraceError,
    },

    /// A dataset to sample from could not be read
    #[error("Sample error in {source_name}: {error}")]
    SampleError {
        /// File the dataset came from
        source_name: String,
        /// Underlying parse error
        error: NTriplesError,
    },

    /// Output could not be produced
    #[error("Output error: {0}")]
    OutputError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigError> for GeneratorError {
    fn from(error: ConfigError) -> Self {
        GeneratorError::ConfigurationError(error.to_string())
    }
}

impl From<ConfigValidationError> for GeneratorError {
    fn from(error: ConfigValidationError) -> Self {
        GeneratorError::ConfigurationError(error.to_string())
    }
}

impl GeneratorError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an output error
    pub fn output_error(msg: impl Into<String>) -> Self {
        Self::OutputError(msg.into())
    }

    /// Create a trace error tagged with where the trace came from
    pub fn trace_error(source_name: impl Into<String>, error: TraceError) -> Self {
        Self::TraceError { source_name: source_name.into(), error }
    }

    /// Create a sample error tagged with the dataset it came from
    pub fn sample_error(source_name: impl Into<String>, error: NTriplesError) -> Self {
        Self::SampleError { source_name: source_name.into(), error }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors concern a single input item; the run can go on
    /// without it.
    pub fn is_recoverable(&self) -> bool {
        match self {
            GeneratorError::ConfigurationError(_) => false,
            GeneratorError::WktError(_) => false,
            GeneratorError::TraceError { .. } => true,
            GeneratorError::SampleError { .. } => true,
            GeneratorError::OutputError(_) => false,
            GeneratorError::IoError(_) => false,
            GeneratorError::SerializationError(_) => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            GeneratorError::ConfigurationError(_) => "Configuration",
            GeneratorError::WktError(_) => "WKT",
            GeneratorError::TraceError { .. } => "Trace",
            GeneratorError::SampleError { .. } => "Sample",
            GeneratorError::OutputError(_) => "Output",
            GeneratorError::IoError(_) => "IO",
            GeneratorError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for generation operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// What to do after an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Skip the current item and continue
    Skip,
    /// Abort the run
    Abort,
}

/// Error handler deciding between skipping and aborting
#[derive(Debug, Clone)]
pub struct ErrorHandler {
    /// Whether to continue on recoverable errors
    pub continue_on_recoverable: bool,
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self { continue_on_recoverable: true }
    }
}

impl ErrorHandler {
    /// Create a new error handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler that aborts on every error
    pub fn strict() -> Self {
        Self { continue_on_recoverable: false }
    }

    /// Log `error` and pick a recovery strategy
    pub fn handle_error(&self, error: &GeneratorError) -> RecoveryStrategy {
        if !error.is_recoverable() {
            error!("Critical error in {}: {}", error.category(), error);
            return RecoveryStrategy::Abort;
        }

        if self.continue_on_recoverable {
            warn!("Recoverable error in {}: {}", error.category(), error);
            RecoveryStrategy::Skip
        } else {
            info!("Aborting on recoverable error in {}: {}", error.category(), error);
            RecoveryStrategy::Abort
        }
    }

    /// Run `operation`, turning skippable errors into `Ok(None)`
    pub fn execute<T, F>(&self, operation: F) -> GeneratorResult<Option<T>>
    where
        F: FnOnce() -> GeneratorResult<T>,
    {
        match operation() {
            Ok(result) => Ok(Some(result)),
            Err(error) => match self.handle_error(&error) {
                RecoveryStrategy::Skip => Ok(None),
                RecoveryStrategy::Abort => Err(error),
            },
        }
    }
}
