//! Error types for emna-bench
//!
//! Configuration mistakes and numerical faults are reported as errors and
//! abort the run. Nothing here is retried.

use thiserror::Error;

/// Error type for run record persistence
#[derive(Debug, Error)]
pub enum RecordError {
    /// IO error while reading or writing a record
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Unrecognised record format name
    #[error("Unknown record format: {0}")]
    UnknownFormat(String),

    /// Record version is newer than this build understands
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    /// Record file not found
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Top-level error type for search operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// A position does not have the dimension the model was built for
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The objective returned NaN or an infinite value
    #[error("Non-finite fitness {value} at evaluation {evaluation}")]
    NonFiniteFitness { evaluation: usize, value: f64 },

    /// An individual reached the update step without a fitness
    #[error("Individual {0} has not been evaluated")]
    UnevaluatedIndividual(usize),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Numerical instability
    #[error("Numerical instability: {0}")]
    Numerical(String),

    /// Record persistence error
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

/// Result type alias for search operations
pub type EvoResult<T> = Result<T, EvolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evolution_error_display() {
        let err = EvolutionError::DimensionMismatch {
            expected: 10,
            actual: 5,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 10, got 5");

        let err = EvolutionError::NonFiniteFitness {
            evaluation: 7,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "Non-finite fitness NaN at evaluation 7");

        let err = EvolutionError::UnevaluatedIndividual(3);
        assert_eq!(err.to_string(), "Individual 3 has not been evaluated");

        let err = EvolutionError::Configuration("population size must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: population size must be positive"
        );
    }

    #[test]
    fn test_record_error_display() {
        let err = RecordError::VersionMismatch {
            expected: 1,
            found: 2,
        };
        assert_eq!(err.to_string(), "Version mismatch: expected 1, found 2");

        let err = RecordError::UnknownFormat("xml".to_string());
        assert_eq!(err.to_string(), "Unknown record format: xml");
    }

    #[test]
    fn test_evolution_error_from_record_error() {
        let record_err = RecordError::NotFound("missing.json".to_string());
        let evo_err: EvolutionError = record_err.into();
        assert!(matches!(evo_err, EvolutionError::Record(_)));
    }

    #[test]
    fn test_record_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RecordError = io.into();
        assert!(matches!(err, RecordError::Io(_)));
    }
}
