//! Error types for the freight desk service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the service can hit, from startup configuration
//! through dataset loading to request validation.

use thiserror::Error;

/// The main error type for the freight desk service.
///
/// Library code returns this type everywhere; the HTTP layer maps each
/// variant to a status code in [`crate::api::ApiErrorResponse`].
///
/// # Example
///
/// ```
/// use freight_desk::error::DeskError;
///
/// let error = DeskError::ConfigMissing {
///     var: "FMCSA_API_KEY".to_string(),
/// };
/// assert_eq!(error.to_string(), "Required setting not provided: FMCSA_API_KEY");
/// ```
#[derive(Debug, Error)]
pub enum DeskError {
    /// A required environment setting was absent or left at its placeholder.
    #[error("Required setting not provided: {var}")]
    ConfigMissing {
        /// The environment variable name.
        var: String,
    },

    /// An environment setting was present but could not be used.
    #[error("Invalid setting '{var}': {message}")]
    ConfigInvalid {
        /// The environment variable name.
        var: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The dataset file could not be opened.
    #[error("Dataset file not found: {path}")]
    DatasetNotFound {
        /// The path that could not be opened.
        path: String,
    },

    /// The dataset file could not be parsed.
    #[error("Failed to parse dataset '{path}': {message}")]
    DatasetParseError {
        /// The dataset path.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required column is absent from the dataset header.
    #[error("Dataset '{path}' is missing required column '{column}'")]
    MissingColumn {
        /// The dataset path.
        path: String,
        /// The missing column name.
        column: String,
    },

    /// A data row has no usable reference number.
    #[error("Dataset row {row} has no reference number")]
    MissingReference {
        /// One-based data row number (header excluded).
        row: usize,
    },

    /// Two rows normalise to the same reference number.
    #[error("Duplicate reference number in dataset: {reference}")]
    DuplicateReference {
        /// The normalised reference number.
        reference: String,
    },

    /// A reference number could not be coerced to the dataset key type.
    #[error("Invalid reference number '{value}': {message}")]
    InvalidReference {
        /// The value as supplied.
        value: String,
        /// Why it was rejected.
        message: String,
    },

    /// An MC number contained no digits.
    #[error("Invalid MC number '{value}': no digits found")]
    InvalidMcNumber {
        /// The value as supplied.
        value: String,
    },

    /// A load search named neither a reference number nor a full lane.
    #[error(
        "Insufficient information. Provide either reference_number or (origin, destination, equipment_type)."
    )]
    InsufficientSearchCriteria,

    /// No load carries the requested reference number.
    #[error("Load not found by reference number: {reference}")]
    LoadNotFound {
        /// The normalised reference number.
        reference: String,
    },

    /// A lane search matched nothing.
    #[error("No matching loads found by lane and equipment")]
    NoMatchingLoads,

    /// An unexpected fault inside request handling.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the fault, for logs only.
        message: String,
    },
}

/// A type alias for Results that return DeskError.
pub type DeskResult<T> = Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_missing_displays_var() {
        let error = DeskError::ConfigMissing {
            var: "FMCSA_API_KEY".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Required setting not provided: FMCSA_API_KEY"
        );
    }

    #[test]
    fn test_config_invalid_displays_var_and_message() {
        let error = DeskError::ConfigInvalid {
            var: "BIND_ADDRESS".to_string(),
            message: "invalid socket address syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid setting 'BIND_ADDRESS': invalid socket address syntax"
        );
    }

    #[test]
    fn test_missing_column_displays_path_and_column() {
        let error = DeskError::MissingColumn {
            path: "loads.csv".to_string(),
            column: "origin".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Dataset 'loads.csv' is missing required column 'origin'"
        );
    }

    #[test]
    fn test_insufficient_criteria_names_both_shapes() {
        let message = DeskError::InsufficientSearchCriteria.to_string();
        assert!(message.contains("reference_number"));
        assert!(message.contains("(origin, destination, equipment_type)"));
    }

    #[test]
    fn test_invalid_mc_number_displays_value() {
        let error = DeskError::InvalidMcNumber {
            value: "MC-".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid MC number 'MC-': no digits found");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<DeskError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> DeskResult<()> {
            Err(DeskError::LoadNotFound {
                reference: "REF100".to_string(),
            })
        }

        fn propagates_error() -> DeskResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(DeskError::LoadNotFound { .. })
        ));
    }
}
