use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to read input file '{path}': {source}")]
    InputFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    InputData,
    System,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ReportError::CsvError(_) | ReportError::ProcessingError { .. } => {
                ErrorCategory::InputData
            }
            ReportError::IoError(_) | ReportError::InputFileError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorSeverity::Medium,
            ReportError::CsvError(_) | ReportError::ProcessingError { .. } => ErrorSeverity::High,
            ReportError::IoError(_) | ReportError::InputFileError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::IoError(_) => {
                "Check file permissions and available disk space".to_string()
            }
            ReportError::InputFileError { path, .. } => {
                format!("Make sure '{}' exists and is readable", path)
            }
            ReportError::CsvError(_) => {
                "Check that the input file is valid delimited text".to_string()
            }
            ReportError::ConfigValidationError { field, .. }
            | ReportError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting and run again", field)
            }
            ReportError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            ReportError::ProcessingError { .. } => {
                "Inspect the input data around the reported location".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::IoError(e) => format!("File operation failed: {}", e),
            ReportError::InputFileError { path, .. } => {
                format!("Cannot read input file: {}", path)
            }
            ReportError::CsvError(e) => format!("Input file could not be parsed: {}", e),
            ReportError::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            ReportError::InvalidConfigValueError { field, value, reason } => {
                format!("Bad configuration value {}='{}': {}", field, value, reason)
            }
            ReportError::MissingConfigError { field } => {
                format!("Missing configuration: {}", field)
            }
            ReportError::ProcessingError { message } => {
                format!("Processing failed: {}", message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_and_category_mapping() {
        let err = ReportError::MissingConfigError {
            field: "lookup_path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = ReportError::InputFileError {
            path: "missing.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("missing.csv"));
        assert!(err.recovery_suggestion().contains("missing.csv"));
    }
}
