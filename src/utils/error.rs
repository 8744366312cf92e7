use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid reference data in {table} table at '{key}': {reason}")]
    InvalidReferenceData {
        table: String,
        key: String,
        reason: String,
    },

    #[error("Unknown {kind} '{value}'")]
    UnknownLabel { kind: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Config,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CostError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CostError::IoError(_) | CostError::CsvError(_) => ErrorCategory::Io,
            CostError::JsonError(_) | CostError::InvalidReferenceData { .. } => ErrorCategory::Data,
            CostError::ConfigValidationError { .. }
            | CostError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            CostError::UnknownLabel { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Config | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CostError::IoError(_) => "Check that the file exists and is readable".to_string(),
            CostError::JsonError(_) => {
                "Reference tables must be JSON objects mapping names to numbers".to_string()
            }
            CostError::CsvError(_) => "Try another output format such as --format text".to_string(),
            CostError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' entry in the configuration file", field)
            }
            CostError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            CostError::InvalidReferenceData { table, key, .. } => format!(
                "Fix '{}' in the {} table: keys must be trimmed and amounts non-negative numbers",
                key, table
            ),
            CostError::UnknownLabel { kind, .. } => match kind.as_str() {
                "housing type" => "Use one of: shared-room, studio, one-bed".to_string(),
                "lifestyle" => "Use one of: frugal, average, comfortable".to_string(),
                "output format" => "Use one of: text, json, csv".to_string(),
                _ => "Check the spelling of the value".to_string(),
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Data => format!("The reference data could not be loaded: {}", self),
            ErrorCategory::Config => format!("The configuration is not valid: {}", self),
            ErrorCategory::Input => format!("The input was not understood: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_label_is_medium_input_error() {
        let err = CostError::UnknownLabel {
            kind: "lifestyle".to_string(),
            value: "lavish".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("comfortable"));
        assert_eq!(err.to_string(), "Unknown lifestyle 'lavish'");
    }

    #[test]
    fn test_reference_data_error_is_high_severity() {
        let err = CostError::InvalidReferenceData {
            table: "rent".to_string(),
            key: "Hackney".to_string(),
            reason: "amount is negative".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("Hackney"));
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = CostError::InvalidConfigValueError {
            field: "data.dir".to_string(),
            value: "./nowhere".to_string(),
            reason: "directory does not exist".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("data.dir"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: CostError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
