use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Artifact not available at '{path}': {reason}")]
    ArtifactMissing { path: String, reason: String },

    #[error("Schema mismatch: classifier expects {expected}, got {actual}")]
    SchemaMismatch { expected: String, actual: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Schema,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictError {
    pub fn artifact_missing(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ArtifactMissing {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::ArtifactMissing { .. } => ErrorCategory::Artifact,
            PredictError::SchemaMismatch { .. } => ErrorCategory::Schema,
            PredictError::ConfigValidationError { .. }
            | PredictError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PredictError::ValidationError { .. } => ErrorCategory::Input,
            PredictError::CsvError(_) | PredictError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Artifact | ErrorCategory::Schema | ErrorCategory::System => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PredictError::ArtifactMissing { path, .. } => {
                format!("Could not load '{}'. The prediction cannot be made.", path)
            }
            PredictError::SchemaMismatch { .. } => {
                "The passenger record does not match what the model expects.".to_string()
            }
            PredictError::ValidationError { message } => format!("Invalid input: {}", message),
            PredictError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Artifact => {
                "Check that the model and dataset files exist and the paths are correct"
            }
            ErrorCategory::Schema => {
                "Use a model artifact trained on Pclass, Sex, Age, SibSp, Fare in that order"
            }
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
            ErrorCategory::Input => "Adjust the passenger details to the allowed ranges",
            ErrorCategory::System => "Re-run with --verbose for more details",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
