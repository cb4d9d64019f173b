use thiserror::Error;

#[derive(Error, Debug)]
pub enum CategorizeError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern compilation error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Rule error at {location}: {message}")]
    RulesError { location: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Rules,
    Input,
    Filesystem,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CategorizeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::RulesError { .. } | Self::PatternError(_) => ErrorCategory::Rules,
            Self::CsvError(_) => ErrorCategory::Input,
            Self::IoError(_) | Self::ZipError(_) => ErrorCategory::Filesystem,
            Self::SerializationError(_) => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Rules => ErrorSeverity::High,
            ErrorCategory::Input | ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::Filesystem => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ConfigError { .. } | Self::MissingConfigError { .. } => {
                "Check the command-line flags and the optional TOML config file".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            Self::RulesError { .. } | Self::PatternError(_) => {
                "Rules must be {\"Category\": {\"Subcategory\": [\"term\", ...]}}".to_string()
            }
            Self::CsvError(_) => {
                "Make sure the file is a CSV export from your bank".to_string()
            }
            Self::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the file path exists".to_string()
            }
            Self::IoError(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                "Check file permissions for the input and output paths".to_string()
            }
            Self::IoError(_) | Self::ZipError(_) => {
                "Check disk space and that the output directory is writable".to_string()
            }
            Self::SerializationError(_) => {
                "Re-run with --verbose to see which step failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Rules => format!("Could not load category rules: {}", self),
            ErrorCategory::Input => format!("Could not read transactions: {}", self),
            ErrorCategory::Filesystem => format!("File operation failed: {}", self),
            ErrorCategory::Processing => format!("Categorization failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CategorizeError>;
