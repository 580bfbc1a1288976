use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Command error: {message}")]
    CommandError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TableError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TableError::ApiError(_) | TableError::HttpStatusError { .. } => ErrorCategory::Network,
            TableError::CsvError(_) | TableError::SerializationError(_) => ErrorCategory::Data,
            TableError::ConfigError { .. }
            | TableError::ConfigValidationError { .. }
            | TableError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TableError::IoError(_) => ErrorCategory::System,
            TableError::CommandError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TableError::ApiError(_) => "Check your network connection and the API endpoint",
            TableError::HttpStatusError { status, .. } if *status >= 500 => {
                "The catalog API is having trouble, try again later"
            }
            TableError::HttpStatusError { .. } => {
                "Check the page number and page size (the API caps limit at 100)"
            }
            TableError::CsvError(_) | TableError::SerializationError(_) => {
                "The response could not be encoded or decoded, check the endpoint returns artwork JSON"
            }
            TableError::IoError(_) => "Check that stdin/stdout are available and writable",
            TableError::ConfigError { .. }
            | TableError::ConfigValidationError { .. }
            | TableError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and run again"
            }
            TableError::CommandError { .. } => "Type 'help' to list the available commands",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TableError::ApiError(_) | TableError::HttpStatusError { .. } => {
                format!("Could not load artworks: {}", self)
            }
            TableError::CommandError { message } => message.clone(),
            _ => self.to_string(),
        }
    }

    pub(crate) fn command(message: impl Into<String>) -> Self {
        TableError::CommandError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
