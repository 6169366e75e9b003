use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Model returned HTTP {status}: {message}")]
    ModelError { status: u16, message: String },

    #[error("Model authentication failed: {message}")]
    AuthError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤分類，用於頂層報告
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Remote,
    Processing,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) | EtlError::CsvError(_) => ErrorCategory::Io,
            EtlError::ApiError(_) | EtlError::ModelError { .. } | EtlError::AuthError { .. } => {
                ErrorCategory::Remote
            }
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Remote => format!("The language model call failed: {}", self),
            ErrorCategory::Processing => format!("Could not process the input: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MissingConfigError { .. } => {
                "Set GEMINI_API_KEY in the environment or in a .env file"
            }
            EtlError::AuthError { .. } => "Check that GEMINI_API_KEY is a valid API key",
            EtlError::ModelError { status: 429, .. } => {
                "The model quota was exceeded; wait and run again or raise --delay-secs"
            }
            _ => match self.category() {
                ErrorCategory::Configuration => "Review the command line flags and job file",
                ErrorCategory::Io => "Check that the input exists and the output path is writable",
                ErrorCategory::Remote => "Check network connectivity and the model endpoint",
                ErrorCategory::Processing => "Make sure the input file is UTF-8 text",
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
