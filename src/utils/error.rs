use thiserror::Error;

#[derive(Error, Debug)]
pub enum LessonError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {}", .fields.join(", "))]
    MissingConfigError { fields: Vec<String> },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Generation API returned HTTP {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("Unexpected API response: {message}")]
    ApiError { message: String },

    #[error("Invalid recipient address '{address}': {reason}")]
    AddressError { address: String, reason: String },

    #[error("Delivery failed: {message}")]
    DeliveryError { message: String },

    #[error("Template rendering failed: {0}")]
    RenderError(#[from] askama::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Api,
    Address,
    Delivery,
    Render,
}

impl LessonError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LessonError::ConfigError { .. }
            | LessonError::MissingConfigError { .. }
            | LessonError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LessonError::TransportError(_) | LessonError::HttpStatusError { .. } => {
                ErrorCategory::Transport
            }
            LessonError::ApiError { .. } => ErrorCategory::Api,
            LessonError::AddressError { .. } => ErrorCategory::Address,
            LessonError::DeliveryError { .. } => ErrorCategory::Delivery,
            LessonError::RenderError(_) => ErrorCategory::Render,
        }
    }

    /// Only configuration problems stop the run; everything else is scoped to one recipient.
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the environment variables or the .env file passed with --env-file"
            }
            ErrorCategory::Transport => "Check network access and the GEMINI_API_KEY quota",
            ErrorCategory::Api => "The generation API changed its response shape or refused the prompt",
            ErrorCategory::Address => "Fix the address in SMTP_TO",
            ErrorCategory::Delivery => "Check SMTP credentials and the server logs",
            ErrorCategory::Render => "The lesson template failed to render",
        }
    }
}

pub type Result<T> = std::result::Result<T, LessonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_configuration_errors_are_fatal() {
        let missing = LessonError::MissingConfigError {
            fields: vec!["SMTP_HOST".to_string(), "SMTP_TO".to_string()],
        };
        assert!(missing.is_fatal());
        assert_eq!(
            missing.to_string(),
            "Missing required configuration: SMTP_HOST, SMTP_TO"
        );

        let api = LessonError::ApiError {
            message: "no candidates".to_string(),
        };
        assert!(!api.is_fatal());
        assert_eq!(api.category(), ErrorCategory::Api);

        let status = LessonError::HttpStatusError {
            status: 503,
            body: String::new(),
        };
        assert_eq!(status.category(), ErrorCategory::Transport);
    }
}
