use crate::utils::error::{LessonError, Result};
use lettre::message::Mailbox;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(LessonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(LessonError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LessonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_port(field_name: &str, value: &str) -> Result<u16> {
    match value.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(LessonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Port must be a number between 1 and 65535".to_string(),
        }),
        Ok(port) => Ok(port),
    }
}

pub fn validate_mailbox(field_name: &str, value: &str) -> Result<Mailbox> {
    value
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| LessonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid email address: {}", e),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LessonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("GEMINI_API_URL", "https://example.com/v1").is_ok());
        assert!(validate_url("GEMINI_API_URL", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("GEMINI_API_URL", "").is_err());
        assert!(validate_url("GEMINI_API_URL", "invalid-url").is_err());
        assert!(validate_url("GEMINI_API_URL", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert_eq!(validate_port("SMTP_PORT", "465").unwrap(), 465);
        assert_eq!(validate_port("SMTP_PORT", " 587 ").unwrap(), 587);
        assert!(validate_port("SMTP_PORT", "0").is_err());
        assert!(validate_port("SMTP_PORT", "70000").is_err());
        assert!(validate_port("SMTP_PORT", "smtp").is_err());
    }

    #[test]
    fn test_validate_mailbox() {
        assert!(validate_mailbox("SMTP_FROM", "lessons@example.com").is_ok());
        assert!(validate_mailbox("SMTP_FROM", "Daily Lesson <lessons@example.com>").is_ok());
        assert!(validate_mailbox("SMTP_FROM", "not an address").is_err());
    }
}
