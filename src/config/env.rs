use crate::domain::model::ProficiencyLevel;
use crate::utils::error::{LessonError, Result};
use crate::utils::validation::{
    validate_mailbox, validate_non_empty_string, validate_port, validate_url, Validate,
};
use lettre::message::Mailbox;
use std::fmt;
use std::path::Path;
use url::Url;

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-lite:generateContent";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_LEVEL: &str = "C1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    StartTls,
    Tls,
    None,
}

impl TlsMode {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "starttls" => Ok(TlsMode::StartTls),
            "tls" => Ok(TlsMode::Tls),
            "none" => Ok(TlsMode::None),
            other => Err(LessonError::InvalidConfigValueError {
                field: "SMTP_TLS".to_string(),
                value: other.to_string(),
                reason: "Expected one of: starttls, tls, none".to_string(),
            }),
        }
    }
}

#[derive(Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub endpoint: Url,
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: Mailbox,
    pub tls: TlsMode,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from.to_string())
            .field("tls", &self.tls)
            .finish()
    }
}

/// Everything one run needs, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiSettings,
    pub smtp: SmtpSettings,
    /// Raw delimited recipient list (`SMTP_TO`).
    pub recipients: String,
    /// Raw delimited level list (`LESSON_LEVEL`), possibly empty.
    pub levels: String,
    pub default_level: ProficiencyLevel,
}

impl AppConfig {
    /// Reads the process environment, after loading `env_file` (or `.env` when present).
    pub fn from_env(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| LessonError::ConfigError {
                    message: format!("Failed to load env file {}: {}", path.display(), e),
                })?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Every missing required key is
    /// reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = [
            "GEMINI_API_KEY",
            "SMTP_HOST",
            "SMTP_USER",
            "SMTP_PASS",
            "SMTP_FROM",
            "SMTP_TO",
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LessonError::MissingConfigError { fields: missing });
        }

        // checked above
        let require = |key: &str| get(key).unwrap_or_default();

        let endpoint = validate_url(
            "GEMINI_API_URL",
            &get("GEMINI_API_URL").unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
        )?;
        let port = match get("SMTP_PORT") {
            Some(raw) => validate_port("SMTP_PORT", &raw)?,
            None => DEFAULT_SMTP_PORT,
        };
        let tls = TlsMode::parse(&get("SMTP_TLS").unwrap_or_default())?;
        let from = validate_mailbox("SMTP_FROM", &require("SMTP_FROM"))?;

        let config = AppConfig {
            gemini: GeminiSettings {
                api_key: require("GEMINI_API_KEY").trim().to_string(),
                endpoint,
            },
            smtp: SmtpSettings {
                host: require("SMTP_HOST").trim().to_string(),
                port,
                username: require("SMTP_USER"),
                password: require("SMTP_PASS"),
                from,
                tls,
            },
            recipients: require("SMTP_TO"),
            levels: lookup("LESSON_LEVEL").unwrap_or_default(),
            default_level: ProficiencyLevel::new(DEFAULT_LEVEL)
                .ok_or_else(|| LessonError::ConfigError {
                    message: "default level is blank".to_string(),
                })?,
        };

        config.validate()?;
        Ok(config)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("SMTP_HOST", &self.smtp.host)?;
        validate_non_empty_string("GEMINI_API_KEY", &self.gemini.api_key)?;
        validate_non_empty_string("SMTP_TO", &self.recipients)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("GEMINI_API_KEY", "test-key"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "mailer"),
            ("SMTP_PASS", "secret"),
            ("SMTP_FROM", "lessons@example.com"),
            ("SMTP_TO", "a@x.com,b@x.com"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<AppConfig> {
        AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.smtp.tls, TlsMode::StartTls);
        assert_eq!(config.default_level.as_str(), "C1");
        assert_eq!(config.levels, "");
        assert_eq!(config.gemini.endpoint.as_str(), DEFAULT_GEMINI_API_URL);
    }

    #[test]
    fn test_all_missing_keys_reported_together() {
        let mut env = full_env();
        env.remove("SMTP_HOST");
        env.remove("SMTP_TO");
        env.insert("SMTP_PASS", "   ");

        match load(&env) {
            Err(LessonError::MissingConfigError { fields }) => {
                assert_eq!(fields, vec!["SMTP_HOST", "SMTP_PASS", "SMTP_TO"]);
            }
            other => panic!("expected missing config error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut env = full_env();
        env.insert("SMTP_PORT", "not-a-port");
        assert!(matches!(
            load(&env),
            Err(LessonError::InvalidConfigValueError { ref field, .. }) if field == "SMTP_PORT"
        ));

        let mut env = full_env();
        env.insert("SMTP_TLS", "ssl3");
        assert!(load(&env).is_err());

        let mut env = full_env();
        env.insert("SMTP_FROM", "nobody");
        assert!(load(&env).unwrap_err().is_fatal());
    }

    #[test]
    fn test_overrides() {
        let mut env = full_env();
        env.insert("SMTP_PORT", "465");
        env.insert("SMTP_TLS", "TLS");
        env.insert("LESSON_LEVEL", "B1|B2");
        env.insert("GEMINI_API_URL", "http://127.0.0.1:9999/generate");

        let config = load(&env).unwrap();
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.smtp.tls, TlsMode::Tls);
        assert_eq!(config.levels, "B1|B2");
        assert_eq!(config.gemini.endpoint.as_str(), "http://127.0.0.1:9999/generate");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&full_env()).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret"));
        assert!(!printed.contains("test-key"));
        assert!(printed.contains("<redacted>"));
    }
}
