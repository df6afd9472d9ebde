use daily_lesson::config::TlsMode;
use daily_lesson::{AppConfig, LessonError};
use std::io::Write;
use tempfile::NamedTempFile;

// Only test in this binary: dotenvy writes into the process environment.
#[test]
fn test_load_from_env_file() {
    let mut env_file = NamedTempFile::new().unwrap();
    writeln!(
        env_file,
        r#"GEMINI_API_KEY=file-key
SMTP_HOST=smtp.example.com
SMTP_PORT=2525
SMTP_USER=mailer
SMTP_PASS="p@ss word"
SMTP_FROM="Daily Lesson <lessons@example.com>"
SMTP_TO=a@x.com;b@x.com|c@x.com
LESSON_LEVEL=B1,C2
SMTP_TLS=none"#
    )
    .unwrap();

    let config = AppConfig::from_env(Some(env_file.path())).unwrap();

    assert_eq!(config.gemini.api_key, "file-key");
    assert_eq!(config.smtp.port, 2525);
    assert_eq!(config.smtp.password, "p@ss word");
    assert_eq!(config.smtp.from.email.to_string(), "lessons@example.com");
    assert_eq!(config.smtp.tls, TlsMode::None);
    assert_eq!(config.recipients, "a@x.com;b@x.com|c@x.com");
    assert_eq!(config.levels, "B1,C2");

    let missing = AppConfig::from_env(Some(std::path::Path::new("/nonexistent/daily-lesson.env")));
    assert!(matches!(missing, Err(LessonError::ConfigError { .. })));
}
