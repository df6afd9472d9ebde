#[cfg(feature = "cli")]
pub mod cli;
pub mod env;

#[cfg(feature = "cli")]
pub use cli::CliArgs;
pub use env::{AppConfig, GeminiSettings, SmtpSettings, TlsMode};
