// Adapters layer: concrete implementations of the domain ports.

pub mod gemini;
pub mod smtp;

pub use gemini::GeminiClient;
pub use smtp::{DryRunSession, SmtpSession};
