pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::adapters::{DryRunSession, GeminiClient, SmtpSession};
pub use crate::config::AppConfig;
pub use crate::core::{delivery::DeliveryEngine, resolver::resolve_assignments};
pub use crate::utils::error::{LessonError, Result};
