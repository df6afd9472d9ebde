use crate::domain::model::OutgoingEmail;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Turns a rendered prompt into lesson text.
#[async_trait]
pub trait LessonGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// An open, authenticated mail session shared by every recipient of a run.
#[async_trait]
pub trait MailSession: Send {
    async fn send(&mut self, email: OutgoingEmail) -> Result<()>;

    /// Releases the session. Called once, after the last recipient.
    async fn close(&mut self) -> Result<()>;
}
