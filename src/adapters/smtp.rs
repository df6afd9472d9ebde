use crate::config::{SmtpSettings, TlsMode};
use crate::domain::model::OutgoingEmail;
use crate::domain::ports::MailSession;
use crate::utils::error::{LessonError, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::PoolConfig;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

fn delivery_error(message: impl std::fmt::Display) -> LessonError {
    LessonError::DeliveryError {
        message: message.to_string(),
    }
}

/// Builds the multipart/alternative message for one recipient.
pub fn build_message(from: &Mailbox, email: OutgoingEmail) -> Result<Message> {
    Message::builder()
        .from(from.clone())
        .to(email.to)
        .subject(email.subject)
        .multipart(MultiPart::alternative_plain_html(
            email.text_body,
            email.html_body,
        ))
        .map_err(|e| delivery_error(format!("failed to build message: {}", e)))
}

/// One authenticated SMTP connection reused for every recipient of the run.
pub struct SmtpSession {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
    host: String,
}

impl SmtpSession {
    /// Connects and authenticates. Fails if the server rejects the connection
    /// or the credentials.
    pub async fn open(settings: &SmtpSettings) -> Result<Self> {
        let builder = match settings.tls {
            TlsMode::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
                .map_err(delivery_error)?,
            TlsMode::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                    .map_err(delivery_error)?
            }
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .pool_config(PoolConfig::new().max_size(1))
            .build();

        tracing::debug!(
            "Connecting to SMTP server {}:{} ({:?})",
            settings.host,
            settings.port,
            settings.tls
        );
        match transport.test_connection().await {
            Ok(true) => {}
            Ok(false) => {
                return Err(delivery_error(format!(
                    "SMTP server {} did not accept the connection",
                    settings.host
                )))
            }
            Err(e) => return Err(delivery_error(e)),
        }
        tracing::info!("📬 SMTP session open on {}:{}", settings.host, settings.port);

        Ok(Self {
            transport: Some(transport),
            from: settings.from.clone(),
            host: settings.host.clone(),
        })
    }
}

#[async_trait]
impl MailSession for SmtpSession {
    async fn send(&mut self, email: OutgoingEmail) -> Result<()> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| delivery_error("SMTP session already closed"))?;

        let message = build_message(&self.from, email)?;
        transport.send(message).await.map_err(delivery_error)?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        // Dropping the transport releases the pooled connection.
        if self.transport.take().is_some() {
            tracing::debug!("SMTP session to {} released", self.host);
        }
        Ok(())
    }
}

/// Logs messages instead of sending them. Used by `--dry-run`.
#[derive(Debug, Default)]
pub struct DryRunSession {
    pub delivered: Vec<OutgoingEmail>,
    pub closed: bool,
}

#[async_trait]
impl MailSession for DryRunSession {
    async fn send(&mut self, email: OutgoingEmail) -> Result<()> {
        tracing::info!("📝 [dry-run] would send '{}' to {}", email.subject, email.to);
        tracing::debug!("[dry-run] plain text body:\n{}", email.text_body);
        self.delivered.push(email);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
