use crate::core::prompt::build_prompt;
use crate::core::render::{render_message, split_lesson};
use crate::core::{
    DeliveryRecord, DeliveryStage, DeliveryStatus, LessonGenerator, MailSession, OutgoingEmail,
    RecipientAssignment, RunReport,
};
use crate::utils::error::{LessonError, Result};
use chrono::NaiveDate;
use lettre::message::Mailbox;

pub fn parse_recipient(address: &str) -> Result<Mailbox> {
    address
        .parse::<Mailbox>()
        .map_err(|e| LessonError::AddressError {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Runs the per-recipient pipeline (prompt, generate, render, send) over one
/// shared mail session.
pub struct DeliveryEngine<G: LessonGenerator> {
    generator: G,
}

impl<G: LessonGenerator> DeliveryEngine<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Processes every assignment in order and then closes `session`, whatever
    /// happened to the individual recipients.
    pub async fn run<S: MailSession>(
        &self,
        assignments: &[RecipientAssignment],
        session: &mut S,
        date: NaiveDate,
    ) -> RunReport {
        tracing::info!("Starting delivery to {} recipients", assignments.len());

        let mut report = RunReport::default();
        for (index, assignment) in assignments.iter().enumerate() {
            tracing::info!(
                "[{}/{}] {} ({}, {})",
                index + 1,
                assignments.len(),
                assignment.recipient_address,
                assignment.proficiency_level,
                assignment.category
            );

            let status = match self.deliver_one(assignment, session, date).await {
                Ok(()) => {
                    tracing::info!("✅ Sent to {}", assignment.recipient_address);
                    DeliveryStatus::Sent
                }
                Err((stage, e)) => {
                    tracing::error!(
                        "❌ Skipping {} at {:?} stage: {} (Category: {:?})",
                        assignment.recipient_address,
                        stage,
                        e,
                        e.category()
                    );
                    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                    DeliveryStatus::Failed {
                        stage,
                        reason: e.to_string(),
                    }
                }
            };

            report.records.push(DeliveryRecord {
                recipient: assignment.recipient_address.clone(),
                level: assignment.proficiency_level.clone(),
                status,
            });
        }

        if let Err(e) = session.close().await {
            tracing::warn!("⚠️ Failed to close mail session cleanly: {}", e);
        }

        tracing::info!(
            "Delivery finished: {} sent, {} failed",
            report.sent(),
            report.failed()
        );
        report
    }

    async fn deliver_one<S: MailSession>(
        &self,
        assignment: &RecipientAssignment,
        session: &mut S,
        date: NaiveDate,
    ) -> std::result::Result<(), (DeliveryStage, LessonError)> {
        let prompt = build_prompt(&assignment.proficiency_level, assignment.category);

        let raw_text = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| (DeliveryStage::Generate, e))?;
        tracing::debug!("Generated lesson:\n{}", raw_text);

        let lesson = split_lesson(&raw_text);
        let message = render_message(&lesson, &assignment.proficiency_level, date)
            .map_err(|e| (DeliveryStage::Render, e))?;

        let to = parse_recipient(&assignment.recipient_address)
            .map_err(|e| (DeliveryStage::Address, e))?;

        session
            .send(OutgoingEmail {
                to,
                subject: message.subject,
                text_body: message.text_body,
                html_body: message.html_body,
            })
            .await
            .map_err(|e| (DeliveryStage::Send, e))
    }
}
