pub mod delivery;
pub mod prompt;
pub mod render;
pub mod resolver;

pub use crate::domain::model::{
    Category, DeliveryRecord, DeliveryStage, DeliveryStatus, LessonContent, OutgoingEmail,
    ProficiencyLevel, RecipientAssignment, RenderedMessage, RunReport,
};
pub use crate::domain::ports::{LessonGenerator, MailSession};
pub use crate::utils::error::Result;
