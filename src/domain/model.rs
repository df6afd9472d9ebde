use chrono::Weekday;
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CEFR tiers the prompt builder knows how to describe.
pub const CEFR_LEVELS: [&str; 6] = ["A1", "A2", "B1", "B2", "C1", "C2"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProficiencyLevel(String);

impl ProficiencyLevel {
    /// Returns `None` for blank input. Anything else is kept as written (trimmed).
    pub fn new(level: impl AsRef<str>) -> Option<Self> {
        let trimmed = level.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_cefr(&self) -> bool {
        CEFR_LEVELS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&self.0))
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Phrase,
    Collocation,
    Usage,
    RegisterAndTone,
    PrecisionAndNuance,
    ContrastAndRefinement,
    AppliedUsage,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Phrase,
        Category::Collocation,
        Category::Usage,
        Category::RegisterAndTone,
        Category::PrecisionAndNuance,
        Category::ContrastAndRefinement,
        Category::AppliedUsage,
    ];

    pub fn for_weekday(day: Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }

    /// `0` is Monday, `6` is Sunday.
    pub fn from_day_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Phrase => "Phrase",
            Category::Collocation => "Collocation",
            Category::Usage => "Usage",
            Category::RegisterAndTone => "Register & tone",
            Category::PrecisionAndNuance => "Precision & nuance",
            Category::ContrastAndRefinement => "Contrast & refinement",
            Category::AppliedUsage => "Applied usage",
        }
    }

    /// Weekend categories revisit material instead of introducing new items.
    pub fn reuses_earlier_items(&self) -> bool {
        matches!(
            self,
            Category::ContrastAndRefinement | Category::AppliedUsage
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientAssignment {
    pub recipient_address: String,
    pub proficiency_level: ProficiencyLevel,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonContent {
    pub raw_text: String,
    pub headline: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// A rendered message addressed to a single, already validated mailbox.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: Mailbox,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStage {
    Generate,
    Render,
    Address,
    Send,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed { stage: DeliveryStage, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub recipient: String,
    pub level: ProficiencyLevel,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<DeliveryRecord>,
}

impl RunReport {
    pub fn sent(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == DeliveryStatus::Sent)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.sent()
    }
}
