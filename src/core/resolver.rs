use crate::core::{Category, ProficiencyLevel, RecipientAssignment};
use crate::utils::error::{LessonError, Result};

const DELIMITERS: [char; 3] = [',', ';', '|'];

/// Result of pairing recipients with levels.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub assignments: Vec<RecipientAssignment>,
    /// Levels that had no recipient to go to.
    pub dropped_levels: Vec<ProficiencyLevel>,
}

/// Splits on `,`, `;` or `|`, trimming and discarding empty tokens.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(DELIMITERS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn resolve_assignments(
    recipients: &str,
    levels: &str,
    default_level: &ProficiencyLevel,
    category: Category,
) -> Result<Resolution> {
    let recipients = split_list(recipients);
    if recipients.is_empty() {
        return Err(LessonError::ConfigError {
            message: "No recipients configured (SMTP_TO is empty)".to_string(),
        });
    }

    let mut levels: Vec<ProficiencyLevel> = split_list(levels)
        .into_iter()
        .filter_map(ProficiencyLevel::new)
        .collect();
    if levels.is_empty() {
        levels.push(default_level.clone());
    }

    let dropped_levels = if levels.len() > recipients.len() {
        levels.split_off(recipients.len())
    } else {
        Vec::new()
    };
    if !dropped_levels.is_empty() {
        tracing::warn!(
            "⚠️ {} levels configured for {} recipients, ignoring extra levels: {}",
            levels.len() + dropped_levels.len(),
            recipients.len(),
            dropped_levels
                .iter()
                .map(ProficiencyLevel::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    for level in levels.iter().filter(|level| !level.is_cefr()) {
        tracing::warn!("⚠️ '{}' is not a CEFR level, passing it to the prompt as-is", level);
    }

    // Broadcast and pad-with-last are the same rule: past the end, reuse the last level.
    let last = levels.last().cloned().unwrap_or_else(|| default_level.clone());
    let assignments = recipients
        .into_iter()
        .enumerate()
        .map(|(i, recipient_address)| RecipientAssignment {
            recipient_address,
            proficiency_level: levels.get(i).cloned().unwrap_or_else(|| last.clone()),
            category,
        })
        .collect();

    Ok(Resolution {
        assignments,
        dropped_levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c1() -> ProficiencyLevel {
        ProficiencyLevel::new("C1").unwrap()
    }

    fn levels_of(resolution: &Resolution) -> Vec<&str> {
        resolution
            .assignments
            .iter()
            .map(|a| a.proficiency_level.as_str())
            .collect()
    }

    #[test]
    fn test_split_list_mixed_delimiters() {
        assert_eq!(
            split_list(" a@x.com ; b@x.com|,c@x.com ,, "),
            vec!["a@x.com", "b@x.com", "c@x.com"]
        );
        assert!(split_list(" ,;| ").is_empty());
    }

    #[test]
    fn test_no_recipients_is_configuration_error() {
        let err = resolve_assignments(" , ", "B1", &c1(), Category::Phrase).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_empty_levels_use_default() {
        let resolution = resolve_assignments("a@x.com;b@x.com", "  ", &c1(), Category::Usage).unwrap();
        assert_eq!(levels_of(&resolution), vec!["C1", "C1"]);
        assert!(resolution.dropped_levels.is_empty());
    }

    #[test]
    fn test_single_level_broadcast() {
        let resolution = resolve_assignments("a@x.com,b@x.com", "B1", &c1(), Category::Phrase).unwrap();
        assert_eq!(levels_of(&resolution), vec!["B1", "B1"]);
    }

    #[test]
    fn test_pad_with_last_level() {
        let resolution =
            resolve_assignments("a@x.com,b@x.com,c@x.com", "A1,B2", &c1(), Category::Phrase).unwrap();
        assert_eq!(levels_of(&resolution), vec!["A1", "B2", "B2"]);
    }

    #[test]
    fn test_extra_levels_truncated() {
        let resolution = resolve_assignments("a@x.com", "A1,B2,C1", &c1(), Category::Phrase).unwrap();
        assert_eq!(levels_of(&resolution), vec!["A1"]);
        let dropped: Vec<&str> = resolution.dropped_levels.iter().map(|l| l.as_str()).collect();
        assert_eq!(dropped, vec!["B2", "C1"]);
    }

    #[test]
    fn test_order_and_category_preserved() {
        let resolution = resolve_assignments(
            "z@x.com|a@x.com|m@x.com",
            "C2|A2|B1",
            &c1(),
            Category::AppliedUsage,
        )
        .unwrap();
        let recipients: Vec<&str> = resolution
            .assignments
            .iter()
            .map(|a| a.recipient_address.as_str())
            .collect();
        assert_eq!(recipients, vec!["z@x.com", "a@x.com", "m@x.com"]);
        assert_eq!(levels_of(&resolution), vec!["C2", "A2", "B1"]);
        assert!(resolution
            .assignments
            .iter()
            .all(|a| a.category == Category::AppliedUsage));
    }

    #[test]
    fn test_assignment_count_matches_recipients() {
        let recipient_inputs = ["a@x.com", "a@x.com,b@x.com", "a;b;c;d", " ,a, ,b,"];
        let level_inputs = ["", "A1", "A1,A2", "A1|A2|B1|B2|C1|C2", ";;"];

        for recipients in recipient_inputs {
            for levels in level_inputs {
                let resolution =
                    resolve_assignments(recipients, levels, &c1(), Category::Phrase).unwrap();
                assert_eq!(resolution.assignments.len(), split_list(recipients).len());
                assert!(resolution
                    .assignments
                    .iter()
                    .all(|a| !a.proficiency_level.as_str().is_empty()));
            }
        }
    }
}
