use crate::core::{LessonContent, ProficiencyLevel, RenderedMessage};
use crate::utils::error::Result;
use askama::Template;
use chrono::NaiveDate;

pub const DEFAULT_HEADLINE: &str = "Daily Lesson";
pub const SUBJECT_PREFIX: &str = "Daily English Lesson";
pub const DISCLAIMER: &str =
    "This lesson was generated automatically and may occasionally contain mistakes.";

#[derive(Template)]
#[template(path = "lesson.html")]
struct HtmlLesson<'a> {
    headline: &'a str,
    body: &'a str,
    date: &'a str,
    level: &'a str,
    disclaimer: &'a str,
}

#[derive(Template)]
#[template(path = "lesson.txt", escape = "none")]
struct TextLesson<'a> {
    lesson: &'a str,
    date: &'a str,
    level: &'a str,
    disclaimer: &'a str,
}

/// First non-blank line becomes the headline; the rest, minus leading blank
/// lines, is the body. Accepts `\n`, `\r\n` and bare `\r` line endings.
pub fn split_lesson(raw_text: &str) -> LessonContent {
    let normalized = raw_text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let (headline, body) = match lines.iter().position(|line| !line.trim().is_empty()) {
        Some(index) => {
            let body = lines[index + 1..]
                .iter()
                .skip_while(|line| line.trim().is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join("\n");
            (lines[index].trim().to_string(), body.trim_end().to_string())
        }
        None => (DEFAULT_HEADLINE.to_string(), String::new()),
    };

    LessonContent {
        raw_text: raw_text.to_string(),
        headline,
        body,
    }
}

pub fn subject_for(date: NaiveDate) -> String {
    format!("{} - {}", SUBJECT_PREFIX, date.format("%Y-%m-%d"))
}

/// Plain-text and HTML bodies for one lesson. Output depends only on the arguments.
pub fn render_message(
    lesson: &LessonContent,
    level: &ProficiencyLevel,
    date: NaiveDate,
) -> Result<RenderedMessage> {
    let long_date = date.format("%A, %B %-d, %Y").to_string();

    let html_body = HtmlLesson {
        headline: &lesson.headline,
        body: &lesson.body,
        date: &long_date,
        level: level.as_str(),
        disclaimer: DISCLAIMER,
    }
    .render()?;

    let text_body = TextLesson {
        lesson: lesson.raw_text.trim(),
        date: &long_date,
        level: level.as_str(),
        disclaimer: DISCLAIMER,
    }
    .render()?;

    Ok(RenderedMessage {
        subject: subject_for(date),
        text_body,
        html_body,
    })
}
